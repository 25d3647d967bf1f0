//! Query and set entry points.
//!
//! "set" runs key injection, then the TSF compartment, then the IMM32
//! message, stopping at the first strategy that reports `Applied`.
//! "query" only ever asks the input-method window.

use log::debug;

use crate::config::Timing;
use crate::error::{Result, SwitchError};
use crate::platform::{CompartmentStore, KeyInjector, TargetWindow, WindowSystem};
use crate::reader::StateReader;
use crate::strategy::{CompartmentWrite, KeyInjection, LegacyMessage, Strategy, StrategyResult};
use crate::types::{ConversionMode, ToggleKeyMode};

/// Try each strategy in order. Returns the name of the one that applied.
pub fn run_cascade(
    strategies: &[&dyn Strategy],
    target: Option<TargetWindow>,
    mode: ConversionMode,
) -> Result<&'static str> {
    for strategy in strategies {
        let result = strategy.attempt(target, mode);
        debug!("{}: {:?}", strategy.name(), result);
        if result == StrategyResult::Applied {
            return Ok(strategy.name());
        }
    }
    Err(SwitchError::AllStrategiesExhausted)
}

pub struct Switcher<'p, P: ?Sized> {
    platform: &'p P,
    timing: Timing,
}

impl<'p, P> Switcher<'p, P>
where
    P: WindowSystem + KeyInjector + CompartmentStore + ?Sized,
{
    pub fn new(platform: &'p P, timing: Timing) -> Self {
        Switcher { platform, timing }
    }

    fn reader(&self) -> StateReader<'p, P> {
        StateReader::new(self.platform, self.timing.message_timeout)
    }

    /// Current mode of the focused window. Anything unreadable (no focus,
    /// non-Chinese layout, hung window) reports as alphanumeric.
    pub fn query(&self) -> ConversionMode {
        let target = self.platform.foreground_window();
        self.reader()
            .observe(target)
            .unwrap_or(ConversionMode::Alphanumeric)
    }

    /// Switch the focused window to `mode`
    pub fn set(&self, mode: ConversionMode, policy: ToggleKeyMode) -> Result<&'static str> {
        let target = self.platform.foreground_window();
        debug!("set {} (key policy {:?}) on {:?}", mode, policy, target);

        let injection = KeyInjection::new(
            self.reader(),
            self.platform,
            policy,
            self.timing.settle_delay,
        );
        let compartment = CompartmentWrite::new(self.platform);
        let legacy = LegacyMessage::new(self.platform, self.timing.message_timeout);

        let cascade: [&dyn Strategy; 3] = [&injection, &compartment, &legacy];
        run_cascade(&cascade, target, mode)
    }
}

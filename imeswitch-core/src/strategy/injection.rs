//! Emulates the modifier keystroke the input method listens for.
//!
//! Microsoft Pinyin intercepts Shift/Ctrl inside its own input pipeline and
//! keeps its state per UI thread, so a synthetic keystroke is the one channel
//! that reliably reaches it from another process.

use std::thread;
use std::time::Duration;

use log::{debug, warn};

use super::{Strategy, StrategyResult};
use crate::platform::{KeyInjector, TargetWindow, WindowSystem};
use crate::reader::StateReader;
use crate::types::{ConversionMode, ToggleKey, ToggleKeyMode};

pub struct KeyInjection<'p, W: ?Sized, K: ?Sized> {
    reader: StateReader<'p, W>,
    injector: &'p K,
    policy: ToggleKeyMode,
    settle_delay: Duration,
}

impl<'p, W, K> KeyInjection<'p, W, K>
where
    W: WindowSystem + ?Sized,
    K: KeyInjector + ?Sized,
{
    pub fn new(
        reader: StateReader<'p, W>,
        injector: &'p K,
        policy: ToggleKeyMode,
        settle_delay: Duration,
    ) -> Self {
        KeyInjection { reader, injector, policy, settle_delay }
    }

    fn inject(&self, key: ToggleKey) -> bool {
        match self.injector.inject_key_pair(key) {
            Ok(()) => {
                debug!("injected {:?} key pair", key);
                true
            }
            Err(e) => {
                warn!("injecting {:?} failed: {}", key, e);
                false
            }
        }
    }

    /// Shift, settle, re-check, then Ctrl if Shift changed nothing
    fn escalate(&self, target: Option<TargetWindow>, mode: ConversionMode) -> StrategyResult {
        if !self.inject(ToggleKey::Shift) {
            return StrategyResult::Failed;
        }

        if !self.settle_delay.is_zero() {
            thread::sleep(self.settle_delay);
        }

        if self.reader.observe(target) == Some(mode) {
            return StrategyResult::Applied;
        }

        debug!("Shift had no effect, trying Ctrl");
        if self.inject(ToggleKey::Ctrl) {
            StrategyResult::Applied
        } else {
            StrategyResult::Failed
        }
    }
}

impl<'p, W, K> Strategy for KeyInjection<'p, W, K>
where
    W: WindowSystem + ?Sized,
    K: KeyInjector + ?Sized,
{
    fn name(&self) -> &'static str {
        "key-injection"
    }

    fn attempt(&self, target: Option<TargetWindow>, mode: ConversionMode) -> StrategyResult {
        // Toggling blind could flip the mode the wrong way
        let Some(current) = self.reader.observe(target) else {
            return StrategyResult::NotApplicable;
        };

        if current == mode {
            debug!("already in {} mode", mode);
            return StrategyResult::Applied;
        }

        match self.policy.fixed_key() {
            Some(key) => {
                if self.inject(key) {
                    StrategyResult::Applied
                } else {
                    StrategyResult::Failed
                }
            }
            None => self.escalate(target, mode),
        }
    }
}

//! Reads the real conversion mode straight from the input-method window.
//!
//! The TSF compartment is deliberately not consulted here: a previous run may
//! have written it without the input method ever picking the value up.

use std::time::Duration;

use log::debug;

use crate::error::{Result, SwitchError};
use crate::platform::{ImeControl, TargetWindow, WindowSystem};
use crate::types::ConversionMode;

/// Resolve the input-method window behind `target`. Fails without sending any
/// message when the layout is outside the supported language family.
pub(crate) fn resolve_ime_window<W>(windows: &W, target: Option<TargetWindow>) -> Result<TargetWindow>
where
    W: WindowSystem + ?Sized,
{
    let window = target.ok_or(SwitchError::UnresolvableTarget)?;
    let language = windows.keyboard_language(window);
    if !language.is_chinese() {
        debug!("layout {:#06X} is not a Chinese layout", language.0);
        return Err(SwitchError::UnresolvableTarget);
    }
    windows
        .default_ime_window(window)
        .ok_or(SwitchError::UnresolvableTarget)
}

pub struct StateReader<'p, W: ?Sized> {
    windows: &'p W,
    timeout: Duration,
}

impl<'p, W: WindowSystem + ?Sized> StateReader<'p, W> {
    pub fn new(windows: &'p W, timeout: Duration) -> Self {
        StateReader { windows, timeout }
    }

    pub fn read(&self, target: Option<TargetWindow>) -> Result<ConversionMode> {
        let ime_window = resolve_ime_window(self.windows, target)?;
        let bits = self.windows.send_ime_control(
            ime_window,
            ImeControl::GetConversionMode,
            0,
            self.timeout,
        )?;
        Ok(ConversionMode::from_bits(bits))
    }

    /// Like [`read`](Self::read), but folds every failure into `None` (unknown)
    pub fn observe(&self, target: Option<TargetWindow>) -> Option<ConversionMode> {
        match self.read(target) {
            Ok(mode) => Some(mode),
            Err(e) => {
                debug!("conversion mode unreadable: {}", e);
                None
            }
        }
    }
}

//! `WM_IME_CONTROL` read-modify-write for IMM32 input methods (Windows 7/8).

use std::time::Duration;

use log::{debug, warn};

use super::{Strategy, StrategyResult};
use crate::error::Result;
use crate::platform::{ImeControl, TargetWindow, WindowSystem};
use crate::reader::resolve_ime_window;
use crate::types::ConversionMode;

pub struct LegacyMessage<'p, W: ?Sized> {
    windows: &'p W,
    timeout: Duration,
}

impl<'p, W: WindowSystem + ?Sized> LegacyMessage<'p, W> {
    pub fn new(windows: &'p W, timeout: Duration) -> Self {
        LegacyMessage { windows, timeout }
    }

    fn write(&self, target: Option<TargetWindow>, mode: ConversionMode) -> Result<u32> {
        let ime_window = resolve_ime_window(self.windows, target)?;
        let current = self.windows.send_ime_control(
            ime_window,
            ImeControl::GetConversionMode,
            0,
            self.timeout,
        )?;
        let updated = mode.apply_to(current);
        // Sent synchronously: older input methods drop posted IME_CONTROL messages
        self.windows.send_ime_control(
            ime_window,
            ImeControl::SetConversionMode,
            updated,
            self.timeout,
        )?;
        Ok(updated)
    }
}

impl<'p, W: WindowSystem + ?Sized> Strategy for LegacyMessage<'p, W> {
    fn name(&self) -> &'static str {
        "imm32-message"
    }

    fn attempt(&self, target: Option<TargetWindow>, mode: ConversionMode) -> StrategyResult {
        match self.write(target, mode) {
            Ok(bits) => {
                debug!("conversion mode set to {:#06X}", bits);
                StrategyResult::Applied
            }
            Err(e) => {
                warn!("IME_CONTROL write failed: {}", e);
                StrategyResult::Failed
            }
        }
    }
}

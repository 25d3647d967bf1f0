//! Writes the global TSF conversion compartment.
//!
//! Some older and third-party pinyin input methods watch this cell. Microsoft
//! Pinyin on Windows 10/11 watches its per-thread compartment instead, so a
//! successful write here only means the write went through.

use log::{debug, warn};

use super::{Strategy, StrategyResult};
use crate::error::PlatformError;
use crate::platform::{CompartmentId, CompartmentStore, TargetWindow};
use crate::types::ConversionMode;

/// `GUID_COMPARTMENT_KEYBOARD_INPUTMODE_CONVERSION`
/// {CCBE29E4-7A86-474F-8C64-5B12DDE00D1D}
pub const KEYBOARD_INPUTMODE_CONVERSION: CompartmentId =
    CompartmentId::from_u128(0xCCBE29E4_7A86_474F_8C64_5B12DDE00D1D);

/// `TF_CONVERSIONMODE_NATIVE`
const TF_CONVERSIONMODE_NATIVE: i32 = 0x0001;

pub struct CompartmentWrite<'p, S: ?Sized> {
    store: &'p S,
}

impl<'p, S: CompartmentStore + ?Sized> CompartmentWrite<'p, S> {
    pub fn new(store: &'p S) -> Self {
        CompartmentWrite { store }
    }

    fn write(&self, mode: ConversionMode) -> Result<i32, PlatformError> {
        let mut cell = self.store.open(KEYBOARD_INPUTMODE_CONVERSION)?;

        // Other flags in the cell belong to whoever else writes it
        let current = match cell.get() {
            Ok(value) => value.unwrap_or(0),
            Err(e) => {
                debug!("compartment read failed, starting from 0: {}", e);
                0
            }
        };
        let updated = match mode {
            ConversionMode::Native => current | TF_CONVERSIONMODE_NATIVE,
            ConversionMode::Alphanumeric => current & !TF_CONVERSIONMODE_NATIVE,
        };

        cell.set(updated)?;
        Ok(updated)
    }
}

impl<'p, S: CompartmentStore + ?Sized> Strategy for CompartmentWrite<'p, S> {
    fn name(&self) -> &'static str {
        "tsf-compartment"
    }

    fn attempt(&self, _target: Option<TargetWindow>, mode: ConversionMode) -> StrategyResult {
        match self.write(mode) {
            Ok(value) => {
                debug!("compartment set to {:#06X}", value);
                StrategyResult::Applied
            }
            Err(e) => {
                warn!("compartment write failed: {}", e);
                StrategyResult::Failed
            }
        }
    }
}

//! The independent ways of changing the conversion mode.

pub mod injection;
pub mod compartment;
pub mod legacy;

pub use injection::KeyInjection;
pub use compartment::CompartmentWrite;
pub use legacy::LegacyMessage;

use crate::platform::TargetWindow;
use crate::types::ConversionMode;

/// Outcome of one strategy attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyResult {
    /// Changed and verified, or written without error
    Applied,
    /// Preconditions not met, e.g. a non-Chinese keyboard layout
    NotApplicable,
    /// Preconditions met but the underlying call failed
    Failed,
}

pub trait Strategy {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn attempt(&self, target: Option<TargetWindow>, mode: ConversionMode) -> StrategyResult;
}

#![allow(dead_code)]

use std::cell::Cell;

use imeswitch_core::{ConversionMode, Strategy, StrategyResult, TargetWindow, Timing};

/// Default message timeout, no settle wait
pub fn fast_timing() -> Timing {
    Timing::from_millis(Timing::DEFAULT_TIMEOUT_MS, 0)
}

/// Strategy returning a fixed result and counting its attempts
pub struct StubStrategy {
    name: &'static str,
    result: StrategyResult,
    calls: Cell<usize>,
}

impl StubStrategy {
    pub fn new(name: &'static str, result: StrategyResult) -> Self {
        StubStrategy { name, result, calls: Cell::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Strategy for StubStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn attempt(&self, _target: Option<TargetWindow>, _mode: ConversionMode) -> StrategyResult {
        self.calls.set(self.calls.get() + 1);
        self.result
    }
}

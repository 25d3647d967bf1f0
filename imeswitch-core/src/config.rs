use std::time::Duration;

/// Timing bounds for one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Upper bound for each synchronous message to the input-method window
    pub message_timeout: Duration,
    /// Wait after an injected Shift before checking whether it took effect
    pub settle_delay: Duration,
}

impl Timing {
    pub const DEFAULT_TIMEOUT_MS: u64 = 500;
    pub const DEFAULT_SETTLE_MS: u64 = 100;

    pub fn from_millis(timeout_ms: u64, settle_ms: u64) -> Self {
        Timing {
            message_timeout: Duration::from_millis(timeout_ms),
            settle_delay: Duration::from_millis(settle_ms),
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Timing::from_millis(Self::DEFAULT_TIMEOUT_MS, Self::DEFAULT_SETTLE_MS)
    }
}

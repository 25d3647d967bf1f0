//! Toggle keys and the policy choosing between them

use std::str::FromStr;

use crate::error::SwitchError;

/// Modifier keys the input method treats as its conversion toggle
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleKey {
    Shift = 0x10,   // VK_SHIFT
    Ctrl = 0x11,    // VK_CONTROL
}

impl ToggleKey {
    /// Windows virtual-key code
    pub fn vk_code(self) -> u16 {
        self as u16
    }
}

/// Which key(s) the key-injection strategy may emulate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToggleKeyMode {
    Shift,
    Ctrl,
    /// Shift first; Ctrl only when Shift shows no effect after the settle delay
    #[default]
    Auto,
}

impl ToggleKeyMode {
    /// The single key for a fixed policy, `None` for `Auto`
    pub fn fixed_key(self) -> Option<ToggleKey> {
        match self {
            ToggleKeyMode::Shift => Some(ToggleKey::Shift),
            ToggleKeyMode::Ctrl => Some(ToggleKey::Ctrl),
            ToggleKeyMode::Auto => None,
        }
    }
}

impl FromStr for ToggleKeyMode {
    type Err = SwitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shift" => Ok(ToggleKeyMode::Shift),
            "ctrl" => Ok(ToggleKeyMode::Ctrl),
            "auto" => Ok(ToggleKeyMode::Auto),
            _ => Err(SwitchError::InvalidArgument(format!("Unknown toggle key: {}", s))),
        }
    }
}

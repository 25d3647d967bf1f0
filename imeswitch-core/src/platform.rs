//! Seams to the host window system, input injection and the TSF property store.
//!
//! Each strategy depends only on the trait it needs, so every step of the
//! cascade can be driven by [`crate::sim::SimulatedIme`] in tests.

use std::time::Duration;

use crate::error::PlatformError;
use crate::types::ToggleKey;

/// Opaque handle to a foreign window. Never owned; may go stale if focus moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetWindow(isize);

impl TargetWindow {
    /// Wrap a raw handle, treating null as "no window"
    pub fn from_raw(raw: isize) -> Option<Self> {
        if raw == 0 {
            None
        } else {
            Some(TargetWindow(raw))
        }
    }

    pub fn as_raw(self) -> isize {
        self.0
    }
}

/// Windows `LANGID` of a keyboard layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LangId(pub u16);

/// Primary language shared by every Chinese layout (zh-CN, zh-TW, zh-HK, ...)
pub const LANG_CHINESE: u16 = 0x04;

impl LangId {
    /// The language id lives in the low word of an `HKL`
    pub fn from_layout(hkl: usize) -> Self {
        LangId((hkl & 0xFFFF) as u16)
    }

    pub fn primary(self) -> u16 {
        self.0 & 0x03FF
    }

    pub fn is_chinese(self) -> bool {
        self.primary() == LANG_CHINESE
    }
}

/// `WM_IME_CONTROL` sub-commands understood by the input-method window
#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImeControl {
    GetConversionMode = 0x0001,   // IMC_GETCONVERSIONMODE
    SetConversionMode = 0x0002,   // IMC_SETCONVERSIONMODE
}

impl ImeControl {
    pub fn call_name(self) -> &'static str {
        match self {
            ImeControl::GetConversionMode => "IMC_GETCONVERSIONMODE",
            ImeControl::SetConversionMode => "IMC_SETCONVERSIONMODE",
        }
    }
}

pub trait WindowSystem {
    /// The window currently receiving keyboard input
    fn foreground_window(&self) -> Option<TargetWindow>;

    /// Keyboard layout language of the thread owning `window`
    fn keyboard_language(&self, window: TargetWindow) -> LangId;

    /// Default input-method window attached to `window`
    fn default_ime_window(&self, window: TargetWindow) -> Option<TargetWindow>;

    /// Send `WM_IME_CONTROL` synchronously, blocking at most `timeout`.
    /// Returns the message result.
    fn send_ime_control(
        &self,
        ime_window: TargetWindow,
        command: ImeControl,
        value: u32,
        timeout: Duration,
    ) -> Result<u32, PlatformError>;
}

pub trait KeyInjector {
    /// Synthesize key-down then key-up for `key` as one atomic batch
    fn inject_key_pair(&self, key: ToggleKey) -> Result<(), PlatformError>;
}

/// Well-known identifier of a TSF compartment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompartmentId(u128);

impl CompartmentId {
    pub const fn from_u128(value: u128) -> Self {
        CompartmentId(value)
    }

    pub const fn as_u128(self) -> u128 {
        self.0
    }
}

/// An open global compartment. Dropping it releases every handle acquired to
/// reach it, in reverse order of acquisition.
pub trait CompartmentCell {
    /// Current integer value, `None` when the cell holds no integer
    fn get(&self) -> Result<Option<i32>, PlatformError>;

    fn set(&mut self, value: i32) -> Result<(), PlatformError>;
}

pub trait CompartmentStore {
    fn open(&self, id: CompartmentId) -> Result<Box<dyn CompartmentCell + '_>, PlatformError>;
}

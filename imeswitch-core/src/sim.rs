//! In-memory input method for exercising the cascade without a desktop.
//!
//! Models one focused window with an attached input-method window, the
//! keyboard layout of its thread, the conversion bits the input method holds,
//! the global conversion compartment, and which modifier the user has bound
//! as the conversion toggle. Every injected key, delivered `WM_IME_CONTROL`
//! and compartment write is recorded.

use std::cell::RefCell;
use std::time::Duration;

use crate::error::PlatformError;
use crate::platform::{
    CompartmentCell, CompartmentId, CompartmentStore, ImeControl, KeyInjector, LangId,
    TargetWindow, WindowSystem,
};
use crate::types::{ConversionMode, ToggleKey, IME_CMODE_NATIVE};

const FOCUSED_WINDOW: isize = 0x0001_0010;
const IME_WINDOW: isize = 0x0001_0020;

const ERROR_INVALID_WINDOW_HANDLE: u32 = 1400;
const E_FAIL: u32 = 0x8000_4005;

#[derive(Debug, Clone)]
struct SimState {
    focused: bool,
    has_ime_window: bool,
    responsive: bool,
    language: LangId,
    conversion: u32,
    toggle: Option<ToggleKey>,
    injection_fails: bool,
    compartment_available: bool,
    compartment_read_fails: bool,
    honours_compartment: bool,
    compartment: Option<i32>,
    open_compartments: usize,
    injected: Vec<ToggleKey>,
    messages: Vec<(ImeControl, u32)>,
    compartment_writes: Vec<(CompartmentId, i32)>,
}

impl Default for SimState {
    fn default() -> Self {
        SimState {
            focused: true,
            has_ime_window: true,
            responsive: true,
            language: LangId(0x0804),
            conversion: 0,
            toggle: Some(ToggleKey::Shift),
            injection_fails: false,
            compartment_available: true,
            compartment_read_fails: false,
            honours_compartment: false,
            compartment: None,
            open_compartments: 0,
            injected: Vec::new(),
            messages: Vec::new(),
            compartment_writes: Vec::new(),
        }
    }
}

/// Microsoft Pinyin in alphanumeric mode on a zh-CN layout, toggled by Shift,
/// ignoring the global compartment.
#[derive(Debug, Default)]
pub struct SimulatedIme {
    state: RefCell<SimState>,
}

impl SimulatedIme {
    pub fn new() -> Self {
        Self::default()
    }

    fn configure(self, f: impl FnOnce(&mut SimState)) -> Self {
        f(&mut *self.state.borrow_mut());
        self
    }

    pub fn with_mode(self, mode: ConversionMode) -> Self {
        self.configure(|s| s.conversion = mode.apply_to(s.conversion))
    }

    pub fn with_conversion_bits(self, bits: u32) -> Self {
        self.configure(|s| s.conversion = bits)
    }

    pub fn with_language(self, language: u16) -> Self {
        self.configure(|s| s.language = LangId(language))
    }

    /// Key that flips the native bit; `None` makes every keystroke a no-op
    pub fn with_toggle_key(self, key: Option<ToggleKey>) -> Self {
        self.configure(|s| s.toggle = key)
    }

    pub fn with_compartment_value(self, value: Option<i32>) -> Self {
        self.configure(|s| s.compartment = value)
    }

    pub fn with_failing_injection(self) -> Self {
        self.configure(|s| s.injection_fails = true)
    }

    /// The input method follows the global compartment like older IMEs do
    pub fn honouring_compartment(self) -> Self {
        self.configure(|s| s.honours_compartment = true)
    }

    pub fn without_focus(self) -> Self {
        self.configure(|s| s.focused = false)
    }

    pub fn without_ime_window(self) -> Self {
        self.configure(|s| s.has_ime_window = false)
    }

    pub fn without_compartment(self) -> Self {
        self.configure(|s| s.compartment_available = false)
    }

    /// The compartment opens and accepts writes, but reading it fails
    pub fn with_failing_compartment_read(self) -> Self {
        self.configure(|s| s.compartment_read_fails = true)
    }

    /// Every `WM_IME_CONTROL` times out
    pub fn unresponsive(self) -> Self {
        self.configure(|s| s.responsive = false)
    }

    /// Change the mode behind the tool's back, as the user would
    pub fn set_mode(&self, mode: ConversionMode) {
        let mut state = self.state.borrow_mut();
        state.conversion = mode.apply_to(state.conversion);
    }

    pub fn focused_window(&self) -> Option<TargetWindow> {
        if self.state.borrow().focused {
            TargetWindow::from_raw(FOCUSED_WINDOW)
        } else {
            None
        }
    }

    pub fn mode(&self) -> ConversionMode {
        ConversionMode::from_bits(self.state.borrow().conversion)
    }

    pub fn conversion_bits(&self) -> u32 {
        self.state.borrow().conversion
    }

    pub fn compartment_value(&self) -> Option<i32> {
        self.state.borrow().compartment
    }

    pub fn injected_keys(&self) -> Vec<ToggleKey> {
        self.state.borrow().injected.clone()
    }

    pub fn messages(&self) -> Vec<(ImeControl, u32)> {
        self.state.borrow().messages.clone()
    }

    pub fn compartment_writes(&self) -> Vec<(CompartmentId, i32)> {
        self.state.borrow().compartment_writes.clone()
    }

    /// Compartments opened and not yet released
    pub fn open_compartments(&self) -> usize {
        self.state.borrow().open_compartments
    }
}

impl WindowSystem for SimulatedIme {
    fn foreground_window(&self) -> Option<TargetWindow> {
        self.focused_window()
    }

    fn keyboard_language(&self, _window: TargetWindow) -> LangId {
        self.state.borrow().language
    }

    fn default_ime_window(&self, window: TargetWindow) -> Option<TargetWindow> {
        let state = self.state.borrow();
        if state.has_ime_window && window.as_raw() == FOCUSED_WINDOW {
            TargetWindow::from_raw(IME_WINDOW)
        } else {
            None
        }
    }

    fn send_ime_control(
        &self,
        ime_window: TargetWindow,
        command: ImeControl,
        value: u32,
        _timeout: Duration,
    ) -> Result<u32, PlatformError> {
        let mut state = self.state.borrow_mut();
        if ime_window.as_raw() != IME_WINDOW {
            return Err(PlatformError::ApiFailure {
                call: command.call_name(),
                code: ERROR_INVALID_WINDOW_HANDLE,
            });
        }
        if !state.responsive {
            return Err(PlatformError::Timeout { call: command.call_name() });
        }

        state.messages.push((command, value));
        match command {
            ImeControl::GetConversionMode => Ok(state.conversion),
            ImeControl::SetConversionMode => {
                state.conversion = value;
                Ok(0)
            }
        }
    }
}

impl KeyInjector for SimulatedIme {
    fn inject_key_pair(&self, key: ToggleKey) -> Result<(), PlatformError> {
        let mut state = self.state.borrow_mut();
        if state.injection_fails {
            return Err(PlatformError::ApiFailure { call: "SendInput", code: 5 });
        }

        state.injected.push(key);
        if state.toggle == Some(key) {
            state.conversion ^= IME_CMODE_NATIVE;
        }
        Ok(())
    }
}

struct SimCompartment<'a> {
    ime: &'a SimulatedIme,
    id: CompartmentId,
}

impl CompartmentCell for SimCompartment<'_> {
    fn get(&self) -> Result<Option<i32>, PlatformError> {
        let state = self.ime.state.borrow();
        if state.compartment_read_fails {
            return Err(PlatformError::ApiFailure { call: "ITfCompartment::GetValue", code: E_FAIL });
        }
        Ok(state.compartment)
    }

    fn set(&mut self, value: i32) -> Result<(), PlatformError> {
        let mut state = self.ime.state.borrow_mut();
        state.compartment = Some(value);
        state.compartment_writes.push((self.id, value));
        if state.honours_compartment {
            let mode = ConversionMode::from_bits(value as u32);
            state.conversion = mode.apply_to(state.conversion);
        }
        Ok(())
    }
}

impl Drop for SimCompartment<'_> {
    fn drop(&mut self) {
        self.ime.state.borrow_mut().open_compartments -= 1;
    }
}

impl CompartmentStore for SimulatedIme {
    fn open(&self, id: CompartmentId) -> Result<Box<dyn CompartmentCell + '_>, PlatformError> {
        let mut state = self.state.borrow_mut();
        if !state.compartment_available {
            return Err(PlatformError::ApiFailure { call: "CoCreateInstance", code: E_FAIL });
        }
        state.open_compartments += 1;
        Ok(Box::new(SimCompartment { ime: self, id }))
    }
}

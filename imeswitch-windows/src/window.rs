//! Foreground window, keyboard layout, `WM_IME_CONTROL` and `SendInput`.

use std::ffi::c_void;
use std::mem;
use std::time::Duration;

use imeswitch_core::{
    ImeControl, KeyInjector, LangId, PlatformError, TargetWindow, ToggleKey, WindowSystem,
};
use log::debug;
use windows::Win32::Foundation::{GetLastError, HWND, LPARAM, WPARAM};
use windows::Win32::UI::Input::Ime::ImmGetDefaultIMEWnd;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetKeyboardLayout, SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYBD_EVENT_FLAGS,
    KEYEVENTF_KEYUP, VIRTUAL_KEY,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetForegroundWindow, GetWindowThreadProcessId, SendMessageTimeoutW, SMTO_ABORTIFHUNG,
    SMTO_BLOCK, WM_IME_CONTROL,
};

/// The live desktop session of the calling process
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Platform;

impl Win32Platform {
    pub fn new() -> Self {
        Win32Platform
    }
}

fn to_hwnd(window: TargetWindow) -> HWND {
    HWND(window.as_raw() as *mut c_void)
}

fn from_hwnd(hwnd: HWND) -> Option<TargetWindow> {
    TargetWindow::from_raw(hwnd.0 as isize)
}

fn key_event(vk: VIRTUAL_KEY, flags: KEYBD_EVENT_FLAGS) -> INPUT {
    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: vk,
                wScan: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

impl WindowSystem for Win32Platform {
    fn foreground_window(&self) -> Option<TargetWindow> {
        from_hwnd(unsafe { GetForegroundWindow() })
    }

    fn keyboard_language(&self, window: TargetWindow) -> LangId {
        unsafe {
            let thread_id = GetWindowThreadProcessId(to_hwnd(window), None);
            let layout = GetKeyboardLayout(thread_id);
            LangId::from_layout(layout.0 as usize)
        }
    }

    fn default_ime_window(&self, window: TargetWindow) -> Option<TargetWindow> {
        from_hwnd(unsafe { ImmGetDefaultIMEWnd(to_hwnd(window)) })
    }

    fn send_ime_control(
        &self,
        ime_window: TargetWindow,
        command: ImeControl,
        value: u32,
        timeout: Duration,
    ) -> Result<u32, PlatformError> {
        let timeout_ms = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
        let mut result: usize = 0;

        let sent = unsafe {
            SendMessageTimeoutW(
                to_hwnd(ime_window),
                WM_IME_CONTROL,
                WPARAM(command as usize),
                LPARAM(value as isize),
                SMTO_ABORTIFHUNG | SMTO_BLOCK,
                timeout_ms,
                Some(&mut result as *mut usize),
            )
        };

        // Zero covers both a hung target and an elapsed timeout
        if sent.0 == 0 {
            debug!("{} to {:#X} returned 0", command.call_name(), ime_window.as_raw());
            return Err(PlatformError::Timeout { call: command.call_name() });
        }
        Ok(result as u32)
    }
}

impl KeyInjector for Win32Platform {
    fn inject_key_pair(&self, key: ToggleKey) -> Result<(), PlatformError> {
        let vk = VIRTUAL_KEY(key.vk_code());
        let inputs = [
            key_event(vk, KEYBD_EVENT_FLAGS(0)),
            key_event(vk, KEYEVENTF_KEYUP),
        ];

        let inserted = unsafe { SendInput(&inputs, mem::size_of::<INPUT>() as i32) };
        if inserted as usize != inputs.len() {
            let code = unsafe { GetLastError() };
            return Err(PlatformError::ApiFailure { call: "SendInput", code: code.0 });
        }
        Ok(())
    }
}

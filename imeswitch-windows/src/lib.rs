//! Win32 and Text Services Framework integration for IME Switcher
//!
//! This crate binds the platform seams of `imeswitch-core` to the real
//! window system. It is empty on other targets.

#[cfg(target_os = "windows")]
mod window;
#[cfg(target_os = "windows")]
mod compartment;

#[cfg(target_os = "windows")]
pub use window::Win32Platform;

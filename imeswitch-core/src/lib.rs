//! Conversion-mode control for the Windows pinyin input method.
//!
//! The platform primitives live behind the traits in [`platform`]; the
//! Win32 binding is provided by the `imeswitch-windows` crate and an
//! in-memory stand-in by [`sim`].

pub mod types;
pub mod error;
pub mod config;
pub mod platform;
pub mod reader;
pub mod strategy;
pub mod switcher;
pub mod sim;

pub use types::*;
pub use error::{PlatformError, Result, SwitchError};
pub use config::Timing;
pub use platform::{
    CompartmentCell, CompartmentId, CompartmentStore, ImeControl, KeyInjector, LangId,
    TargetWindow, WindowSystem,
};
pub use reader::StateReader;
pub use strategy::{Strategy, StrategyResult};
pub use switcher::{run_cascade, Switcher};

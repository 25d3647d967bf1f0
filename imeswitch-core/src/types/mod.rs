pub mod mode;
pub mod keys;

pub use mode::*;
pub use keys::*;

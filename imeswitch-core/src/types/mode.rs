//! Conversion modes and their bit-level encoding

use std::fmt;
use std::str::FromStr;

use crate::error::SwitchError;

/// `IME_CMODE_NATIVE`: set while the input method produces native script
pub const IME_CMODE_NATIVE: u32 = 0x0001;

/// The input method's binary entry state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionMode {
    /// Native script entry ("zh")
    Native,
    /// Plain alphanumeric entry ("en")
    Alphanumeric,
}

impl ConversionMode {
    /// Decode a conversion-mode bit set. Only the native bit is significant.
    pub fn from_bits(bits: u32) -> Self {
        if bits & IME_CMODE_NATIVE != 0 {
            ConversionMode::Native
        } else {
            ConversionMode::Alphanumeric
        }
    }

    /// Set or clear the native bit in `bits`, leaving every other flag intact.
    ///
    /// # Examples
    /// ```
    /// use imeswitch_core::ConversionMode;
    ///
    /// assert_eq!(ConversionMode::Native.apply_to(0x0008), 0x0009);
    /// assert_eq!(ConversionMode::Alphanumeric.apply_to(0x0009), 0x0008);
    /// ```
    pub fn apply_to(self, bits: u32) -> u32 {
        match self {
            ConversionMode::Native => bits | IME_CMODE_NATIVE,
            ConversionMode::Alphanumeric => bits & !IME_CMODE_NATIVE,
        }
    }

    /// Language code printed by the command line
    pub fn code(self) -> &'static str {
        match self {
            ConversionMode::Native => "zh",
            ConversionMode::Alphanumeric => "en",
        }
    }
}

impl fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ConversionMode {
    type Err = SwitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zh" => Ok(ConversionMode::Native),
            "en" => Ok(ConversionMode::Alphanumeric),
            other => Err(SwitchError::InvalidArgument(format!("Unknown language: {}", other))),
        }
    }
}

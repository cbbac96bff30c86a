//! Four-character codes.
//!
//! Codes are four bytes packed big-endian into a `u32`. Each byte is written
//! as the Latin-1 character with the same value, so `'ID  '` and `'----'`
//! round-trip through their text form.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A four-byte code identifying a type, property, constant, event or key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FourCharCode(u32);

/// Text that is not exactly four single-byte characters.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("'{text}' is not a four-character code")]
pub struct FourCharCodeError {
    pub text: String,
}

impl FourCharCode {
    /// The direct-object key, `'----'`.
    pub const DIRECT_OBJECT: FourCharCode = FourCharCode(u32::from_be_bytes(*b"----"));

    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }

    pub const fn from_u32(value: u32) -> Self {
        Self(value)
    }

    pub const fn as_u32(self) -> u32 {
        self.0
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Parse a run of codes, e.g. the eight characters of a command code.
    pub fn parse_many<const N: usize>(text: &str) -> Result<[FourCharCode; N], FourCharCodeError> {
        let error = || FourCharCodeError { text: text.to_owned() };
        let bytes = latin1_bytes(text).ok_or_else(error)?;
        if bytes.len() != N * 4 {
            return Err(error());
        }
        let mut codes = [FourCharCode(0); N];
        for (code, chunk) in codes.iter_mut().zip(bytes.chunks_exact(4)) {
            *code = FourCharCode::from_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Ok(codes)
    }
}

fn latin1_bytes(text: &str) -> Option<Vec<u8>> {
    text.chars().map(|c| u8::try_from(u32::from(c)).ok()).collect()
}

impl FromStr for FourCharCode {
    type Err = FourCharCodeError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let [code] = FourCharCode::parse_many::<1>(text)?;
        Ok(code)
    }
}

impl fmt::Display for FourCharCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.to_bytes() {
            write!(f, "{}", char::from(byte))?;
        }
        Ok(())
    }
}

/*!
 * Guest Types
 * Architecture selection and guest memory errors
 */

use crate::core::types::Address;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Guest memory access result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Guest memory access errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "error_type", content = "details")]
pub enum MemoryError {
    #[error("Unmapped guest memory: 0x{addr:x} (+{len})")]
    Unmapped { addr: Address, len: usize },

    #[error("Unterminated string at 0x{addr:x}")]
    UnterminatedString { addr: Address },

    #[error("Invalid UTF-8 string at 0x{addr:x}")]
    InvalidString { addr: Address },
}

/// Guest instruction set, which fixes word size and kernel ABI layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arch {
    /// 32-bit ARM, EABI syscall numbering
    Arm32,
    /// 64-bit ARM, asm-generic syscall numbering
    Arm64,
}

impl Arch {
    /// Size of a guest machine word in bytes
    #[inline]
    #[must_use]
    pub const fn word_size(self) -> usize {
        match self {
            Arch::Arm32 => 4,
            Arch::Arm64 => 8,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_64bit(self) -> bool {
        matches!(self, Arch::Arm64)
    }

    /// Truncate a value to the guest word width
    #[inline]
    #[must_use]
    pub const fn truncate(self, value: u64) -> u64 {
        match self {
            Arch::Arm32 => value & 0xFFFF_FFFF,
            Arch::Arm64 => value,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arch::Arm32 => write!(f, "arm32"),
            Arch::Arm64 => write!(f, "arm64"),
        }
    }
}

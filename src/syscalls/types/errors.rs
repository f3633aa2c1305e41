/*!
 * Syscall Error Types
 * Fatal conditions that abort the current call path
 */

use crate::guest::{Arch, MemoryError};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of a syscall handler; `Err` never reaches the guest
pub type SyscallResult<T> = Result<T, SyscallError>;

/// Request patterns the layer does not model
///
/// Guest-visible failures are not errors here: they are a `-1` return plus
/// errno. These abort the dispatch loop instead.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "error_type", content = "details")]
#[non_exhaustive]
pub enum SyscallError {
    /// The guest used a combination of arguments with no emulation
    #[error("Unsupported {syscall}: {detail}")]
    #[diagnostic(
        code(syscall::unsupported),
        help("The guest relies on kernel behaviour this layer does not emulate.")
    )]
    Unsupported { syscall: String, detail: String },

    /// Guest memory could not be accessed
    #[error("Guest memory error: {0}")]
    #[diagnostic(code(syscall::memory))]
    Memory(#[from] MemoryError),

    /// No handler for this number
    #[error("Unknown syscall {nr} for {arch}")]
    #[diagnostic(code(syscall::unknown))]
    UnknownSyscall { nr: u64, arch: Arch },
}

impl SyscallError {
    /// Create an unsupported-operation error
    #[inline]
    pub fn unsupported(syscall: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Unsupported {
            syscall: syscall.into(),
            detail: detail.into(),
        }
    }

    #[inline]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

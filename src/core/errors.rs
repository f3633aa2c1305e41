/*!
 * Error Types
 * Centralized error handling with thiserror and miette
 */

use miette::Diagnostic;
use thiserror::Error;

// Re-export MemoryError from guest module
pub use crate::guest::MemoryError;

// Re-export SyscallError from syscalls module
pub use crate::syscalls::SyscallError;

// Re-export VfsError from vfs module
pub use crate::vfs::VfsError;

/// Unified error type for embedders driving the syscall layer
#[derive(Error, Debug, Diagnostic)]
pub enum KernelError {
    #[error("Syscall error: {0}")]
    #[diagnostic(transparent)]
    Syscall(#[from] SyscallError),

    #[error("Guest memory error: {0}")]
    #[diagnostic(
        code(kernel::guest_memory),
        help("The guest passed an address outside its mapped memory.")
    )]
    Memory(#[from] MemoryError),

    #[error("Filesystem error: {0}")]
    #[diagnostic(code(kernel::vfs))]
    Vfs(#[from] VfsError),

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(kernel::config),
        help("Check the KERNEL_* environment variables.")
    )]
    Config(String),
}

/// Common result type for kernel operations
pub type KernelResult<T> = Result<T, KernelError>;

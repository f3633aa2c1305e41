/*!
 * Syscalls Module
 * Guest kernel system call emulation
 */

mod context;
mod fd;
mod fs;
mod handler;
pub mod numbers;
mod process;
mod scheduler;
mod signal;
pub mod types;

// Re-export public API
pub use context::SyscallContext;
pub use handler::SyscallHandler;
pub use numbers::Sysno;
pub use types::{SyscallError, SyscallResult};

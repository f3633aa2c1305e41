/*!
 * Syscall Types
 */

pub mod errors;

pub use errors::{SyscallError, SyscallResult};

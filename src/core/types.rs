/*!
 * Core Types
 * Common types used across the syscall layer
 */

/// Process ID type
pub type Pid = u32;

/// File descriptor type (guest handle, always non-negative once allocated)
pub type Fd = i32;

/// Guest virtual address
pub type Address = u64;

/// Size type for guest buffers
pub type Size = usize;

/// Signal number as passed by the guest
pub type Signum = i32;

/// Scheduler-assigned task identifier
pub type TaskId = u32;

/// Raw syscall return value as written into the guest return register
pub type SyscallReturn = i64;

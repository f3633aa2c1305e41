/*!
 * System Limits and Constants
 *
 * Centralized location for limits, defaults and kernel ABI numbers shared by
 * the syscall handlers. Linux-compatible values are marked with [LINUX-COMPAT].
 */

// =============================================================================
// FILE DESCRIPTOR LIMITS
// =============================================================================

/// Default maximum number of open descriptors per emulated process
/// [LINUX-COMPAT] Matches the usual RLIMIT_NOFILE soft limit
pub const DEFAULT_MAX_FDS: usize = 1024;

/// Special dirfd value meaning "relative to the current working directory"
/// [LINUX-COMPAT]
pub const AT_FDCWD: i32 = -100;

// =============================================================================
// PIPE / EVENTFD
// =============================================================================

/// Default pipe buffer capacity (64KB)
/// [LINUX-COMPAT] Same as the default Linux pipe size
pub const DEFAULT_PIPE_CAPACITY: usize = 64 * 1024;

/// Open flag: non-blocking I/O [LINUX-COMPAT]
pub const O_NONBLOCK: i32 = 0o4000;

/// Open flag: close on exec [LINUX-COMPAT]
pub const O_CLOEXEC: i32 = 0o2000000;

/// Open flag: read only [LINUX-COMPAT]
pub const O_RDONLY: i32 = 0;

/// eventfd flag: semaphore-like reads [LINUX-COMPAT]
pub const EFD_SEMAPHORE: i32 = 1;

/// eventfd flag: non-blocking, aliases O_NONBLOCK [LINUX-COMPAT]
pub const EFD_NONBLOCK: i32 = O_NONBLOCK;

/// eventfd flag: close on exec, aliases O_CLOEXEC [LINUX-COMPAT]
pub const EFD_CLOEXEC: i32 = O_CLOEXEC;

// =============================================================================
// SCHEDULING
// =============================================================================

/// Normal scheduling policy [LINUX-COMPAT]
pub const SCHED_OTHER: i32 = 0;

/// Priority reported for every thread (Android "normal" priority)
pub const ANDROID_PRIORITY_NORMAL: i32 = 0;

// =============================================================================
// FILESYSTEM STATISTICS
// =============================================================================

/// ext4 superblock magic reported by statfs
pub const EXT4_SUPER_MAGIC: u64 = 0xEF53;

/// Block size reported by statfs
pub const STATFS_BLOCK_SIZE: u64 = 4096;

/// Maximum filename length reported by statfs
pub const STATFS_NAME_MAX: u64 = 255;

/// Total blocks reported by the in-memory filesystem (1GB at 4KB blocks)
pub const STATFS_TOTAL_BLOCKS: u64 = 0x40000;

/// Total inodes reported by the in-memory filesystem
pub const STATFS_TOTAL_FILES: u64 = 0x10000;

// =============================================================================
// I/O
// =============================================================================

/// Largest single read/write transfer; larger requests are short
pub const MAX_RW_CHUNK: usize = 1024 * 1024;

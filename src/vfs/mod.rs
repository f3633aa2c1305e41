/*!
 * Virtual File System Module
 * Filesystem capability used by the path-based syscalls
 */

pub mod memory;
pub mod paths;
pub mod traits;
pub mod types;

// Re-exports
pub use memory::{MemFS, MemFile};
pub use paths::{normalize, proc_view, ProcView};
pub use traits::{FileResult, FileSystem};
pub use types::{FileType, OpenFlags, VfsError, VfsResult};

/*!
 * VFS Traits
 * Filesystem capability consumed by the path-based syscalls
 */

use super::types::OpenFlags;
use crate::core::Errno;
use crate::fd::FileIO;
use std::fmt;

/// Outcome of resolving a path to a file object
pub enum FileResult {
    /// Path resolved; the object is ready to be installed in the fd table
    Found(Box<dyn FileIO>),
    /// Nothing at this path
    NotFound,
    /// Path exists (or could be created) but resolution failed
    Failed(Errno),
}

impl FileResult {
    #[inline]
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, FileResult::Found(_))
    }
}

impl fmt::Debug for FileResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileResult::Found(io) => f.debug_tuple("Found").field(&io.kind()).finish(),
            FileResult::NotFound => f.write_str("NotFound"),
            FileResult::Failed(errno) => f.debug_tuple("Failed").field(errno).finish(),
        }
    }
}

/// Virtual filesystem backend
///
/// The syscall layer only translates these results into return values and
/// errno; path semantics are entirely the backend's business.
pub trait FileSystem: Send + Sync {
    /// Resolve `path` into a file object, honouring `flags` (create, truncate)
    fn resolve(&self, path: &str, flags: OpenFlags) -> FileResult;

    /// Create a directory; `false` when it could not be created
    fn mkdir(&self, path: &str, mode: u32) -> bool;

    /// Rename a file or directory; 0 on success, negative errno otherwise
    fn rename(&self, old_path: &str, new_path: &str) -> i32;

    /// Remove a file or empty directory
    fn unlink(&self, path: &str);

    /// Backend name for diagnostics
    fn name(&self) -> &'static str;
}

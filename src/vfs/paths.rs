/*!
 * Path Helpers
 * Normalization and the synthetic /proc paths served by the syscall layer
 */

use crate::core::types::Pid;
use path_clean::PathClean;
use std::path::{Path, PathBuf};

/// Synthetic directory views recognised before delegating to the filesystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcView {
    /// `/proc/<self|pid>/fd`: one symlink entry per open descriptor
    FdDir,
    /// `/proc/<self|pid>/task`: one entry per live task
    TaskDir,
}

/// Lexically normalize a guest path (resolves `.`/`..`, collapses slashes)
pub fn normalize(path: &str) -> PathBuf {
    let cleaned = Path::new(path).clean();
    if cleaned.is_absolute() {
        cleaned
    } else {
        Path::new("/").join(cleaned).clean()
    }
}

/// Match `/proc/self/fd`, `/proc/<pid>/fd` and the task equivalents
///
/// A trailing slash is accepted on both forms.
pub fn proc_view(path: &str, pid: Pid) -> Option<ProcView> {
    let rest = path.strip_prefix("/proc/")?;
    let rest = rest.strip_suffix('/').unwrap_or(rest);
    let (who, leaf) = rest.split_once('/')?;
    if who != "self" && who.parse::<Pid>().ok() != Some(pid) {
        return None;
    }
    match leaf {
        "fd" => Some(ProcView::FdDir),
        "task" => Some(ProcView::TaskDir),
        _ => None,
    }
}

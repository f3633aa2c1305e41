/*!
 * VFS Error Types
 * Structured filesystem errors and their errno mapping
 */

use crate::core::Errno;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// VFS operation result
pub type VfsResult<T> = Result<T, VfsError>;

/// VFS errors raised by filesystem backends
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "error", content = "details")]
pub enum VfsError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Is a directory: {0}")]
    IsADirectory(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Not supported: {0}")]
    NotSupported(String),
}

impl From<&VfsError> for Errno {
    fn from(err: &VfsError) -> Self {
        match err {
            VfsError::NotFound(_) => Errno::ENOENT,
            VfsError::AlreadyExists(_) => Errno::EEXIST,
            VfsError::PermissionDenied(_) => Errno::EACCES,
            VfsError::NotADirectory(_) => Errno::ENOTDIR,
            VfsError::IsADirectory(_) => Errno::EISDIR,
            VfsError::InvalidPath(_) => Errno::EINVAL,
            VfsError::NotSupported(_) => Errno::ENOSYS,
        }
    }
}

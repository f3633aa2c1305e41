/*!
 * VFS Open Flags
 * Decoded form of the guest's raw O_* open flags
 */

use crate::core::limits::{O_CLOEXEC, O_NONBLOCK};
use serde::{Deserialize, Serialize};

const O_ACCMODE: i32 = 0o3;
const O_WRONLY: i32 = 0o1;
const O_RDWR: i32 = 0o2;
const O_CREAT: i32 = 0o100;
const O_EXCL: i32 = 0o200;
const O_TRUNC: i32 = 0o1000;
const O_APPEND: i32 = 0o2000;
// ARM uses a different O_DIRECTORY bit than x86
const O_DIRECTORY: i32 = 0o40000;

/// Open flags relevant to path resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenFlags {
    pub read: bool,
    pub write: bool,
    pub create: bool,
    pub exclusive: bool,
    pub truncate: bool,
    pub append: bool,
    pub directory: bool,
    pub nonblock: bool,
    pub cloexec: bool,
}

impl OpenFlags {
    /// Read-only flags (O_RDONLY)
    #[inline]
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            read: true,
            ..Default::default()
        }
    }

    /// Decode raw guest flags
    #[must_use]
    pub fn from_raw(raw: i32) -> Self {
        let (read, write) = match raw & O_ACCMODE {
            O_WRONLY => (false, true),
            O_RDWR => (true, true),
            _ => (true, false),
        };
        Self {
            read,
            write,
            create: raw & O_CREAT != 0,
            exclusive: raw & O_EXCL != 0,
            truncate: raw & O_TRUNC != 0,
            append: raw & O_APPEND != 0,
            directory: raw & O_DIRECTORY != 0,
            nonblock: raw & O_NONBLOCK != 0,
            cloexec: raw & O_CLOEXEC != 0,
        }
    }
}

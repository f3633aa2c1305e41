/*!
 * VFS File Type Enum
 * Type of a filesystem object as reported by stat
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// File type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    File,
    Directory,
    Symlink,
    CharDevice,
    Fifo,
    #[default]
    Unknown,
}

impl FileType {
    #[inline]
    #[must_use]
    pub const fn is_dir(self) -> bool {
        matches!(self, FileType::Directory)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            FileType::File => "file",
            FileType::Directory => "directory",
            FileType::Symlink => "symlink",
            FileType::CharDevice => "char device",
            FileType::Fifo => "fifo",
            FileType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

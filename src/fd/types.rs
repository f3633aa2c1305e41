/*!
 * File Descriptor Types
 * Stat results and directory entries shared by file objects
 */

use crate::vfs::FileType;
use serde::{Deserialize, Serialize};

/// Kind of object behind a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Stdio,
    PipeRead,
    PipeWrite,
    EventFd,
    Directory,
    Regular,
}

/// Result of fstat on a file object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStat {
    pub file_type: FileType,
    /// Permission bits only (no S_IFMT)
    pub permissions: u32,
    pub size: u64,
}

impl FileStat {
    const S_IFIFO: u32 = 0o010000;
    const S_IFCHR: u32 = 0o020000;
    const S_IFDIR: u32 = 0o040000;
    const S_IFREG: u32 = 0o100000;
    const S_IFLNK: u32 = 0o120000;

    pub fn new(file_type: FileType, permissions: u32, size: u64) -> Self {
        Self {
            file_type,
            permissions,
            size,
        }
    }

    /// Full `st_mode`: type bits plus permissions
    pub fn mode(&self) -> u32 {
        let type_bits = match self.file_type {
            FileType::File => Self::S_IFREG,
            FileType::Directory => Self::S_IFDIR,
            FileType::Symlink => Self::S_IFLNK,
            FileType::Fifo => Self::S_IFIFO,
            FileType::CharDevice => Self::S_IFCHR,
            _ => 0,
        };
        type_bits | (self.permissions & 0o7777)
    }
}

/// `d_type` values for linux_dirent64 records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DirentType {
    Unknown = 0,
    Dir = 4,
    Reg = 8,
    Lnk = 10,
}

impl From<FileType> for DirentType {
    fn from(file_type: FileType) -> Self {
        match file_type {
            FileType::Directory => DirentType::Dir,
            FileType::File => DirentType::Reg,
            FileType::Symlink => DirentType::Lnk,
            _ => DirentType::Unknown,
        }
    }
}

/// One name in a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub d_type: DirentType,
    pub name: String,
}

impl DirectoryEntry {
    pub fn new(d_type: DirentType, name: impl Into<String>) -> Self {
        Self {
            d_type,
            name: name.into(),
        }
    }
}

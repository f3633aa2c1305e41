/*!
 * Directory File Object
 * Snapshot directory listing enumerated through getdents64
 */

use super::statfs::StatFs;
use super::traits::FileIO;
use super::types::{DirectoryEntry, FileKind, FileStat};
use crate::core::Errno;
use crate::vfs::FileType;
use bytes::{BufMut, BytesMut};

/// Fixed part of a linux_dirent64 record: ino(8) + off(8) + reclen(2) + type(1)
const DIRENT64_HEADER: usize = 19;

/// An open directory whose entries were captured at open time
#[derive(Debug, Clone)]
pub struct DirectoryFile {
    path: String,
    oflags: i32,
    entries: Vec<DirectoryEntry>,
    cursor: usize,
}

impl DirectoryFile {
    pub fn new(oflags: i32, path: impl Into<String>, entries: Vec<DirectoryEntry>) -> Self {
        Self {
            path: path.into(),
            oflags,
            entries,
            cursor: 0,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn oflags(&self) -> i32 {
        self.oflags
    }

    fn record_len(entry: &DirectoryEntry) -> usize {
        (DIRENT64_HEADER + entry.name.len() + 1 + 7) & !7
    }
}

impl FileIO for DirectoryFile {
    fn kind(&self) -> FileKind {
        FileKind::Directory
    }

    fn can_read(&self) -> bool {
        true
    }

    fn fstat(&self) -> FileStat {
        FileStat::new(FileType::Directory, 0o555, 0)
    }

    fn statfs(&self, out: &mut StatFs) -> i32 {
        *out = StatFs::ext4(0);
        0
    }

    fn dir_entries(&self) -> Option<&[DirectoryEntry]> {
        Some(&self.entries)
    }

    fn getdents64(&mut self, capacity: usize) -> Result<Vec<u8>, Errno> {
        let mut buf = BytesMut::with_capacity(capacity);
        while let Some(entry) = self.entries.get(self.cursor) {
            let reclen = Self::record_len(entry);
            if buf.len() + reclen > capacity {
                if buf.is_empty() {
                    return Err(Errno::EINVAL);
                }
                break;
            }
            let position = self.cursor as u64 + 1;
            buf.put_u64_le(position);
            buf.put_i64_le(position as i64);
            buf.put_u16_le(reclen as u16);
            buf.put_u8(entry.d_type as u8);
            buf.put_slice(entry.name.as_bytes());
            buf.put_bytes(0, reclen - DIRENT64_HEADER - entry.name.len());
            self.cursor += 1;
        }
        Ok(buf.to_vec())
    }
}

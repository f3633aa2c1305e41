/*!
 * In-Memory File Handle
 * Regular-file object handed out by MemFS
 */

use super::node::SharedData;
use crate::core::limits::STATFS_BLOCK_SIZE;
use crate::core::Errno;
use crate::fd::{FileIO, FileKind, FileStat, StatFs};
use crate::vfs::types::{FileType, OpenFlags};
use std::path::PathBuf;

/// Open regular file with its own offset
#[derive(Debug)]
pub struct MemFile {
    path: PathBuf,
    data: SharedData,
    mode: u32,
    flags: OpenFlags,
    offset: usize,
}

impl MemFile {
    pub(super) fn new(path: PathBuf, data: SharedData, mode: u32, flags: OpenFlags) -> Self {
        Self {
            path,
            data,
            mode,
            flags,
            offset: 0,
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl FileIO for MemFile {
    fn kind(&self) -> FileKind {
        FileKind::Regular
    }

    fn can_read(&self) -> bool {
        self.flags.read
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Errno> {
        if !self.flags.read {
            return Err(Errno::EBADF);
        }
        let data = self.data.read();
        let start = self.offset.min(data.len());
        let n = buf.len().min(data.len() - start);
        buf[..n].copy_from_slice(&data[start..start + n]);
        self.offset = start + n;
        Ok(n)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<usize, Errno> {
        if !self.flags.write {
            return Err(Errno::EBADF);
        }
        let mut data = self.data.write();
        if self.flags.append {
            self.offset = data.len();
        }
        let end = self.offset + bytes.len();
        if data.len() < end {
            data.resize(end, 0);
        }
        data[self.offset..end].copy_from_slice(bytes);
        self.offset = end;
        Ok(bytes.len())
    }

    fn fstat(&self) -> FileStat {
        FileStat::new(FileType::File, self.mode, self.data.read().len() as u64)
    }

    fn statfs(&self, out: &mut StatFs) -> i32 {
        let used = (self.data.read().len() as u64).div_ceil(STATFS_BLOCK_SIZE);
        *out = StatFs::ext4(used);
        0
    }
}

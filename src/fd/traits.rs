/*!
 * File Object Traits
 * Capability interface implemented by everything a descriptor can refer to
 */

use super::statfs::StatFs;
use super::types::{DirectoryEntry, FileKind, FileStat};
use crate::core::Errno;
use std::fmt;

/// A file-like object installed in the descriptor table
///
/// Variants (pipe ends, eventfd, directory views, regular files) only override
/// the capabilities they actually have; the defaults describe an object that
/// supports none of them.
pub trait FileIO: Send + fmt::Debug {
    /// What kind of object this is
    fn kind(&self) -> FileKind;

    /// Whether a read would return data without blocking
    fn can_read(&self) -> bool {
        false
    }

    /// Read up to `buf.len()` bytes
    fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Errno> {
        Err(Errno::EBADF)
    }

    /// Write `data`, returning the number of bytes accepted
    fn write(&mut self, _data: &[u8]) -> Result<usize, Errno> {
        Err(Errno::EBADF)
    }

    /// File status
    fn fstat(&self) -> FileStat;

    /// Fill filesystem statistics; nonzero return is passed to the guest as-is
    fn statfs(&self, _out: &mut StatFs) -> i32 {
        -1
    }

    /// Entries of a directory object, `None` for everything else
    fn dir_entries(&self) -> Option<&[DirectoryEntry]> {
        None
    }

    /// Produce the next linux_dirent64 records fitting in `capacity` bytes
    fn getdents64(&mut self, _capacity: usize) -> Result<Vec<u8>, Errno> {
        Err(Errno::ENOTDIR)
    }

    /// Release resources; called once when the descriptor is closed
    fn close(&mut self) {}
}

/*!
 * File Descriptor Table
 * Lowest-free-first descriptor allocation over boxed file objects
 */

use super::traits::FileIO;
use crate::core::types::Fd;
use crate::core::Errno;
use std::collections::BTreeMap;
use tracing::debug;

/// Per-process descriptor table
#[derive(Debug)]
pub struct FdTable {
    files: BTreeMap<Fd, Box<dyn FileIO>>,
    max_fds: usize,
}

impl FdTable {
    pub fn new(max_fds: usize) -> Self {
        Self {
            files: BTreeMap::new(),
            max_fds,
        }
    }

    /// Lowest descriptor not currently in use
    ///
    /// Does not reserve it; callers install right after allocating.
    pub fn min_fd(&self) -> Result<Fd, Errno> {
        // BTreeMap keys are sorted, so the first gap is the answer
        let mut candidate: Fd = 0;
        for fd in self.files.keys() {
            if *fd != candidate {
                break;
            }
            candidate += 1;
        }
        if candidate as usize >= self.max_fds {
            return Err(Errno::EMFILE);
        }
        Ok(candidate)
    }

    /// Install `file` at `fd`, returning whatever was there before
    pub fn install(&mut self, fd: Fd, file: Box<dyn FileIO>) -> Option<Box<dyn FileIO>> {
        debug!(fd, kind = ?file.kind(), "Installing file object");
        self.files.insert(fd, file)
    }

    /// Allocate the lowest free descriptor and install `file` there
    pub fn insert(&mut self, file: Box<dyn FileIO>) -> Result<Fd, Errno> {
        let fd = self.min_fd()?;
        self.install(fd, file);
        Ok(fd)
    }

    pub fn get(&self, fd: Fd) -> Option<&dyn FileIO> {
        self.files.get(&fd).map(|file| file.as_ref())
    }

    pub fn get_mut(&mut self, fd: Fd) -> Option<&mut (dyn FileIO + 'static)> {
        self.files.get_mut(&fd).map(|file| file.as_mut())
    }

    pub fn contains(&self, fd: Fd) -> bool {
        self.files.contains_key(&fd)
    }

    /// Remove and close the object at `fd`
    pub fn close(&mut self, fd: Fd) -> Result<(), Errno> {
        let mut file = self.files.remove(&fd).ok_or(Errno::EBADF)?;
        file.close();
        debug!(fd, kind = ?file.kind(), "Closed file descriptor");
        Ok(())
    }

    /// Open descriptors in ascending order
    pub fn fds(&self) -> impl Iterator<Item = Fd> + '_ {
        self.files.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn max_fds(&self) -> usize {
        self.max_fds
    }
}

impl Drop for FdTable {
    fn drop(&mut self) {
        for file in self.files.values_mut() {
            file.close();
        }
    }
}

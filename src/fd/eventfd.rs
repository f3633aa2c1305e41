/*!
 * eventfd Object
 * 64-bit counter with optional semaphore semantics
 */

use super::traits::FileIO;
use super::types::{FileKind, FileStat};
use crate::core::Errno;
use crate::vfs::FileType;

const COUNTER_SIZE: usize = 8;

/// Counter-style I/O object created by eventfd2
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFd {
    counter: u64,
    semaphore: bool,
    nonblock: bool,
}

impl EventFd {
    pub fn new(initval: u32, semaphore: bool, nonblock: bool) -> Self {
        Self {
            counter: u64::from(initval),
            semaphore,
            nonblock,
        }
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn is_semaphore(&self) -> bool {
        self.semaphore
    }

    pub fn is_nonblocking(&self) -> bool {
        self.nonblock
    }
}

impl FileIO for EventFd {
    fn kind(&self) -> FileKind {
        FileKind::EventFd
    }

    fn can_read(&self) -> bool {
        self.counter > 0
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Errno> {
        if buf.len() < COUNTER_SIZE {
            return Err(Errno::EINVAL);
        }
        // Reads never block: a zero counter is EAGAIN in either mode
        if self.counter == 0 {
            return Err(Errno::EAGAIN);
        }
        let value = if self.semaphore {
            self.counter -= 1;
            1
        } else {
            std::mem::take(&mut self.counter)
        };
        buf[..COUNTER_SIZE].copy_from_slice(&value.to_le_bytes());
        Ok(COUNTER_SIZE)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Errno> {
        if data.len() < COUNTER_SIZE {
            return Err(Errno::EINVAL);
        }
        let mut raw = [0u8; COUNTER_SIZE];
        raw.copy_from_slice(&data[..COUNTER_SIZE]);
        let value = u64::from_le_bytes(raw);
        if value == u64::MAX {
            return Err(Errno::EINVAL);
        }
        match self.counter.checked_add(value) {
            Some(sum) if sum < u64::MAX => {
                self.counter = sum;
                Ok(COUNTER_SIZE)
            }
            _ => Err(Errno::EAGAIN),
        }
    }

    fn fstat(&self) -> FileStat {
        FileStat::new(FileType::Unknown, 0o600, 0)
    }
}

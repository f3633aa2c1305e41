/*!
 * Standard Streams
 * Descriptors 0-2 as seen by the guest
 */

use super::traits::FileIO;
use super::types::{FileKind, FileStat};
use crate::core::Errno;
use crate::vfs::FileType;
use std::io::Write;

/// Which standard stream a descriptor maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdStream {
    Stdin,
    Stdout,
    Stderr,
}

/// Host-backed standard stream; stdin never has data
#[derive(Debug, Clone)]
pub struct Stdio {
    stream: StdStream,
}

impl Stdio {
    pub fn new(stream: StdStream) -> Self {
        Self { stream }
    }

    pub fn stream(&self) -> StdStream {
        self.stream
    }
}

impl FileIO for Stdio {
    fn kind(&self) -> FileKind {
        FileKind::Stdio
    }

    fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Errno> {
        match self.stream {
            StdStream::Stdin => Ok(0),
            _ => Err(Errno::EBADF),
        }
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Errno> {
        let result = match self.stream {
            StdStream::Stdin => return Err(Errno::EBADF),
            StdStream::Stdout => std::io::stdout().write_all(data),
            StdStream::Stderr => std::io::stderr().write_all(data),
        };
        result.map(|()| data.len()).map_err(|_| Errno::EPIPE)
    }

    fn fstat(&self) -> FileStat {
        FileStat::new(FileType::CharDevice, 0o620, 0)
    }
}

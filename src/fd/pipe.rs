/*!
 * Pipe Implementation
 * In-process byte pipe with ringbuf-based circular buffer
 */

use super::traits::FileIO;
use super::types::{FileKind, FileStat};
use crate::core::Errno;
use crate::vfs::FileType;
use parking_lot::Mutex;
use ringbuf::{traits::*, HeapRb};
use std::fmt;
use std::sync::Arc;

struct PipeBuffer {
    ring: HeapRb<u8>,
    capacity: usize,
    reader_open: bool,
    writer_open: bool,
}

type SharedPipe = Arc<Mutex<PipeBuffer>>;

/// Create a connected (write end, read end) pair
///
/// A zero capacity is raised to one byte.
pub fn pipe_pair(capacity: usize) -> (PipeWriter, PipeReader) {
    let capacity = capacity.max(1);
    let shared = Arc::new(Mutex::new(PipeBuffer {
        ring: HeapRb::<u8>::new(capacity),
        capacity,
        reader_open: true,
        writer_open: true,
    }));
    (
        PipeWriter {
            shared: shared.clone(),
        },
        PipeReader { shared },
    )
}

/// Read end of a pipe
pub struct PipeReader {
    shared: SharedPipe,
}

/// Write end of a pipe
pub struct PipeWriter {
    shared: SharedPipe,
}

impl PipeReader {
    /// Bytes waiting to be read
    pub fn buffered(&self) -> usize {
        self.shared.lock().ring.occupied_len()
    }
}

impl PipeWriter {
    /// Free space left in the buffer
    pub fn available_space(&self) -> usize {
        self.shared.lock().ring.vacant_len()
    }
}

impl fmt::Debug for PipeReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pipe = self.shared.lock();
        f.debug_struct("PipeReader")
            .field("buffered_bytes", &pipe.ring.occupied_len())
            .field("capacity", &pipe.capacity)
            .field("writer_open", &pipe.writer_open)
            .finish()
    }
}

impl fmt::Debug for PipeWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pipe = self.shared.lock();
        f.debug_struct("PipeWriter")
            .field("buffered_bytes", &pipe.ring.occupied_len())
            .field("capacity", &pipe.capacity)
            .field("reader_open", &pipe.reader_open)
            .finish()
    }
}

impl FileIO for PipeReader {
    fn kind(&self) -> FileKind {
        FileKind::PipeRead
    }

    fn can_read(&self) -> bool {
        !self.shared.lock().ring.is_empty()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Errno> {
        let mut pipe = self.shared.lock();
        if pipe.ring.is_empty() {
            if !pipe.writer_open {
                return Ok(0); // EOF
            }
            return Err(Errno::EAGAIN);
        }
        Ok(pipe.ring.pop_slice(buf))
    }

    fn fstat(&self) -> FileStat {
        let pipe = self.shared.lock();
        FileStat::new(FileType::Fifo, 0o600, pipe.ring.occupied_len() as u64)
    }

    fn close(&mut self) {
        self.shared.lock().reader_open = false;
    }
}

impl FileIO for PipeWriter {
    fn kind(&self) -> FileKind {
        FileKind::PipeWrite
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Errno> {
        let mut pipe = self.shared.lock();
        if !pipe.reader_open {
            return Err(Errno::EPIPE);
        }
        if pipe.ring.vacant_len() == 0 {
            return Err(Errno::EAGAIN);
        }
        Ok(pipe.ring.push_slice(data))
    }

    fn fstat(&self) -> FileStat {
        let pipe = self.shared.lock();
        FileStat::new(FileType::Fifo, 0o600, pipe.ring.occupied_len() as u64)
    }

    fn close(&mut self) {
        self.shared.lock().writer_open = false;
    }
}

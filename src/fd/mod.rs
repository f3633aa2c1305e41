/*!
 * File Descriptor Module
 * Descriptor table and the file objects it can hold
 */

pub mod directory;
pub mod eventfd;
pub mod pipe;
pub mod statfs;
pub mod stdio;
mod table;
pub mod traits;
pub mod types;

// Re-export public API
pub use directory::DirectoryFile;
pub use eventfd::EventFd;
pub use pipe::{pipe_pair, PipeReader, PipeWriter};
pub use statfs::StatFs;
pub use stdio::{StdStream, Stdio};
pub use table::FdTable;
pub use traits::FileIO;
pub use types::{DirectoryEntry, DirentType, FileKind, FileStat};

/*!
 * VFS Types
 * Shared types for filesystem operations
 */

mod errors;
mod file_type;
mod open_flags;

pub use errors::{VfsError, VfsResult};
pub use file_type::FileType;
pub use open_flags::OpenFlags;

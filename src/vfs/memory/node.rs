/*!
 * Filesystem Node Types
 * Internal representation of files and directories
 */

use parking_lot::RwLock;
use std::collections::BTreeSet;
use std::sync::Arc;

use super::super::types::FileType;

/// File contents shared between the tree and every open handle
pub(in crate::vfs) type SharedData = Arc<RwLock<Vec<u8>>>;

/// In-memory filesystem node
#[derive(Debug, Clone)]
pub(in crate::vfs) enum Node {
    File { data: SharedData, mode: u32 },
    Directory { children: BTreeSet<String>, mode: u32 },
}

impl Node {
    pub fn empty_file(mode: u32) -> Self {
        Node::File {
            data: Arc::new(RwLock::new(Vec::new())),
            mode,
        }
    }

    pub fn empty_dir(mode: u32) -> Self {
        Node::Directory {
            children: BTreeSet::new(),
            mode,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Directory { .. })
    }

    pub fn file_type(&self) -> FileType {
        match self {
            Node::File { .. } => FileType::File,
            Node::Directory { .. } => FileType::Directory,
        }
    }
}

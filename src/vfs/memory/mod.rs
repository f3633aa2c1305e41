/*!
 * In-Memory Filesystem Backend
 * Volatile filesystem for tests and for guests that need a scratch root
 */

mod file;
mod node;

use ahash::RandomState;
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use super::paths::normalize;
use super::traits::{FileResult, FileSystem};
use super::types::*;
use crate::core::Errno;
use crate::fd::{DirectoryEntry, DirectoryFile, DirentType};
pub use file::MemFile;
use node::Node;

const DEFAULT_DIR_MODE: u32 = 0o755;
const DEFAULT_FILE_MODE: u32 = 0o644;

/// In-memory filesystem implementation
#[derive(Debug, Clone)]
pub struct MemFS {
    nodes: Arc<DashMap<PathBuf, Node, RandomState>>,
}

impl MemFS {
    /// Create a filesystem containing only `/`
    pub fn new() -> Self {
        let nodes = DashMap::with_hasher(RandomState::new());
        nodes.insert(PathBuf::from("/"), Node::empty_dir(DEFAULT_DIR_MODE));
        Self {
            nodes: Arc::new(nodes),
        }
    }

    /// Create directories along `path`, like `mkdir -p`
    pub fn create_dir_all(&self, path: &str) -> VfsResult<()> {
        let path = normalize(path);
        let mut current = PathBuf::from("/");
        for component in path.components().skip(1) {
            current.push(component);
            match self.nodes.get(&current).map(|node| node.is_dir()) {
                Some(true) => continue,
                Some(false) => return Err(VfsError::NotADirectory(display(&current))),
                None => self.insert_child(&current, Node::empty_dir(DEFAULT_DIR_MODE))?,
            }
        }
        Ok(())
    }

    /// Create or replace a regular file with `contents`
    pub fn write_file(&self, path: &str, contents: &[u8]) -> VfsResult<()> {
        let path = normalize(path);
        let existing = self.nodes.get(&path).map(|node| node.clone());
        match existing {
            Some(Node::File { data, .. }) => {
                *data.write() = contents.to_vec();
                Ok(())
            }
            Some(Node::Directory { .. }) => Err(VfsError::IsADirectory(display(&path))),
            None => {
                let node = Node::empty_file(DEFAULT_FILE_MODE);
                if let Node::File { data, .. } = &node {
                    *data.write() = contents.to_vec();
                }
                self.insert_child(&path, node)
            }
        }
    }

    /// Read a whole regular file
    pub fn read_file(&self, path: &str) -> VfsResult<Vec<u8>> {
        let path = normalize(path);
        match self.nodes.get(&path).map(|node| node.clone()) {
            Some(Node::File { data, .. }) => Ok(data.read().clone()),
            Some(Node::Directory { .. }) => Err(VfsError::IsADirectory(display(&path))),
            None => Err(VfsError::NotFound(display(&path))),
        }
    }

    pub fn exists(&self, path: &str) -> bool {
        self.nodes.contains_key(&normalize(path))
    }

    pub fn is_dir(&self, path: &str) -> bool {
        self.nodes
            .get(&normalize(path))
            .is_some_and(|node| node.is_dir())
    }

    /// Insert `node` at `path` and link it into its parent directory
    fn insert_child(&self, path: &Path, node: Node) -> VfsResult<()> {
        let (parent, name) = split(path)?;
        match self.nodes.get_mut(&parent) {
            Some(mut entry) => match entry.value_mut() {
                Node::Directory { children, .. } => {
                    children.insert(name);
                }
                Node::File { .. } => return Err(VfsError::NotADirectory(display(&parent))),
            },
            None => return Err(VfsError::NotFound(display(&parent))),
        }
        self.nodes.insert(path.to_path_buf(), node);
        Ok(())
    }

    fn unlink_child(&self, path: &Path) {
        if let Ok((parent, name)) = split(path) {
            if let Some(mut entry) = self.nodes.get_mut(&parent) {
                if let Node::Directory { children, .. } = entry.value_mut() {
                    children.remove(&name);
                }
            }
        }
    }

    fn mkdir_impl(&self, path: &Path, mode: u32) -> VfsResult<()> {
        if self.nodes.contains_key(path) {
            return Err(VfsError::AlreadyExists(display(path)));
        }
        self.insert_child(path, Node::empty_dir(mode & 0o7777))
    }

    fn rename_impl(&self, from: &Path, to: &Path) -> VfsResult<()> {
        if from == to {
            return Ok(());
        }
        if !self.nodes.contains_key(from) {
            return Err(VfsError::NotFound(display(from)));
        }
        if to.starts_with(from) {
            return Err(VfsError::InvalidPath(display(to)));
        }
        let (to_parent, _) = split(to)?;
        if !self.nodes.get(&to_parent).is_some_and(|node| node.is_dir()) {
            return Err(VfsError::NotFound(display(&to_parent)));
        }
        let target_dir = self.nodes.get(to).map(|node| node.is_dir());
        let source_dir = self.nodes.get(from).is_some_and(|node| node.is_dir());
        match target_dir {
            Some(true) if !source_dir => return Err(VfsError::IsADirectory(display(to))),
            Some(false) if source_dir => return Err(VfsError::NotADirectory(display(to))),
            Some(_) => self.remove_impl(to)?,
            None => {}
        }

        // Move the subtree: the node itself plus every descendant
        let moved: Vec<PathBuf> = self
            .nodes
            .iter()
            .filter(|entry| entry.key().starts_with(from))
            .map(|entry| entry.key().clone())
            .collect();
        let (_, root) = self
            .nodes
            .remove(from)
            .ok_or_else(|| VfsError::NotFound(display(from)))?;
        self.unlink_child(from);
        self.insert_child(to, root)?;
        for old in moved.into_iter().filter(|p| p != from) {
            if let (Some((_, node)), Ok(suffix)) = (self.nodes.remove(&old), old.strip_prefix(from)) {
                self.nodes.insert(to.join(suffix), node);
            }
        }
        Ok(())
    }

    fn remove_impl(&self, path: &Path) -> VfsResult<()> {
        if path == Path::new("/") {
            return Err(VfsError::PermissionDenied("/".into()));
        }
        let node = self
            .nodes
            .get(path)
            .map(|node| node.clone())
            .ok_or_else(|| VfsError::NotFound(display(path)))?;
        if let Node::Directory { children, .. } = &node {
            if !children.is_empty() {
                return Err(VfsError::InvalidPath(format!("directory not empty: {}", display(path))));
            }
        }
        self.nodes.remove(path);
        self.unlink_child(path);
        Ok(())
    }

    fn open_directory(&self, path: &Path, children: &std::collections::BTreeSet<String>) -> DirectoryFile {
        let mut entries = vec![
            DirectoryEntry::new(DirentType::Dir, "."),
            DirectoryEntry::new(DirentType::Dir, ".."),
        ];
        for name in children {
            let d_type = self
                .nodes
                .get(&path.join(name))
                .map(|node| DirentType::from(node.file_type()))
                .unwrap_or(DirentType::Unknown);
            entries.push(DirectoryEntry::new(d_type, name.clone()));
        }
        DirectoryFile::new(0, display(path), entries)
    }
}

impl Default for MemFS {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MemFS {
    fn resolve(&self, path: &str, flags: OpenFlags) -> FileResult {
        let normalized = normalize(path);
        let existing = self.nodes.get(&normalized).map(|node| node.clone());
        match existing {
            Some(_) if flags.create && flags.exclusive => FileResult::Failed(Errno::EEXIST),
            Some(Node::Directory { children, .. }) => {
                if flags.write {
                    return FileResult::Failed(Errno::EISDIR);
                }
                FileResult::Found(Box::new(self.open_directory(&normalized, &children)))
            }
            Some(Node::File { data, mode }) => {
                if flags.directory {
                    return FileResult::Failed(Errno::ENOTDIR);
                }
                if flags.truncate && flags.write {
                    data.write().clear();
                }
                FileResult::Found(Box::new(MemFile::new(normalized, data, mode, flags)))
            }
            None if flags.create => {
                let node = Node::empty_file(DEFAULT_FILE_MODE);
                let Node::File { data, mode } = node.clone() else {
                    return FileResult::Failed(Errno::EINVAL);
                };
                match self.insert_child(&normalized, node) {
                    Ok(()) => {
                        debug!(path = %normalized.display(), "Created file");
                        FileResult::Found(Box::new(MemFile::new(normalized, data, mode, flags)))
                    }
                    Err(err) => FileResult::Failed(Errno::from(&err)),
                }
            }
            None => FileResult::NotFound,
        }
    }

    fn mkdir(&self, path: &str, mode: u32) -> bool {
        match self.mkdir_impl(&normalize(path), mode) {
            Ok(()) => true,
            Err(err) => {
                debug!(path, error = %err, "mkdir failed");
                false
            }
        }
    }

    fn rename(&self, old_path: &str, new_path: &str) -> i32 {
        match self.rename_impl(&normalize(old_path), &normalize(new_path)) {
            Ok(()) => 0,
            Err(err) => {
                debug!(old_path, new_path, error = %err, "rename failed");
                -Errno::from(&err).code()
            }
        }
    }

    fn unlink(&self, path: &str) {
        if let Err(err) = self.remove_impl(&normalize(path)) {
            debug!(path, error = %err, "unlink failed");
        }
    }

    fn name(&self) -> &'static str {
        "memfs"
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

fn split(path: &Path) -> VfsResult<(PathBuf, String)> {
    let parent = path
        .parent()
        .ok_or_else(|| VfsError::InvalidPath(display(path)))?
        .to_path_buf();
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| VfsError::InvalidPath(display(path)))?
        .to_string();
    Ok((parent, name))
}

//! In-memory tree storage for unit testing.
//!
//! Records every mutating operation and supports failure injection.
//!
//! # Example
//!
//! ```rust
//! use std::path::Path;
//! use xcm::storage::TreeStorage;
//! use xcm::storage::mock::{MemoryStorage, Operation};
//!
//! let mem = MemoryStorage::new();
//! mem.add_file("/home/ana/.config/xfce4/panel.xml", b"<panel/>");
//! mem.copy_tree(Path::new("/home/ana/.config/xfce4"), Path::new("/repo/backups/b1")).unwrap();
//!
//! assert_eq!(mem.read_file("/repo/backups/b1/panel.xml").unwrap(), b"<panel/>");
//! assert_eq!(mem.operations().len(), 1);
//! ```

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::trace;

use super::TreeStorage;
use crate::error::{Result, XcmError};

/// Recorded mutating operation for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Copy { src: PathBuf, dst: PathBuf },
    Delete { path: PathBuf },
    CreateDir { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Dir { mtime: u64 },
    File { data: Vec<u8>, mtime: u64 },
}

impl Node {
    const fn mtime(&self) -> u64 {
        match self {
            Self::Dir { mtime } | Self::File { mtime, .. } => *mtime,
        }
    }
}

/// Kind of operation a failure is injected into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Copy,
    Delete,
    List,
}

/// In-memory storage with a logical clock.
///
/// Every created node gets a strictly increasing modification time, so
/// trees created later always sort after trees created earlier.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    nodes: Mutex<BTreeMap<PathBuf, Node>>,
    clock: AtomicU64,
    operation_log: Mutex<Vec<Operation>>,
    failures: Mutex<Vec<(FailOn, PathBuf)>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn nodes(&self) -> std::sync::MutexGuard<'_, BTreeMap<PathBuf, Node>> {
        self.nodes.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn ensure_dirs(&self, nodes: &mut BTreeMap<PathBuf, Node>, path: &Path) {
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() || nodes.contains_key(ancestor) {
                continue;
            }
            let mtime = self.tick();
            nodes.insert(ancestor.to_path_buf(), Node::Dir { mtime });
        }
    }

    /// Add a file (and its parent directories).
    pub fn add_file(&self, path: impl AsRef<Path>, data: &[u8]) {
        let path = path.as_ref();
        let mut nodes = self.nodes();
        if let Some(parent) = path.parent() {
            self.ensure_dirs(&mut nodes, parent);
        }
        let mtime = self.tick();
        nodes.insert(
            path.to_path_buf(),
            Node::File {
                data: data.to_vec(),
                mtime,
            },
        );
    }

    /// Add an empty directory (and its parents).
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut nodes = self.nodes();
        self.ensure_dirs(&mut nodes, path.as_ref());
    }

    /// Read back a file's contents.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        match self.nodes().get(path.as_ref()) {
            Some(Node::File { data, .. }) => Some(data.clone()),
            _ => None,
        }
    }

    /// Files below `root`, keyed by path relative to `root`.
    pub fn tree(&self, root: impl AsRef<Path>) -> BTreeMap<PathBuf, Vec<u8>> {
        let root = root.as_ref();
        self.nodes()
            .iter()
            .filter_map(|(path, node)| match node {
                Node::File { data, .. } => path
                    .strip_prefix(root)
                    .ok()
                    .map(|rel| (rel.to_path_buf(), data.clone())),
                Node::Dir { .. } => None,
            })
            .collect()
    }

    /// Make the next operation of `kind` touching `path` fail.
    pub fn fail_on(&self, kind: FailOn, path: impl Into<PathBuf>) {
        self.failures
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push((kind, path.into()));
    }

    fn take_failure(&self, kind: FailOn, path: &Path) -> Option<io::Error> {
        let mut failures = self
            .failures
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let idx = failures
            .iter()
            .position(|(k, p)| *k == kind && p.as_path() == path)?;
        failures.remove(idx);
        Some(io::Error::other("injected failure"))
    }

    fn record(&self, op: Operation) {
        trace!(?op, "MemoryStorage operation");
        self.operation_log
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(op);
    }

    /// All mutating operations performed so far.
    pub fn operations(&self) -> Vec<Operation> {
        self.operation_log
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub fn clear_operations(&self) {
        self.operation_log
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clear();
    }

    /// Assert the exact sequence of recorded operations.
    #[track_caller]
    pub fn assert_operations(&self, expected: &[Operation]) {
        assert_eq!(self.operations(), expected, "operation log mismatch");
    }
}

impl TreeStorage for MemoryStorage {
    fn exists(&self, path: &Path) -> bool {
        self.nodes().contains_key(path)
    }

    fn size(&self, path: &Path) -> Result<u64> {
        let nodes = self.nodes();
        if !nodes.contains_key(path) {
            return Err(XcmError::storage(
                "inspect",
                path,
                io::Error::from(io::ErrorKind::NotFound),
            ));
        }
        Ok(nodes
            .iter()
            .filter(|(p, _)| p.starts_with(path))
            .map(|(_, node)| match node {
                Node::File { data, .. } => data.len() as u64,
                Node::Dir { .. } => 0,
            })
            .sum())
    }

    fn copy_tree(&self, src: &Path, dst: &Path) -> Result<()> {
        if let Some(err) = self.take_failure(FailOn::Copy, src) {
            return Err(XcmError::storage("copy", src, err));
        }

        let mut nodes = self.nodes();
        if !matches!(nodes.get(src), Some(Node::Dir { .. })) {
            return Err(XcmError::storage(
                "copy",
                src,
                io::Error::new(io::ErrorKind::NotFound, "source directory missing"),
            ));
        }
        if nodes.contains_key(dst) {
            return Err(XcmError::storage(
                "copy into",
                dst,
                io::Error::from(io::ErrorKind::AlreadyExists),
            ));
        }
        if let Some(parent) = dst.parent() {
            self.ensure_dirs(&mut nodes, parent);
        }

        let copied: Vec<(PathBuf, Node)> = nodes
            .iter()
            .filter_map(|(path, node)| {
                let rel = path.strip_prefix(src).ok()?;
                Some((dst.join(rel), node.clone()))
            })
            .collect();
        for (path, node) in copied {
            let mtime = self.tick();
            let node = match node {
                Node::Dir { .. } => Node::Dir { mtime },
                Node::File { data, .. } => Node::File { data, mtime },
            };
            nodes.insert(path, node);
        }
        // The root directory is stamped last, like a real directory whose
        // mtime moves as entries are written into it.
        let mtime = self.tick();
        nodes.insert(dst.to_path_buf(), Node::Dir { mtime });
        drop(nodes);

        self.record(Operation::Copy {
            src: src.to_path_buf(),
            dst: dst.to_path_buf(),
        });
        Ok(())
    }

    fn delete_tree(&self, path: &Path) -> Result<()> {
        if let Some(err) = self.take_failure(FailOn::Delete, path) {
            return Err(XcmError::storage("delete", path, err));
        }

        let mut nodes = self.nodes();
        if !nodes.contains_key(path) {
            return Err(XcmError::storage(
                "delete",
                path,
                io::Error::from(io::ErrorKind::NotFound),
            ));
        }
        nodes.retain(|p, _| !p.starts_with(path));
        drop(nodes);

        self.record(Operation::Delete {
            path: path.to_path_buf(),
        });
        Ok(())
    }

    fn list_children(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if let Some(err) = self.take_failure(FailOn::List, path) {
            return Err(XcmError::storage("read", path, err));
        }
        Ok(self
            .nodes()
            .iter()
            .filter(|(p, node)| matches!(node, Node::Dir { .. }) && p.parent() == Some(path))
            .map(|(p, _)| p.clone())
            .collect())
    }

    fn modified_time(&self, path: &Path) -> Result<SystemTime> {
        self.nodes()
            .get(path)
            .map(|node| UNIX_EPOCH + Duration::from_secs(node.mtime()))
            .ok_or_else(|| {
                XcmError::storage("inspect", path, io::Error::from(io::ErrorKind::NotFound))
            })
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let mut nodes = self.nodes();
        if matches!(nodes.get(path), Some(Node::Dir { .. })) {
            return Ok(());
        }
        self.ensure_dirs(&mut nodes, path);
        drop(nodes);

        self.record(Operation::CreateDir {
            path: path.to_path_buf(),
        });
        Ok(())
    }
}

//! Directory-tree storage abstraction.
//!
//! The snapshot store treats every configuration tree as an opaque blob
//! that is copied or deleted as a whole. This trait abstracts over the real
//! filesystem and an in-memory implementation, so store logic can be
//! tested without touching the user's home directory.

mod fs;
pub mod mock;

pub use fs::FsStorage;

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::Result;

/// Whole-tree storage operations.
///
/// # Implementation Notes
///
/// - `copy_tree` requires that `dst` does not exist; missing parents are created
/// - `delete_tree` removes the path and everything below it
/// - `list_children` returns only directories, in no particular order
pub trait TreeStorage {
    /// Check whether a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Total size in bytes of all files below `path`.
    fn size(&self, path: &Path) -> Result<u64>;

    /// Recursively copy the tree at `src` to `dst`.
    fn copy_tree(&self, src: &Path, dst: &Path) -> Result<()>;

    /// Recursively delete the tree at `path`.
    fn delete_tree(&self, path: &Path) -> Result<()>;

    /// Immediate child directories of `path`. A missing `path` yields an
    /// empty list.
    fn list_children(&self, path: &Path) -> Result<Vec<PathBuf>>;

    /// Modification time of `path`.
    fn modified_time(&self, path: &Path) -> Result<SystemTime>;

    /// Create a directory and its parents.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Delete `path` if present, then copy `src` into it.
    ///
    /// The two steps are not atomic: a failure of the copy leaves `dst`
    /// absent.
    fn replace_tree(&self, src: &Path, dst: &Path) -> Result<()> {
        if self.exists(dst) {
            self.delete_tree(dst)?;
        }
        self.copy_tree(src, dst)
    }
}

impl<T: TreeStorage + ?Sized> TreeStorage for &T {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn size(&self, path: &Path) -> Result<u64> {
        (**self).size(path)
    }

    fn copy_tree(&self, src: &Path, dst: &Path) -> Result<()> {
        (**self).copy_tree(src, dst)
    }

    fn delete_tree(&self, path: &Path) -> Result<()> {
        (**self).delete_tree(path)
    }

    fn list_children(&self, path: &Path) -> Result<Vec<PathBuf>> {
        (**self).list_children(path)
    }

    fn modified_time(&self, path: &Path) -> Result<SystemTime> {
        (**self).modified_time(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        (**self).create_dir_all(path)
    }
}

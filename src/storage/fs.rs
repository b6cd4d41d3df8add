//! Real filesystem implementation of [`TreeStorage`].

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, instrument, trace};

use super::TreeStorage;
use crate::error::{Result, XcmError};

/// Tree storage backed by `std::fs`.
///
/// Symbolic links inside a tree are recreated as links rather than followed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

impl FsStorage {
    pub const fn new() -> Self {
        Self
    }
}

fn copy_recursive(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir(dst).map_err(|e| XcmError::storage("create", dst, e))?;

    let entries = fs::read_dir(src).map_err(|e| XcmError::storage("read", src, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| XcmError::storage("read", src, e))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        let file_type = entry
            .file_type()
            .map_err(|e| XcmError::storage("inspect", &from, e))?;

        if file_type.is_dir() {
            copy_recursive(&from, &to)?;
        } else if file_type.is_symlink() {
            copy_symlink(&from, &to)?;
        } else {
            trace!(from = %from.display(), to = %to.display(), "Copying file");
            fs::copy(&from, &to).map_err(|e| XcmError::storage("copy", &from, e))?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(from: &Path, to: &Path) -> Result<()> {
    let target = fs::read_link(from).map_err(|e| XcmError::storage("read link", from, e))?;
    std::os::unix::fs::symlink(&target, to).map_err(|e| XcmError::storage("link", to, e))
}

#[cfg(not(unix))]
fn copy_symlink(from: &Path, to: &Path) -> Result<()> {
    fs::copy(from, to)
        .map(|_| ())
        .map_err(|e| XcmError::storage("copy", from, e))
}

fn size_recursive(path: &Path) -> Result<u64> {
    let meta = fs::symlink_metadata(path).map_err(|e| XcmError::storage("inspect", path, e))?;
    if !meta.is_dir() {
        return Ok(if meta.is_file() { meta.len() } else { 0 });
    }

    let mut total = 0;
    let entries = fs::read_dir(path).map_err(|e| XcmError::storage("read", path, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| XcmError::storage("read", path, e))?;
        total += size_recursive(&entry.path())?;
    }
    Ok(total)
}

impl TreeStorage for FsStorage {
    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn size(&self, path: &Path) -> Result<u64> {
        size_recursive(path)
    }

    #[instrument(skip(self), fields(src = %src.display(), dst = %dst.display()))]
    fn copy_tree(&self, src: &Path, dst: &Path) -> Result<()> {
        if !src.is_dir() {
            return Err(XcmError::storage(
                "copy",
                src,
                std::io::Error::new(std::io::ErrorKind::NotFound, "source directory missing"),
            ));
        }
        if self.exists(dst) {
            return Err(XcmError::storage(
                "copy into",
                dst,
                std::io::Error::new(std::io::ErrorKind::AlreadyExists, "destination exists"),
            ));
        }
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent).map_err(|e| XcmError::storage("create", parent, e))?;
        }

        copy_recursive(src, dst)?;
        debug!("Tree copied");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %path.display()))]
    fn delete_tree(&self, path: &Path) -> Result<()> {
        let meta = fs::symlink_metadata(path).map_err(|e| XcmError::storage("delete", path, e))?;
        let res = if meta.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };
        res.map_err(|e| XcmError::storage("delete", path, e))?;
        debug!("Tree deleted");
        Ok(())
    }

    fn list_children(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut dirs = Vec::new();
        let entries = fs::read_dir(path).map_err(|e| XcmError::storage("read", path, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| XcmError::storage("read", path, e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| XcmError::storage("inspect", &entry.path(), e))?;
            if file_type.is_dir() {
                dirs.push(entry.path());
            }
        }
        Ok(dirs)
    }

    fn modified_time(&self, path: &Path) -> Result<SystemTime> {
        fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(|e| XcmError::storage("inspect", path, e))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|e| XcmError::storage("create", path, e))
    }
}

//! Path resolution helpers for configured directory roles.
//!
//! Supports absolute paths, paths relative to the invocation directory, and
//! "~" home directory expansion.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{Result, ResultExt, XcmError};

/// Resolve a configured path.
///
/// Resolution rules:
/// 1. Paths starting with `~`: expanded against `home`
/// 2. Absolute paths: used as-is
/// 3. Relative paths: resolved against `base_dir`
pub fn resolve_path(path: &Path, base_dir: &Path, home: &Path) -> PathBuf {
    trace!(
        path = %path.display(),
        base_dir = %base_dir.display(),
        "Resolving path"
    );

    let path_str = path.to_string_lossy();

    if path_str == "~" || path_str.starts_with("~/") {
        let rest = path_str.strip_prefix("~/").unwrap_or("");
        let resolved = if rest.is_empty() {
            home.to_path_buf()
        } else {
            home.join(rest)
        };
        debug!(
            original = %path.display(),
            resolved = %resolved.display(),
            "Expanded home directory path"
        );
        return resolved;
    }

    if path.is_absolute() {
        return path.to_path_buf();
    }

    base_dir.join(path)
}

/// Resolve the user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .ok_or_else(|| XcmError::ConfigInvalid("Could not determine home directory".to_string()))
}

/// Path resolution context anchored at a base directory and a home directory.
#[derive(Debug, Clone)]
pub struct PathResolver {
    base_dir: PathBuf,
    home: PathBuf,
}

impl PathResolver {
    pub fn new(base_dir: impl Into<PathBuf>, home: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            home: home.into(),
        }
    }

    /// Resolver for the running process: current directory and `$HOME`.
    pub fn from_process() -> Result<Self> {
        let base_dir =
            std::env::current_dir().with_context(|| "Cannot determine the current directory")?;
        Ok(Self::new(base_dir, home_dir()?))
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        resolve_path(path, &self.base_dir, &self.home)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn home(&self) -> &Path {
        &self.home
    }
}

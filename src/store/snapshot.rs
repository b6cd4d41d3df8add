//! Snapshot references and their display labels.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};

use super::naming::parse_backup_name;
use crate::error::Result;
use crate::storage::TreeStorage;

/// A configuration tree on disk, identified by its root path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub path: PathBuf,
    pub name: String,
    pub modified: SystemTime,
}

impl Snapshot {
    /// Read a snapshot's metadata through `storage`.
    pub fn load<S: TreeStorage + ?Sized>(storage: &S, path: &Path) -> Result<Self> {
        let modified = storage.modified_time(path)?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self {
            path: path.to_path_buf(),
            name,
            modified,
        })
    }

    pub fn modified_local(&self) -> DateTime<Local> {
        DateTime::<Local>::from(self.modified)
    }

    /// `backup_<ts> (YYYY-MM-DD HH:MM)`, used in backup listings.
    pub fn backup_label(&self) -> String {
        format!(
            "{} ({})",
            self.name,
            self.modified_local().format("%Y-%m-%d %H:%M")
        )
    }

    /// `dd/mm/YYYY HH:MM:SS`, used for saved and repository configurations.
    pub fn date_label(&self) -> String {
        self.modified_local().format("%d/%m/%Y %H:%M:%S").to_string()
    }

    /// `name (dd/mm/YYYY HH:MM:SS)`.
    pub fn named_date_label(&self) -> String {
        format!("{} ({})", self.name, self.date_label())
    }
}

/// Sort oldest first.
///
/// Equal modification times fall back to the timestamp and collision index
/// in backup names, then to the plain name, so the order is total.
pub fn sort_oldest_first(snapshots: &mut [Snapshot]) {
    snapshots.sort_by(|a, b| {
        a.modified
            .cmp(&b.modified)
            .then_with(|| parse_backup_name(&a.name).cmp(&parse_backup_name(&b.name)))
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Sort newest first.
pub fn sort_newest_first(snapshots: &mut [Snapshot]) {
    sort_oldest_first(snapshots);
    snapshots.reverse();
}

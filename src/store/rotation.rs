//! Rotated backups with a retention ceiling.

use tracing::{debug, info, instrument, warn};

use super::naming::unique_backup_path;
use super::{Snapshot, SnapshotStore};
use crate::error::Result;
use crate::prompt::Prompter;
use crate::storage::TreeStorage;

/// Result of a completed rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupReport {
    /// The backup just created.
    pub snapshot: Snapshot,
    pub size_bytes: u64,
    /// Number of backups after the rotation.
    pub backup_count: usize,
    /// Backups removed to make room, oldest first.
    pub evicted: Vec<Snapshot>,
}

impl<S: TreeStorage> SnapshotStore<S> {
    /// Copy the live configuration into a new timestamped backup.
    ///
    /// When the collection is at its ceiling the oldest backups must go
    /// first. Every eviction is confirmed before anything is deleted;
    /// declining any of them cancels the whole rotation and leaves the
    /// collection untouched.
    ///
    /// A failed copy or delete is not rolled back.
    #[instrument(skip_all, fields(root = %self.layout.backups_root.display(), max = self.max_backups))]
    pub fn rotate_and_backup(&self, prompter: &mut dyn Prompter) -> Result<BackupReport> {
        self.require("Live configuration", &self.layout.live)?;

        let existing = self.backups_oldest_first()?;
        let excess = (existing.len() + 1).saturating_sub(self.max_backups);
        let evict = &existing[..excess.min(existing.len())];
        debug!(existing = existing.len(), evict = evict.len(), "Planned rotation");

        for old in evict {
            Self::confirm_or_cancel(prompter, &format!("Delete old backup '{}'?", old.name))
                .inspect_err(|_| warn!(backup = %old.name, "Eviction declined, rotation cancelled"))?;
        }

        for old in evict {
            self.storage.delete_tree(&old.path)?;
            info!(backup = %old.name, "Evicted backup");
        }

        let now = (self.clock)();
        let target = unique_backup_path(&self.layout.backups_root, now, |p| self.storage.exists(p));
        self.storage.copy_tree(&self.layout.live, &target)?;

        let size_bytes = self.storage.size(&target)?;
        let snapshot = Snapshot::load(&self.storage, &target)?;
        let backup_count = self.storage.list_children(&self.layout.backups_root)?.len();
        info!(backup = %snapshot.name, size_bytes, backup_count, "Backup created");

        Ok(BackupReport {
            snapshot,
            size_bytes,
            backup_count,
            evicted: evict.to_vec(),
        })
    }
}

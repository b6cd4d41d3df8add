//! Snapshot store manager.
//!
//! Owns the directory roles of a configuration repository and implements
//! every whole-tree operation on them:
//!
//! - saving the live configuration into the single saved slot
//! - rotated backups with a fixed retention ceiling
//! - restoring the live configuration from any available source
//! - replacing the repository-tracked mirror
//!
//! The filesystem is the only state. Presence and modification times of the
//! directories are all the metadata there is.

mod layout;
pub mod naming;
mod restore;
mod rotation;
mod snapshot;

pub use layout::StoreLayout;
pub use restore::{Listing, RestoreReport};
pub use rotation::BackupReport;
pub use snapshot::{Snapshot, sort_newest_first, sort_oldest_first};

use std::path::Path;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, instrument};

use crate::config::DEFAULT_MAX_BACKUPS;
use crate::error::{Result, XcmError};
use crate::output::StoreStatus;
use crate::prompt::Prompter;
use crate::storage::TreeStorage;

type Clock = Box<dyn Fn() -> NaiveDateTime>;

/// Result of saving the live configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub snapshot: Snapshot,
    pub size_bytes: u64,
}

/// Snapshot store over a [`TreeStorage`] backend.
pub struct SnapshotStore<S> {
    storage: S,
    layout: StoreLayout,
    max_backups: usize,
    clock: Clock,
}

impl<S: TreeStorage> SnapshotStore<S> {
    pub fn new(storage: S, layout: StoreLayout) -> Self {
        Self {
            storage,
            layout,
            max_backups: DEFAULT_MAX_BACKUPS,
            clock: Box::new(|| Local::now().naive_local()),
        }
    }

    /// Set the retention ceiling. Values below 1 are raised to 1.
    pub fn with_max_backups(mut self, max_backups: usize) -> Self {
        self.max_backups = max_backups.max(1);
        self
    }

    /// Replace the clock used to name backups.
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDateTime + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub const fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub const fn max_backups(&self) -> usize {
        self.max_backups
    }

    /// Fail with [`XcmError::LiveConfigMissing`] if there is no live configuration.
    pub fn verify_live(&self) -> Result<()> {
        if self.storage.exists(&self.layout.live) {
            Ok(())
        } else {
            Err(XcmError::LiveConfigMissing {
                path: self.layout.live.display().to_string(),
            })
        }
    }

    /// Create the backups root and the saved slot's parent.
    #[instrument(skip(self))]
    pub fn ensure_layout(&self) -> Result<()> {
        self.storage.create_dir_all(&self.layout.backups_root)?;
        self.storage.create_dir_all(&self.layout.saved_root)?;
        Ok(())
    }

    /// Presence summary of every role.
    pub fn status(&self) -> Result<StoreStatus> {
        Ok(StoreStatus {
            live_path: self.layout.live.display().to_string(),
            live_present: self.storage.exists(&self.layout.live),
            backup_count: self.storage.list_children(&self.layout.backups_root)?.len(),
            saved_present: self.storage.exists(&self.layout.saved_slot),
            mirror_present: self.storage.exists(&self.layout.mirror),
        })
    }

    fn snapshots_in(&self, root: &Path) -> Result<Vec<Snapshot>> {
        self.storage
            .list_children(root)?
            .iter()
            .map(|path| Snapshot::load(&self.storage, path))
            .collect()
    }

    /// Backups sorted oldest first.
    pub fn backups_oldest_first(&self) -> Result<Vec<Snapshot>> {
        let mut backups = self.snapshots_in(&self.layout.backups_root)?;
        sort_oldest_first(&mut backups);
        Ok(backups)
    }

    /// Backups sorted most recent first.
    pub fn backups_newest_first(&self) -> Result<Vec<Snapshot>> {
        let mut backups = self.snapshots_in(&self.layout.backups_root)?;
        sort_newest_first(&mut backups);
        Ok(backups)
    }

    /// Every configuration directory under the mirror root, most recent first.
    pub fn local_configs(&self) -> Result<Vec<Snapshot>> {
        let mut configs = self.snapshots_in(&self.layout.mirror_root)?;
        sort_newest_first(&mut configs);
        Ok(configs)
    }

    /// The saved snapshot, if one exists.
    pub fn saved_snapshot(&self) -> Result<Option<Snapshot>> {
        if !self.storage.exists(&self.layout.saved_slot) {
            return Ok(None);
        }
        Snapshot::load(&self.storage, &self.layout.saved_slot).map(Some)
    }

    fn require(&self, role: &'static str, path: &Path) -> Result<()> {
        if self.storage.exists(path) {
            Ok(())
        } else {
            Err(XcmError::source_not_found(role, path))
        }
    }

    fn confirm_or_cancel(prompter: &mut dyn Prompter, question: &str) -> Result<()> {
        if prompter.confirm(question, false)? {
            Ok(())
        } else {
            Err(XcmError::UserCancelled)
        }
    }

    /// Replace the saved snapshot with a copy of the live configuration.
    ///
    /// Asks for confirmation first; declining returns [`XcmError::UserCancelled`].
    #[instrument(skip_all, fields(slot = %self.layout.saved_slot.display()))]
    pub fn save_current(&self, prompter: &mut dyn Prompter) -> Result<SaveReport> {
        self.require("Live configuration", &self.layout.live)?;
        Self::confirm_or_cancel(prompter, "Save the current configuration?")?;

        info!("Saving live configuration");
        self.storage
            .replace_tree(&self.layout.live, &self.layout.saved_slot)?;

        let size_bytes = self.storage.size(&self.layout.saved_slot)?;
        let snapshot = Snapshot::load(&self.storage, &self.layout.saved_slot)?;
        debug!(size_bytes, "Saved snapshot written");
        Ok(SaveReport {
            snapshot,
            size_bytes,
        })
    }
}

//! Restore-source resolution and whole-tree replacement of live and mirror.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use super::{Snapshot, SnapshotStore};
use crate::error::{Result, XcmError};
use crate::prompt::Prompter;
use crate::storage::TreeStorage;

/// A family of snapshots the user can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listing {
    /// The single saved snapshot.
    Saved,
    /// Configuration directories under the mirror root.
    LocalConfigs,
    /// Rotated backups, most recent first.
    Backups,
}

impl Listing {
    /// Menu label of the whole family.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Saved => "Saved configuration in this repo",
            Self::LocalConfigs => "Configurations available in this repo",
            Self::Backups => "Backups in this repo",
        }
    }

    /// Role name used when the family turns out to be empty.
    pub const fn role(self) -> &'static str {
        match self {
            Self::Saved => "Saved configuration",
            Self::LocalConfigs => "Repository configurations",
            Self::Backups => "Backups",
        }
    }

    /// Label of one entry in a sub-listing.
    pub fn entry_label(self, snapshot: &Snapshot) -> String {
        match self {
            Self::Saved => snapshot.date_label(),
            Self::LocalConfigs => snapshot.named_date_label(),
            Self::Backups => snapshot.backup_label(),
        }
    }

    fn restore_question(self, snapshot: &Snapshot) -> String {
        match self {
            Self::Saved => format!("Restore saved configuration ({})?", snapshot.date_label()),
            Self::LocalConfigs => format!("Restore '{}' ({})?", snapshot.name, snapshot.date_label()),
            Self::Backups => format!("Restore backup '{}'?", snapshot.name),
        }
    }
}

/// Outcome of copying a snapshot over a destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreReport {
    pub source: Snapshot,
    pub destination: PathBuf,
    pub size_bytes: u64,
}

impl<S: TreeStorage> SnapshotStore<S> {
    /// Families available for restoring live, in fixed priority order.
    ///
    /// A family is listed only if something in it exists right now. An empty
    /// result means there is nothing to restore.
    pub fn restore_sources(&self) -> Result<Vec<Listing>> {
        let mut sources = Vec::with_capacity(3);
        if self.storage.exists(&self.layout.saved_slot) {
            sources.push(Listing::Saved);
        }
        if self.storage.exists(&self.layout.mirror) {
            sources.push(Listing::LocalConfigs);
        }
        if !self.storage.list_children(&self.layout.backups_root)?.is_empty() {
            sources.push(Listing::Backups);
        }
        debug!(?sources, "Resolved restore sources");
        Ok(sources)
    }

    /// Snapshots of one family, in display order.
    pub fn entries(&self, listing: Listing) -> Result<Vec<Snapshot>> {
        match listing {
            Listing::Saved => Ok(self.saved_snapshot()?.into_iter().collect()),
            Listing::LocalConfigs => self.local_configs(),
            Listing::Backups => self.backups_newest_first(),
        }
    }

    /// Like [`entries`](Self::entries), but an empty family is
    /// [`XcmError::SourceNotFound`].
    pub fn require_entries(&self, listing: Listing) -> Result<Vec<Snapshot>> {
        let entries = self.entries(listing)?;
        if entries.is_empty() {
            let root = match listing {
                Listing::Saved => &self.layout.saved_slot,
                Listing::LocalConfigs => &self.layout.mirror_root,
                Listing::Backups => &self.layout.backups_root,
            };
            return Err(XcmError::source_not_found(listing.role(), root));
        }
        Ok(entries)
    }

    /// Replace the live configuration with `source` after confirmation.
    ///
    /// Live ends up byte-identical to `source`; anything it held before is gone.
    #[instrument(skip_all, fields(source = %source.path.display(), listing = ?listing))]
    pub fn restore(
        &self,
        listing: Listing,
        source: &Snapshot,
        prompter: &mut dyn Prompter,
    ) -> Result<RestoreReport> {
        self.require(listing.role(), &source.path)?;
        Self::confirm_or_cancel(prompter, &listing.restore_question(source))?;

        info!(live = %self.layout.live.display(), "Restoring live configuration");
        self.transfer(source, &self.layout.live)
    }

    /// Replace the repository mirror with `source` after confirmation.
    #[instrument(skip_all, fields(source = %source.path.display()))]
    pub fn replace_local_mirror(
        &self,
        source: &Snapshot,
        prompter: &mut dyn Prompter,
    ) -> Result<RestoreReport> {
        self.require("Replacement source", &source.path)?;
        Self::confirm_or_cancel(
            prompter,
            &format!("Replace the repository configuration with '{}'?", source.name),
        )?;

        info!(mirror = %self.layout.mirror.display(), "Replacing repository configuration");
        self.transfer(source, &self.layout.mirror)
    }

    fn transfer(&self, source: &Snapshot, destination: &Path) -> Result<RestoreReport> {
        self.storage.replace_tree(&source.path, destination)?;
        let size_bytes = self.storage.size(destination)?;
        debug!(size_bytes, "Transfer complete");
        Ok(RestoreReport {
            source: source.clone(),
            destination: destination.to_path_buf(),
            size_bytes,
        })
    }
}

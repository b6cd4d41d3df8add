//! Concrete directory roles of the snapshot store.

use std::path::PathBuf;

use crate::config::{ManagerConfig, PathResolver};

/// Resolved paths for every directory role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLayout {
    /// Configuration used by the running desktop.
    pub live: PathBuf,
    /// Root of the rotated backups.
    pub backups_root: PathBuf,
    /// Parent directory of the saved slot.
    pub saved_root: PathBuf,
    /// The single saved snapshot.
    pub saved_slot: PathBuf,
    /// Directory holding repository-tracked configurations.
    pub mirror_root: PathBuf,
    /// The repository-tracked copy of this application's configuration.
    pub mirror: PathBuf,
}

impl StoreLayout {
    /// Resolve the configured roles.
    pub fn from_config(config: &ManagerConfig, resolver: &PathResolver) -> Self {
        let saved_root = resolver.resolve(&config.saved_dir);
        let mirror_root = resolver.resolve(&config.mirror_root);
        Self {
            live: resolver.resolve(&config.live_dir()),
            backups_root: resolver.resolve(&config.backups_dir),
            saved_slot: saved_root.join(&config.app_name),
            saved_root,
            mirror: mirror_root.join(&config.app_name),
            mirror_root,
        }
    }
}

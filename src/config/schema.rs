//! Configuration schema for the snapshot store.
//!
//! Every directory role is configurable; the defaults reproduce the layout
//! of an XFCE dotfiles repository:
//!
//! ```text
//! <repo>/
//! ├── backups/
//! │   ├── backup_2026-10-13_21-04-55/
//! │   └── backup_2026-10-14_09-12-03/
//! ├── current_config/
//! │   └── xfce4/
//! └── Configuraciones/
//!     └── xfce4/
//! ```

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Result, XcmError};

/// Default number of rotated backups kept.
pub const DEFAULT_MAX_BACKUPS: usize = 2;

/// User-facing configuration, loaded from `xcm.toml` or `--config`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManagerConfig {
    /// Name of the application directory (e.g. `xfce4`).
    pub app_name: String,
    /// Substring identifying the desktop in the session variables.
    pub desktop_id: String,
    /// Live configuration path. Defaults to `~/.config/<app_name>`.
    pub live_dir: Option<PathBuf>,
    /// Root of the rotated backup collection.
    pub backups_dir: PathBuf,
    /// Parent of the saved snapshot slot (`<saved_dir>/<app_name>`).
    pub saved_dir: PathBuf,
    /// Root holding repository-tracked configurations (`<mirror_root>/<app_name>`).
    pub mirror_root: PathBuf,
    /// Retention ceiling for the backup collection.
    pub max_backups: usize,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            app_name: "xfce4".to_string(),
            desktop_id: "xfce".to_string(),
            live_dir: None,
            backups_dir: PathBuf::from("backups"),
            saved_dir: PathBuf::from("current_config"),
            mirror_root: PathBuf::from("Configuraciones"),
            max_backups: DEFAULT_MAX_BACKUPS,
        }
    }
}

impl ManagerConfig {
    /// Live configuration path before resolution.
    pub fn live_dir(&self) -> PathBuf {
        self.live_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("~/.config").join(&self.app_name))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.app_name.trim().is_empty() {
            return Err(XcmError::ConfigInvalid("app_name must not be empty".into()));
        }
        if self.app_name.contains('/') {
            return Err(XcmError::ConfigInvalid(format!(
                "app_name '{}' must be a single directory name",
                self.app_name
            )));
        }
        if self.desktop_id.trim().is_empty() {
            return Err(XcmError::ConfigInvalid("desktop_id must not be empty".into()));
        }
        if self.max_backups == 0 {
            return Err(XcmError::ConfigInvalid("max_backups must be at least 1".into()));
        }
        Ok(())
    }
}

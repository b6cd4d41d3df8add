//! Loading of [`ManagerConfig`] from YAML or TOML files.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, trace};

use crate::error::{Result, XcmError};

use super::ManagerConfig;

/// Name of the configuration file picked up from the invocation directory.
pub const DEFAULT_CONFIG_FILE: &str = "xcm.toml";

/// Configuration file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (.yaml, .yml).
    Yaml,
    /// TOML format (.toml).
    Toml,
}

impl ConfigFormat {
    /// Detect format from file extension.
    #[must_use]
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        trace!(extension = %ext, "Detecting config format from extension");
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Load a configuration file, detecting the format from its extension.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ManagerConfig> {
    let path = path.as_ref();

    let format = ConfigFormat::from_extension(path).ok_or_else(|| {
        XcmError::ConfigParse(format!(
            "Unknown config format for '{}': expected .yaml, .yml, or .toml",
            path.display()
        ))
    })?;

    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            XcmError::ConfigNotFound {
                path: path.display().to_string(),
            }
        } else {
            XcmError::Io(e)
        }
    })?;
    debug!(bytes = content.len(), ?format, "Read config file");

    load_config_from_str(&content, format)
}

/// Parse and validate configuration content.
pub fn load_config_from_str(content: &str, format: ConfigFormat) -> Result<ManagerConfig> {
    let config: ManagerConfig = match format {
        ConfigFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|e| XcmError::ConfigParse(format!("YAML: {e}")))?
        }
        ConfigFormat::Toml => {
            toml::from_str(content).map_err(|e| XcmError::ConfigParse(format!("TOML: {e}")))?
        }
    };

    config.validate()?;

    info!(
        app = %config.app_name,
        desktop = %config.desktop_id,
        max_backups = config.max_backups,
        "Configuration loaded"
    );
    Ok(config)
}

/// Resolve which configuration applies to this run.
///
/// An explicit path must exist. Without one, `xcm.toml` in `base_dir` is used
/// when present, otherwise built-in defaults.
pub fn discover_config(explicit: Option<&Path>, base_dir: &Path) -> Result<ManagerConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    let candidate: PathBuf = base_dir.join(DEFAULT_CONFIG_FILE);
    if candidate.is_file() {
        return load_config(&candidate);
    }

    debug!("No configuration file, using defaults");
    Ok(ManagerConfig::default())
}

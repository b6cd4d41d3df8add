//! Configuration module for the snapshot store.
//!
//! Handles loading the optional configuration file and resolving the
//! configured directory roles into concrete paths.

mod loader;
mod path;
mod schema;

pub use loader::{ConfigFormat, DEFAULT_CONFIG_FILE, discover_config, load_config, load_config_from_str};
pub use path::{PathResolver, home_dir, resolve_path};
pub use schema::{DEFAULT_MAX_BACKUPS, ManagerConfig};

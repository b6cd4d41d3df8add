//! Configuration discovery and layout resolution.

use std::path::PathBuf;

use xcm::config::{PathResolver, discover_config};
use xcm::error::XcmError;
use xcm::store::StoreLayout;

use crate::common::fixtures::TestRepo;
use crate::common::init_test_logging;

#[test]
fn test_defaults_without_config_file() {
    init_test_logging();
    let repo = TestRepo::new();

    let config = discover_config(None, repo.repo_path()).unwrap();

    assert_eq!(config.app_name, "xfce4");
    assert_eq!(config.max_backups, 2);
}

#[test]
fn test_repository_config_file_is_picked_up() {
    init_test_logging();
    let repo = TestRepo::new();
    repo.write(
        repo.in_repo("xcm.toml"),
        "max_backups = 5\nmirror_root = \"dotfiles\"\nlive_dir = \"~/custom/xfce4\"\n",
    );

    let config = discover_config(None, repo.repo_path()).unwrap();
    let resolver = PathResolver::new(repo.repo_path(), repo.home_path());
    let layout = StoreLayout::from_config(&config, &resolver);

    assert_eq!(config.max_backups, 5);
    assert_eq!(layout.mirror, repo.in_repo("dotfiles/xfce4"));
    assert_eq!(layout.live, repo.home_path().join("custom/xfce4"));
}

#[test]
fn test_explicit_yaml_config() {
    init_test_logging();
    let repo = TestRepo::new();
    let path = repo.in_repo("alt.yaml");
    repo.write(&path, "app_name: xfce4-terminal\nbackups_dir: /var/tmp/xcm-backups\n");

    let config = discover_config(Some(path.as_path()), repo.repo_path()).unwrap();

    assert_eq!(config.app_name, "xfce4-terminal");
    assert_eq!(config.backups_dir, PathBuf::from("/var/tmp/xcm-backups"));
}

#[test]
fn test_missing_explicit_config() {
    init_test_logging();
    let repo = TestRepo::new();
    let path = repo.in_repo("nope.toml");

    assert!(matches!(
        discover_config(Some(path.as_path()), repo.repo_path()),
        Err(XcmError::ConfigNotFound { .. })
    ));
}

#[test]
fn test_invalid_retention_rejected() {
    init_test_logging();
    let repo = TestRepo::new();
    repo.write(repo.in_repo("xcm.toml"), "max_backups = 0\n");

    assert!(matches!(
        discover_config(None, repo.repo_path()),
        Err(XcmError::ConfigInvalid(_))
    ));
}

//! Test fixture helpers for creating temporary configuration trees.
//!
//! A [`TestRepo`] holds two temporary directories: a fake home directory
//! (containing `.config/xfce4`) and a repository directory (the working
//! directory of the tool).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use xcm::config::{ManagerConfig, PathResolver};
use xcm::store::StoreLayout;

/// Files written by [`TestRepo::with_live`].
pub const LIVE_FILES: &[(&str, &str)] = &[
    (
        "xfconf/xfce-perchannel-xml/xfwm4.xml",
        "<?xml version=\"1.0\"?>\n<channel name=\"xfwm4\" version=\"1.0\"/>\n",
    ),
    (
        "xfconf/xfce-perchannel-xml/xfce4-panel.xml",
        "<?xml version=\"1.0\"?>\n<channel name=\"xfce4-panel\" version=\"1.0\"/>\n",
    ),
    ("panel/whiskermenu-1.rc", "favorites=firefox.desktop\n"),
    ("terminal/terminalrc", "[Configuration]\nFontName=Monospace 11\n"),
];

/// Temporary home and repository directories with automatic cleanup.
pub struct TestRepo {
    pub home: TempDir,
    pub repo: TempDir,
}

impl TestRepo {
    /// Empty home and repository.
    ///
    /// # Panics
    ///
    /// Panics if a temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            home: TempDir::new().expect("Failed to create temp home"),
            repo: TempDir::new().expect("Failed to create temp repo"),
        }
    }

    /// Home containing a populated `~/.config/xfce4`.
    #[must_use]
    pub fn with_live() -> Self {
        let fixture = Self::new();
        for (rel, contents) in LIVE_FILES {
            fixture.write(fixture.live().join(rel), contents);
        }
        fixture
    }

    pub fn home_path(&self) -> &Path {
        self.home.path()
    }

    pub fn repo_path(&self) -> &Path {
        self.repo.path()
    }

    pub fn live(&self) -> PathBuf {
        self.home.path().join(".config").join("xfce4")
    }

    /// Path inside the repository.
    pub fn in_repo(&self, rel: &str) -> PathBuf {
        self.repo.path().join(rel)
    }

    /// Write a file, creating its parents.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write(&self, path: impl AsRef<Path>, contents: &str) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(path, contents).unwrap_or_else(|e| panic!("Failed to write {path:?}: {e}"));
    }

    /// Layout of the default configuration over these directories.
    #[must_use]
    pub fn layout(&self) -> StoreLayout {
        let resolver = PathResolver::new(self.repo.path(), self.home.path());
        StoreLayout::from_config(&ManagerConfig::default(), &resolver)
    }

    /// Names of the directories in `backups/`, sorted.
    #[must_use]
    pub fn backup_names(&self) -> Vec<String> {
        let root = self.in_repo("backups");
        let Ok(entries) = fs::read_dir(&root) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|e| e.path().is_dir())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// All files below `root`, keyed by relative path.
///
/// # Panics
///
/// Panics if the tree cannot be read.
#[must_use]
pub fn read_tree(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    fn walk(root: &Path, dir: &Path, out: &mut BTreeMap<PathBuf, Vec<u8>>) {
        for entry in fs::read_dir(dir).unwrap_or_else(|e| panic!("Failed to read {dir:?}: {e}")) {
            let path = entry.expect("Failed to read entry").path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                let rel = path.strip_prefix(root).expect("entry outside root").to_path_buf();
                out.insert(rel, fs::read(&path).expect("Failed to read file"));
            }
        }
    }

    let mut out = BTreeMap::new();
    walk(root, root, &mut out);
    out
}

/// Assert two directory trees hold exactly the same files and bytes.
#[track_caller]
pub fn assert_trees_equal(left: &Path, right: &Path) {
    assert_eq!(
        read_tree(left),
        read_tree(right),
        "trees differ: {} vs {}",
        left.display(),
        right.display()
    );
}

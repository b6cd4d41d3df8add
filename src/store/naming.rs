//! Backup directory naming.
//!
//! Backups are named `backup_<YYYY-MM-DD_HH-MM-SS>`. Two backups taken
//! within the same second get a numeric suffix (`_2`, `_3`, ...) instead of
//! replacing each other.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

pub const BACKUP_PREFIX: &str = "backup_";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Base backup name for a timestamp.
pub fn backup_name(at: NaiveDateTime) -> String {
    format!("{BACKUP_PREFIX}{}", at.format(TIMESTAMP_FORMAT))
}

/// First free backup path under `root` for `at`.
pub fn unique_backup_path(root: &Path, at: NaiveDateTime, exists: impl Fn(&Path) -> bool) -> PathBuf {
    let base = backup_name(at);
    let mut candidate = root.join(&base);
    let mut n = 2;
    while exists(&candidate) {
        candidate = root.join(format!("{base}_{n}"));
        n += 1;
    }
    candidate
}

/// Timestamp and collision index encoded in a backup name.
///
/// The first backup of a second has index 1; `_2`, `_3`, ... follow.
pub fn parse_backup_name(name: &str) -> Option<(NaiveDateTime, u32)> {
    let rest = name.strip_prefix(BACKUP_PREFIX)?;
    // "YYYY-MM-DD_HH-MM-SS" is 19 characters
    let stamp = rest.get(..19)?;
    let index = match rest.get(19..)? {
        "" => 1,
        suffix => suffix.strip_prefix('_')?.parse::<u32>().ok()?,
    };
    let at = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()?;
    Some((at, index))
}

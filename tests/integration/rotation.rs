//! Rotated backups on a real filesystem.

use std::cell::Cell;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use xcm::error::XcmError;
use xcm::prompt::mock::ScriptedPrompter;
use xcm::storage::FsStorage;
use xcm::store::SnapshotStore;

use crate::common::fixtures::{TestRepo, assert_trees_equal};
use crate::common::init_test_logging;

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 14)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

/// Clock advancing one minute per call.
fn ticking_clock() -> impl Fn() -> NaiveDateTime + 'static {
    let calls = Cell::new(0);
    move || {
        let n = calls.get();
        calls.set(n + 1);
        start() + TimeDelta::minutes(n)
    }
}

fn store(repo: &TestRepo) -> SnapshotStore<FsStorage> {
    SnapshotStore::new(FsStorage::new(), repo.layout()).with_clock(ticking_clock())
}

#[test]
fn test_two_rotations_from_empty() {
    init_test_logging();
    let repo = TestRepo::with_live();
    let store = store(&repo);
    let mut prompter = ScriptedPrompter::new(Vec::<String>::new());

    let first = store.rotate_and_backup(&mut prompter).unwrap();
    let second = store.rotate_and_backup(&mut prompter).unwrap();

    assert_eq!(
        repo.backup_names(),
        ["backup_2026-10-14_09-00-00", "backup_2026-10-14_09-01-00"]
    );
    assert_ne!(first.snapshot.path, second.snapshot.path);
    assert_eq!(second.backup_count, 2);
    assert_trees_equal(&first.snapshot.path, &repo.live());
}

#[test]
fn test_collection_never_exceeds_ceiling() {
    init_test_logging();
    let repo = TestRepo::with_live();
    let store = store(&repo);
    let mut prompter = ScriptedPrompter::new(["y"; 8]);

    for _ in 0..6 {
        let report = store.rotate_and_backup(&mut prompter).unwrap();
        assert!(report.backup_count <= 2);
        assert!(repo.backup_names().len() <= 2);
    }
    assert_eq!(
        repo.backup_names(),
        ["backup_2026-10-14_09-04-00", "backup_2026-10-14_09-05-00"]
    );
}

#[test]
fn test_declined_eviction_keeps_original_two() {
    init_test_logging();
    let repo = TestRepo::with_live();
    let store = store(&repo);
    let mut prompter = ScriptedPrompter::new(["n"]);
    store.rotate_and_backup(&mut prompter).unwrap();
    store.rotate_and_backup(&mut prompter).unwrap();
    let before = repo.backup_names();

    let err = store.rotate_and_backup(&mut prompter).unwrap_err();

    assert!(matches!(err, XcmError::UserCancelled));
    assert_eq!(repo.backup_names(), before);
}

#[test]
fn test_same_second_rotations_do_not_overwrite() {
    init_test_logging();
    let repo = TestRepo::with_live();
    let store = SnapshotStore::new(FsStorage::new(), repo.layout()).with_clock(start);
    let mut prompter = ScriptedPrompter::new(Vec::<String>::new());

    store.rotate_and_backup(&mut prompter).unwrap();
    repo.write(repo.live().join("terminal/terminalrc"), "changed\n");
    store.rotate_and_backup(&mut prompter).unwrap();

    assert_eq!(
        repo.backup_names(),
        ["backup_2026-10-14_09-00-00", "backup_2026-10-14_09-00-00_2"]
    );
    let first = std::fs::read_to_string(
        repo.in_repo("backups/backup_2026-10-14_09-00-00/terminal/terminalrc"),
    )
    .unwrap();
    assert!(first.contains("FontName"));
}

#[test]
fn test_rotation_without_live_fails() {
    init_test_logging();
    let repo = TestRepo::new();
    let store = store(&repo);
    let mut prompter = ScriptedPrompter::new(Vec::<String>::new());

    assert!(matches!(
        store.rotate_and_backup(&mut prompter),
        Err(XcmError::SourceNotFound { .. })
    ));
    assert!(repo.backup_names().is_empty());
}

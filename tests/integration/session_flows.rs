//! Scripted menu sessions over real directories.

use xcm::output::PlainOutput;
use xcm::prompt::mock::ScriptedPrompter;
use xcm::session::{MenuState, Session};
use xcm::storage::FsStorage;
use xcm::store::SnapshotStore;

use crate::common::fixtures::{TestRepo, assert_trees_equal};
use crate::common::init_test_logging;

type FsSession = Session<FsStorage, ScriptedPrompter, PlainOutput<Vec<u8>>>;

fn session(repo: &TestRepo, answers: &[&str]) -> FsSession {
    let store = SnapshotStore::new(FsStorage::new(), repo.layout());
    store.ensure_layout().unwrap();
    Session::new(
        store,
        ScriptedPrompter::new(answers.iter().copied()),
        PlainOutput::buffer(),
    )
}

#[test]
fn test_save_drift_and_restore_saved() {
    init_test_logging();
    let repo = TestRepo::with_live();
    let mut session = session(
        &repo,
        &["1", "y", "y", "", "2", "1", "1", "y", "", "4", ""],
    );

    assert_eq!(session.step().unwrap(), MenuState::SaveFlow);
    assert_eq!(session.step().unwrap(), MenuState::MainMenu);
    assert_eq!(repo.backup_names().len(), 1);

    repo.write(repo.live().join("panel/launcher-9.rc"), "drift\n");
    session.run().unwrap();

    assert_trees_equal(&repo.live(), &repo.in_repo("current_config/xfce4"));
    assert!(!repo.live().join("panel/launcher-9.rc").exists());

    let out = session.output().contents();
    assert!(out.contains("  1. Saved configuration in this repo"));
    assert!(out.contains("  2. Backups in this repo"));
    assert!(out.contains("[WARN] Restart your session"));
    assert!(out.contains("Goodbye!"));
}

#[test]
fn test_replace_mirror_with_backup_from_menu() {
    init_test_logging();
    let repo = TestRepo::with_live();
    let mut prompter = ScriptedPrompter::new(Vec::<String>::new());
    let backup = SnapshotStore::new(FsStorage::new(), repo.layout())
        .rotate_and_backup(&mut prompter)
        .unwrap()
        .snapshot;

    let mut session = session(&repo, &["3", "2", "1", "y", "", "4", ""]);
    session.run().unwrap();

    assert_trees_equal(&repo.in_repo("Configuraciones/xfce4"), &backup.path);
    let out = session.output().contents();
    assert!(out.contains(&format!("[OK] Repository configuration replaced from '{}'", backup.name)));
    assert!(out.contains("Configurations available in this repo: yes"));
}

#[test]
fn test_status_reflects_bootstrapped_repository() {
    init_test_logging();
    let repo = TestRepo::with_live();
    let mut session = session(&repo, &["4", "y"]);

    session.run().unwrap();

    assert!(repo.in_repo("backups").is_dir());
    assert!(repo.in_repo("current_config").is_dir());
    let out = session.output().contents();
    assert!(out.contains("Configuration on your system: yes"));
    assert!(out.contains("Backups in this repo: 0"));
    assert!(out.contains("Saved configuration in this repo: no"));
}

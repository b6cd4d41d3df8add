//! Interactive menu sessions with scripted stdin.

use assert_cmd::Command;
use predicates::prelude::*;
use regex::Regex;

use crate::common::cli::CliRunner;
use crate::common::fixtures::{TestRepo, assert_trees_equal};
use crate::common::init_test_logging;

#[test]
fn exit_right_away_bootstraps_repository() {
    init_test_logging();
    let repo = TestRepo::with_live();

    Command::from_std(CliRunner::new(&repo).command(&[]))
        .write_stdin("4\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("XFCE CONFIGURATION MANAGER"))
        .stdout(predicate::str::contains("Configuration found at:"))
        .stdout(predicate::str::contains("Goodbye!"));

    assert!(repo.in_repo("backups").is_dir());
    assert!(repo.in_repo("current_config").is_dir());
}

#[test]
fn end_of_input_exits_cleanly() {
    init_test_logging();
    let repo = TestRepo::with_live();

    CliRunner::new(&repo)
        .run(&[])
        .assert_success()
        .assert_stdout_contains("Program interrupted");
}

#[test]
fn invalid_options_keep_the_menu_alive() {
    init_test_logging();
    let repo = TestRepo::with_live();

    CliRunner::new(&repo)
        .with_stdin("7\nabc\n4\nn\n4\n\n")
        .run(&[])
        .assert_success()
        .assert_stdout_contains("Invalid option '7'")
        .assert_stdout_contains("Invalid option 'abc'")
        .assert_stdout_contains("Continuing...");
}

#[test]
fn save_with_backup_creates_both_snapshots() {
    init_test_logging();
    let repo = TestRepo::with_live();

    CliRunner::new(&repo)
        .with_stdin("1\ny\ny\n\n4\n\n")
        .run(&[])
        .assert_success()
        .assert_stdout_contains("Configuration saved to current_config/")
        .assert_stdout_contains("Total backups: 1");

    assert_trees_equal(&repo.in_repo("current_config/xfce4"), &repo.live());
    let names = repo.backup_names();
    assert_eq!(names.len(), 1);
    let pattern = Regex::new(r"^backup_\d{4}-\d{2}-\d{2}_\d{2}-\d{2}-\d{2}$").unwrap();
    assert!(pattern.is_match(&names[0]), "unexpected backup name {}", names[0]);
    assert_trees_equal(&repo.in_repo("backups").join(&names[0]), &repo.live());
}

#[test]
fn declined_save_changes_nothing() {
    init_test_logging();
    let repo = TestRepo::with_live();

    CliRunner::new(&repo)
        .with_stdin("1\nn\n\n4\n\n")
        .run(&[])
        .assert_success()
        .assert_stdout_contains("Operation cancelled");

    assert!(!repo.in_repo("current_config/xfce4").exists());
    assert!(repo.backup_names().is_empty());
}

#[test]
fn nothing_to_restore_leaves_live_untouched() {
    init_test_logging();
    let repo = TestRepo::with_live();

    CliRunner::new(&repo)
        .with_stdin("2\n\n4\n\n")
        .run(&[])
        .assert_success()
        .assert_stdout_contains("Nothing available to restore");

    assert!(repo.live().join("terminal/terminalrc").is_file());
}

#[test]
fn restore_backup_across_runs() {
    init_test_logging();
    let repo = TestRepo::with_live();
    CliRunner::new(&repo)
        .with_stdin("1\ny\ny\n\n4\n\n")
        .run(&[])
        .assert_success();
    let backup = repo.in_repo("backups").join(&repo.backup_names()[0]);

    repo.write(repo.live().join("terminal/terminalrc"), "[Configuration]\nFontName=Comic\n");
    repo.write(repo.live().join("xfconf/extra.xml"), "<extra/>");

    // Sources are saved + backups; pick backups, then the newest entry.
    CliRunner::new(&repo)
        .with_stdin("2\n2\n1\ny\n\n4\n\n")
        .run(&[])
        .assert_success()
        .assert_stdout_contains("Configuration restored successfully")
        .assert_stdout_contains("Restart your session");

    assert_trees_equal(&repo.live(), &backup);
}

#[test]
fn replace_mirror_from_saved_snapshot() {
    init_test_logging();
    let repo = TestRepo::with_live();

    CliRunner::new(&repo)
        .with_stdin("1\ny\nn\n\n3\n1\ny\n\n4\n\n")
        .run(&[])
        .assert_success()
        .assert_stdout_contains("Repository configuration replaced")
        .assert_stdout_contains("Configurations available in this repo: ✓");

    assert_trees_equal(&repo.in_repo("Configuraciones/xfce4"), &repo.live());
}

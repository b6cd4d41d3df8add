//! Interactive session state machine.
//!
//! The session renders the numbered menus, reads the user's choice through a
//! [`Prompter`] and drives the [`SnapshotStore`]. Each call to
//! [`Session::step`] handles exactly one state and moves to the next one.
//!
//! Recoverable failures (missing sources, declined confirmations, storage
//! errors) are shown to the user and the session returns to the main menu.
//! An interrupt is never swallowed: it ends [`Session::run`].

use std::path::Path;

use tracing::{debug, instrument};

use crate::error::{Result, XcmError};
use crate::output::Output;
use crate::prompt::Prompter;
use crate::storage::TreeStorage;
use crate::store::{BackupReport, Listing, SnapshotStore};

/// Where a sub-selection copies the chosen snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The live configuration.
    Live,
    /// The repository-tracked mirror.
    Mirror,
}

/// A pending pick from one listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subselect {
    pub listing: Listing,
    pub target: Target,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    MainMenu,
    SaveFlow,
    RestoreFlow,
    RestoreSubselect(Subselect),
    ReplaceFlow,
    Exit,
}

const MAIN_OPTIONS: [&str; 4] = [
    "Save the configuration from your system",
    "Restore a configuration to your system",
    "Replace this repo's configuration",
    "Exit",
];

const REPLACE_OPTIONS: [&str; 3] = [
    "Replace with the saved configuration",
    "Replace with a backup",
    "Back to main menu",
];

/// Parse a 1-based menu choice in `1..=max`.
pub fn parse_choice(input: &str, max: usize) -> Result<usize> {
    let invalid = || XcmError::InvalidSelection {
        input: input.trim().to_string(),
        max,
    };
    let choice: usize = input.trim().parse().map_err(|_| invalid())?;
    if (1..=max).contains(&choice) {
        Ok(choice)
    } else {
        Err(invalid())
    }
}

fn dir_label(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Interactive menu loop over a snapshot store.
pub struct Session<S, P, O> {
    store: SnapshotStore<S>,
    prompter: P,
    output: O,
    title: String,
    state: MenuState,
}

impl<S: TreeStorage, P: Prompter, O: Output> Session<S, P, O> {
    pub fn new(store: SnapshotStore<S>, prompter: P, output: O) -> Self {
        Self {
            store,
            prompter,
            output,
            title: "XFCE CONFIGURATION MANAGER".to_string(),
            state: MenuState::MainMenu,
        }
    }

    /// Heading shown above the main menu.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub const fn state(&self) -> MenuState {
        self.state
    }

    pub const fn store(&self) -> &SnapshotStore<S> {
        &self.store
    }

    pub const fn output(&self) -> &O {
        &self.output
    }

    /// Run until the user exits.
    ///
    /// Returns [`XcmError::Interrupted`] on end of input; any error that is
    /// not user-recoverable also ends the session.
    pub fn run(&mut self) -> Result<()> {
        while self.state != MenuState::Exit {
            self.step()?;
        }
        debug!("Session finished");
        Ok(())
    }

    /// Handle the current state once and move to the next.
    #[instrument(skip(self), fields(state = ?self.state))]
    pub fn step(&mut self) -> Result<MenuState> {
        let next = match self.state {
            MenuState::MainMenu => self.main_menu()?,
            MenuState::SaveFlow => {
                let result = self.save_flow();
                self.finish(result)?
            }
            MenuState::RestoreFlow => self.restore_flow()?,
            MenuState::RestoreSubselect(sub) => self.subselect(sub)?,
            MenuState::ReplaceFlow => self.replace_flow()?,
            MenuState::Exit => MenuState::Exit,
        };
        debug!(?next, "Transition");
        self.state = next;
        Ok(next)
    }

    /// Read a choice for a menu of `max` entries. Invalid input is shown and
    /// yields `None`.
    fn choose(&mut self, prompt: &str, max: usize) -> Result<Option<usize>> {
        let input = self.prompter.read_line(prompt)?;
        match parse_choice(&input, max) {
            Ok(choice) => Ok(Some(choice)),
            Err(e) => {
                self.output.error(&e);
                Ok(None)
            }
        }
    }

    /// Close a flow: report a recoverable failure, wait for Enter, go back
    /// to the main menu.
    fn finish(&mut self, result: Result<()>) -> Result<MenuState> {
        match result {
            Ok(()) => {}
            Err(e) if e.is_user_recoverable() => self.output.error(&e),
            Err(e) => return Err(e),
        }
        self.prompter.pause()?;
        Ok(MenuState::MainMenu)
    }

    fn main_menu(&mut self) -> Result<MenuState> {
        self.output.header(&self.title);
        match self.store.status() {
            Ok(status) => self.output.status(&status),
            Err(e) if e.is_user_recoverable() => self.output.error(&e),
            Err(e) => return Err(e),
        }
        self.output.newline();
        self.output.rule();
        let options: Vec<String> = MAIN_OPTIONS.iter().map(ToString::to_string).collect();
        self.output.options(&options);
        self.output.rule();

        let Some(choice) = self.choose("Select an option: ", MAIN_OPTIONS.len())? else {
            return Ok(MenuState::MainMenu);
        };
        Ok(match choice {
            1 => MenuState::SaveFlow,
            2 => MenuState::RestoreFlow,
            3 => MenuState::ReplaceFlow,
            _ => {
                if self.prompter.confirm("Are you sure you want to exit?", true)? {
                    self.output.success("Goodbye!");
                    MenuState::Exit
                } else {
                    self.output.info("Continuing...");
                    MenuState::MainMenu
                }
            }
        })
    }

    fn save_flow(&mut self) -> Result<()> {
        self.output.info("Saving configuration...");
        let report = self.store.save_current(&mut self.prompter)?;
        let saved_dir = dir_label(&self.store.layout().saved_root);
        self.output
            .success(&format!("Configuration saved to {saved_dir}/"));
        self.output.size(report.size_bytes);

        self.output.newline();
        let backups_dir = dir_label(&self.store.layout().backups_root);
        if self
            .prompter
            .confirm(&format!("Also create a backup in {backups_dir}/?"), false)?
        {
            let report = self.store.rotate_and_backup(&mut self.prompter)?;
            self.backup_created(&report);
        }
        Ok(())
    }

    fn backup_created(&self, report: &BackupReport) {
        for old in &report.evicted {
            self.output.info(&format!("Backup deleted: {}", old.name));
        }
        self.output
            .success(&format!("Backup created: {}", report.snapshot.name));
        self.output.size(report.size_bytes);
        self.output
            .detail("Total backups", &report.backup_count.to_string());
    }

    fn restore_flow(&mut self) -> Result<MenuState> {
        self.output
            .info("Select a configuration to restore to your system:");
        self.output.path("Will be restored to", &self.store.layout().live);

        let sources = match self.store.restore_sources() {
            Ok(sources) if sources.is_empty() => Err(XcmError::NothingToRestore),
            other => other,
        };
        let sources = match sources {
            Ok(sources) => sources,
            Err(e) => return self.finish(Err(e)),
        };

        let mut options: Vec<String> = sources.iter().map(|s| s.label().to_string()).collect();
        options.push("Back to main menu".to_string());
        self.output.options(&options);

        let prompt = format!("Select an option (1-{}): ", options.len());
        Ok(match self.choose(&prompt, options.len())? {
            None => MenuState::RestoreFlow,
            Some(choice) if choice == options.len() => MenuState::MainMenu,
            Some(choice) => MenuState::RestoreSubselect(Subselect {
                listing: sources[choice - 1],
                target: Target::Live,
            }),
        })
    }

    fn replace_flow(&mut self) -> Result<MenuState> {
        self.output.info("Replacing this repo's configuration...");
        let options: Vec<String> = REPLACE_OPTIONS.iter().map(ToString::to_string).collect();
        self.output.options(&options);

        let prompt = format!("Select an option (1-{}): ", options.len());
        Ok(match self.choose(&prompt, options.len())? {
            None => MenuState::ReplaceFlow,
            Some(1) => {
                let result = self.replace_from_saved();
                self.finish(result)?
            }
            Some(2) => MenuState::RestoreSubselect(Subselect {
                listing: Listing::Backups,
                target: Target::Mirror,
            }),
            Some(_) => MenuState::MainMenu,
        })
    }

    fn replace_from_saved(&mut self) -> Result<()> {
        let saved = self.store.require_entries(Listing::Saved)?.remove(0);
        let report = self.store.replace_local_mirror(&saved, &mut self.prompter)?;
        self.output
            .success("Repository configuration replaced with the saved configuration");
        self.output.size(report.size_bytes);
        Ok(())
    }

    fn subselect(&mut self, sub: Subselect) -> Result<MenuState> {
        let back = match sub.target {
            Target::Live => MenuState::RestoreFlow,
            Target::Mirror => MenuState::ReplaceFlow,
        };
        let entries = match self.store.require_entries(sub.listing) {
            Ok(entries) => entries,
            Err(e) => return self.finish(Err(e)),
        };

        self.output.header(&sub.listing.label().to_uppercase());
        let mut options: Vec<String> = entries
            .iter()
            .map(|snapshot| sub.listing.entry_label(snapshot))
            .collect();
        options.push("Back".to_string());
        self.output.options(&options);

        let prompt = format!("Select an option (1-{}): ", options.len());
        let choice = match self.choose(&prompt, options.len())? {
            None => return Ok(MenuState::RestoreSubselect(sub)),
            Some(choice) if choice == options.len() => return Ok(back),
            Some(choice) => choice,
        };

        let source = &entries[choice - 1];
        let result = match sub.target {
            Target::Live => self
                .store
                .restore(sub.listing, source, &mut self.prompter)
                .map(|_| {
                    self.output.success("Configuration restored successfully");
                    self.output
                        .warning("Restart your session for the changes to take effect");
                }),
            Target::Mirror => self
                .store
                .replace_local_mirror(source, &mut self.prompter)
                .map(|report| {
                    self.output
                        .success(&format!("Repository configuration replaced from '{}'", source.name));
                    self.output.size(report.size_bytes);
                }),
        };
        self.finish(result)
    }
}

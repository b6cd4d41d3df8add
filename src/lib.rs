//! XFCE Config Manager library - snapshot store for desktop configuration.
//!
//! This library exposes the core functionality of the `xcm` CLI for use in
//! tests and potentially other front ends.
//!
//! # Modules
//!
//! - `environment`: Desktop environment gate
//! - `error`: Error types with user-recoverable hints
//! - `storage`: Whole-tree storage abstraction (filesystem and in-memory)
//! - `store`: Saved snapshot, rotated backups, restore and mirror replacement
//! - `session`: Interactive menu state machine
//! - `prompt`: Confirmation and menu input
//! - `output`: Styled and plain output
//! - `config`: Configuration file handling
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod logging;
pub mod output;
pub mod prompt;
pub mod session;
pub mod storage;
pub mod store;
pub mod theme;

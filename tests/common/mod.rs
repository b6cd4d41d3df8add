//! Common test utilities for the configuration manager.
//!
//! - `cli`: binary runner with piped stdin and fluent assertions
//! - `env`: serialized environment variable mutation
//! - `fixtures`: temporary home + repository trees and tree comparison
#![allow(dead_code)]

pub mod env;
pub mod fixtures;

use tracing_subscriber::EnvFilter;

pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

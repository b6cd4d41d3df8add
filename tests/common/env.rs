//! Environment variable helpers for tests.
#![allow(dead_code)]

use env_lock::{EnvGuard as LockedEnvGuard, lock_env};
use tracing::{instrument, trace};

use xcm::environment::{CURRENT_DESKTOP_VAR, DESKTOP_SESSION_VAR};

/// RAII guard to restore environment variables on drop.
///
/// Holds the process-wide environment lock, so only one guard may be alive
/// per thread at a time.
pub struct EnvGuard<'a> {
    _guard: LockedEnvGuard<'a>,
}

impl<'a> EnvGuard<'a> {
    #[must_use]
    #[instrument]
    pub fn set(key: &'a str, value: &str) -> Self {
        trace!(key, value, "Setting env var");
        let guard = lock_env([(key, Some(value))]);
        Self { _guard: guard }
    }

    #[must_use]
    #[instrument]
    pub fn remove(key: &'a str) -> Self {
        trace!(key, "Removing env var");
        let guard = lock_env([(key, None::<&str>)]);
        Self { _guard: guard }
    }
}

/// Set (or unset) both desktop session variables under one lock.
#[must_use]
pub fn with_desktop(session: Option<&str>, current: Option<&str>) -> EnvGuard<'static> {
    trace!(?session, ?current, "Setting desktop variables");
    let guard = lock_env([(DESKTOP_SESSION_VAR, session), (CURRENT_DESKTOP_VAR, current)]);
    EnvGuard { _guard: guard }
}

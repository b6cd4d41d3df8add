//! Desktop environment detection.
//!
//! The tool only runs on Linux inside the configured desktop session. The
//! desktop is recognised if either `DESKTOP_SESSION` or `XDG_CURRENT_DESKTOP`
//! contains the desktop identifier, ignoring case.

use tracing::{debug, instrument, warn};

use crate::error::{Result, XcmError};

/// Session variable naming the login session (e.g. `xfce`).
pub const DESKTOP_SESSION_VAR: &str = "DESKTOP_SESSION";
/// Session variable naming the running desktop (e.g. `XFCE`).
pub const CURRENT_DESKTOP_VAR: &str = "XDG_CURRENT_DESKTOP";

/// Snapshot of the inputs the environment gate looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentProbe {
    pub os: String,
    pub desktop_session: String,
    pub current_desktop: String,
}

impl EnvironmentProbe {
    /// Read the probe from the running process.
    pub fn from_process() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            desktop_session: std::env::var(DESKTOP_SESSION_VAR).unwrap_or_default(),
            current_desktop: std::env::var(CURRENT_DESKTOP_VAR).unwrap_or_default(),
        }
    }

    /// Evaluate the probe against a desktop identifier.
    #[instrument(skip(self), fields(os = %self.os))]
    pub fn evaluate(&self, desktop_id: &str) -> GateReport {
        let os_supported = self.os.eq_ignore_ascii_case("linux");
        let needle = desktop_id.to_lowercase();
        let desktop_detected = self.desktop_session.to_lowercase().contains(&needle)
            || self.current_desktop.to_lowercase().contains(&needle);

        let mut reasons = Vec::new();
        if !os_supported {
            reasons.push(format!("this tool only works on Linux (found '{}')", self.os));
        }
        if !desktop_detected {
            reasons.push(format!(
                "desktop '{desktop_id}' not detected ({DESKTOP_SESSION_VAR}='{}', {CURRENT_DESKTOP_VAR}='{}')",
                self.desktop_session, self.current_desktop
            ));
        }

        if reasons.is_empty() {
            debug!(desktop = desktop_id, "Environment supported");
        } else {
            warn!(?reasons, "Environment not supported");
        }

        GateReport {
            os_supported,
            desktop_detected,
            reasons,
        }
    }
}

/// Outcome of the environment gate, with one reason per failed check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateReport {
    pub os_supported: bool,
    pub desktop_detected: bool,
    pub reasons: Vec<String>,
}

impl GateReport {
    pub fn is_supported(&self) -> bool {
        self.os_supported && self.desktop_detected
    }

    /// Convert a failed report into [`XcmError::EnvironmentUnsupported`].
    pub fn into_result(self) -> Result<()> {
        if self.is_supported() {
            Ok(())
        } else {
            Err(XcmError::EnvironmentUnsupported {
                reasons: self.reasons,
            })
        }
    }
}

/// Returns true when the running process is inside a supported session.
pub fn is_supported_environment(desktop_id: &str) -> bool {
    EnvironmentProbe::from_process()
        .evaluate(desktop_id)
        .is_supported()
}

//! Desktop detection from the process environment.
//!
//! Each test holds the environment lock while it mutates the session
//! variables.

use xcm::environment::{EnvironmentProbe, is_supported_environment};

use crate::common::env::with_desktop;
use crate::common::init_test_logging;

#[test]
fn test_detects_xfce_session() {
    init_test_logging();
    let _env = with_desktop(Some("xfce"), None);

    let probe = EnvironmentProbe::from_process();
    assert_eq!(probe.desktop_session, "xfce");
    assert!(probe.current_desktop.is_empty());
    if cfg!(target_os = "linux") {
        assert!(is_supported_environment("xfce"));
    }
}

#[test]
fn test_detects_current_desktop_case_insensitively() {
    init_test_logging();
    let _env = with_desktop(None, Some("XFCE"));

    assert!(EnvironmentProbe::from_process().evaluate("xfce").desktop_detected);
}

#[test]
fn test_rejects_other_desktop() {
    init_test_logging();
    let _env = with_desktop(Some("plasma"), Some("KDE"));

    assert!(!is_supported_environment("xfce"));
    let report = EnvironmentProbe::from_process().evaluate("xfce");
    assert!(report.reasons.iter().any(|r| r.contains("plasma")));
}

#[test]
fn test_missing_variables_are_not_a_match() {
    init_test_logging();
    let _env = with_desktop(None, None);

    assert!(!is_supported_environment("xfce"));
}

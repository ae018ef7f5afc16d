use nbreakup_core::errors::{DecayError, ErrorInfo};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("parent", 22_000.5)
        .with_context("reason", "example")
}

#[test]
fn kinematics_error_surface() {
    let err = DecayError::Kinematics(sample_info("K001", "parent below daughters"));
    assert_eq!(err.code(), "K001");
    assert_eq!(err.info().context.get("parent").unwrap(), "22000.5");
}

#[test]
fn config_error_surface() {
    let err = DecayError::Config(sample_info("C001", "unknown key").with_hint("check spelling"));
    assert_eq!(err.info().code, "C001");
    assert_eq!(err.info().hint.as_deref(), Some("check spelling"));
}

#[test]
fn state_and_sampling_error_surface() {
    let err = DecayError::State(sample_info("ST001", "no input"));
    assert_eq!(err.info().code, "ST001");
    let err = DecayError::Sampling(sample_info("SA001", "exhausted"));
    assert_eq!(err.info().code, "SA001");
}

#[test]
fn display_includes_context_and_hint() {
    let err = DecayError::Serde(ErrorInfo::new("S001", "bad yaml").with_hint("fix it"));
    assert_eq!(err.to_string(), "serde error: bad yaml (code: S001) | hint: fix it");

    let err = DecayError::Config(ErrorInfo::new("C002", "nope").with_context("key", "x"));
    assert_eq!(err.to_string(), "config error: nope (code: C002) | context: [key=x]");
}

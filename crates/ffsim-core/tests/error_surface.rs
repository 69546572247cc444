use ffsim_core::errors::{ErrorInfo, FfsError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("field", "forward_proton.theta_max")
        .with_context("reason", "example")
}

#[test]
fn config_error_surface() {
    let err = FfsError::Config(sample_info("C001", "window inverted"));
    assert_eq!(err.info().code, "C001");
    assert!(err.info().context.contains_key("field"));
}

#[test]
fn config_field_shorthand_records_field() {
    let err = FfsError::config_field("crossing_angle", "must be finite");
    assert_eq!(err.info().code, "invalid-config");
    assert_eq!(
        err.info().context.get("field"),
        Some(&"crossing_angle".to_string())
    );
}

#[test]
fn kinematics_error_surface() {
    let err = FfsError::Kinematics(sample_info("K001", "non-finite momentum"));
    assert_eq!(err.info().code, "K001");
}

#[test]
fn serde_and_io_error_surface() {
    let err = FfsError::Serde(sample_info("S001", "schema mismatch"));
    assert_eq!(err.info().code, "S001");
    let err = FfsError::Io(sample_info("IO01", "missing file").with_hint("check --in"));
    assert_eq!(err.info().hint.as_deref(), Some("check --in"));
}

#[test]
fn display_includes_context_and_hint() {
    let err = FfsError::Kinematics(
        ErrorInfo::new("K002", "non-finite energy")
            .with_context("pdg", "2112")
            .with_hint("check the generator output"),
    );
    let rendered = err.to_string();
    assert!(rendered.starts_with("kinematics error: non-finite energy (code: K002)"));
    assert!(rendered.contains("pdg=2112"));
    assert!(rendered.contains("hint: check the generator output"));
}

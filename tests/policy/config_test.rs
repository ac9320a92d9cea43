/*!
 * Configuration Integration Tests
 * File loading and environment overrides
 */

use handler_guard::{GuardConfig, GuardError, InheritancePolicy, MarkerId};
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::io::Write;

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "markers": ["Secured", "RolesAllowed"], "handler_tag": "Endpoint", "inheritance": "direct", "max_depth": 8 }}"#
    )
    .unwrap();

    let config = GuardConfig::load(file.path()).unwrap();
    assert_eq!(
        config.markers,
        vec![MarkerId::new("Secured"), MarkerId::new("RolesAllowed")]
    );
    assert_eq!(config.handler_tag, MarkerId::new("Endpoint"));
    assert_eq!(config.inheritance, InheritancePolicy::Direct);
    assert_eq!(config.max_depth, 8);
}

#[test]
fn test_zero_depth_rejected() {
    let err = GuardConfig::from_json_str(r#"{ "max_depth": 0 }"#).unwrap_err();
    assert!(matches!(err, GuardError::InvalidConfig { .. }));
}

#[test]
#[serial]
fn test_env_overrides() {
    std::env::set_var("GUARD_MARKERS", "PreAuthorize,PermitAll");
    std::env::set_var("GUARD_INHERITANCE", "composed");
    let config = GuardConfig::default().apply_env();
    std::env::remove_var("GUARD_MARKERS");
    std::env::remove_var("GUARD_INHERITANCE");

    let config = config.unwrap();
    assert_eq!(config.marker_set().len(), 2);
    assert!(config.marker_set().contains(&MarkerId::new("PermitAll")));
    assert_eq!(config.inheritance, InheritancePolicy::Composed);
}

#[test]
#[serial]
fn test_env_empty_marker_list_rejected() {
    std::env::set_var("GUARD_MARKERS", " , ");
    let result = GuardConfig::default().apply_env();
    std::env::remove_var("GUARD_MARKERS");

    assert!(matches!(result, Err(GuardError::InvalidConfig { .. })));
}

#[test]
#[serial]
fn test_no_env_keeps_defaults() {
    let config = GuardConfig::default().apply_env().unwrap();
    assert_eq!(config, GuardConfig::default());
}

use nova_scenelib::{CollectorConfig, SceneError};
use pretty_assertions::assert_eq;

#[test]
fn toml_and_json_describe_the_same_config() {
    let from_toml = CollectorConfig::from_toml_str(
        r#"
include_meta_annotations = true
verify_unification = false
"#,
    )
    .unwrap();
    let from_json = CollectorConfig::from_json_str(
        r#"{ "include_meta_annotations": true, "verify_unification": false }"#,
    )
    .unwrap();
    assert_eq!(from_toml, from_json);
    assert_eq!(
        from_toml,
        CollectorConfig {
            include_meta_annotations: true,
            verify_unification: false,
        }
    );
}

#[test]
fn invalid_values_are_config_errors() {
    let err = CollectorConfig::from_json_str(r#"{ "verify_unification": "yes" }"#).unwrap_err();
    assert!(matches!(err, SceneError::Config(_)));
    assert!(err.to_string().starts_with("invalid collector config"));
}

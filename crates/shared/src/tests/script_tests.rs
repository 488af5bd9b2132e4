use std::path::PathBuf;

use super::*;

#[test]
fn default_script_is_valid() {
    let script = CardScript::default();
    script.validate().expect("default script");
    assert_eq!(script.intro_chars().len(), 5);
}

#[test]
fn empty_overlay_keeps_every_default() {
    let script = CardScript::from_toml_str("").expect("empty overlay");
    assert_eq!(script, CardScript::default());
}

#[test]
fn overlay_replaces_only_named_fields() {
    let raw = r#"
recipient = "Noor"
image_path = "photos/us.png"
"#;
    let script = CardScript::from_toml_str(raw).expect("overlay");
    assert_eq!(script.recipient, "Noor");
    assert_eq!(script.image_path, PathBuf::from("photos/us.png"));
    assert_eq!(script.question, CardScript::default().question);
    assert_eq!(script.success_note, CardScript::default().success_note);
}

#[test]
fn rejects_blank_recipient() {
    let err = CardScript::from_toml_str("recipient = \"   \"").expect_err("blank recipient");
    assert!(matches!(err, ScriptError::Invalid(_)));
}

#[test]
fn rejects_recipient_too_long_for_the_intro() {
    let raw = format!("recipient = \"{}\"", "a".repeat(25));
    let err = CardScript::from_toml_str(&raw).expect_err("long recipient");
    assert!(matches!(err, ScriptError::Invalid(_)));
}

#[test]
fn rejects_blank_control_labels() {
    let err = CardScript::from_toml_str("decline_label = \"\"").expect_err("blank label");
    assert!(matches!(err, ScriptError::Invalid(_)));
}

#[test]
fn rejects_unknown_fields() {
    let err = CardScript::from_toml_str("greeting = \"hello\"").expect_err("unknown field");
    assert!(matches!(err, ScriptError::Parse(_)));
}

#[test]
fn rejects_malformed_toml() {
    let err = CardScript::from_toml_str("recipient = ").expect_err("malformed");
    assert!(matches!(err, ScriptError::Parse(_)));
}

#[test]
fn intro_chars_follow_the_recipient() {
    let mut script = CardScript::default();
    script.recipient = "Amélie".to_string();
    assert_eq!(script.intro_chars(), vec!['A', 'm', 'é', 'l', 'i', 'e']);
}

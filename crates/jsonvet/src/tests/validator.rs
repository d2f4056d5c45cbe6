use alloc::{boxed::Box, vec::Vec};

use crate::{
    diagnostic::{Code, Diagnostic, Severity},
    listener::ValidatingListener,
    manifest::validate_manifest,
    parser::parse,
    validator::NullValidator,
};

fn diagnostics_for(source: &str) -> Vec<Diagnostic> {
    let mut sink = Vec::new();
    validate_manifest(source, &mut sink);
    sink
}

#[test]
fn empty_manifest_is_allowed() {
    assert_eq!(diagnostics_for("{}"), []);
}

#[test]
fn root_must_be_an_object() {
    let diagnostics = diagnostics_for("123");
    assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
    assert_eq!(diagnostics[0].code, Code::TopLevelObject);
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert_eq!(diagnostics[0].span.slice("123"), "123");
}

#[test]
fn root_array_is_rejected_without_cascading() {
    let diagnostics = diagnostics_for(r#"[{"name": 3}]"#);
    assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
    assert_eq!(diagnostics[0].code, Code::TopLevelObject);
}

#[test]
fn manifest_version_must_be_an_integer() {
    let diagnostics = diagnostics_for(r#"{"manifest_version": "x"}"#);
    assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
    assert_eq!(diagnostics[0].code, Code::IntegerExpected);
    assert_eq!(diagnostics[0].severity, Severity::Error);
}

#[test]
fn manifest_version_one_is_an_obsolete_warning() {
    let diagnostics = diagnostics_for(r#"{"manifest_version": 1}"#);
    assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
    assert_eq!(diagnostics[0].code, Code::ObsoleteManifestVersion);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
}

#[test]
fn bad_script_element_is_flagged_on_its_own_span() {
    let source = r#"{"app": {"background": {"scripts": ["a", 1, "b"]}}}"#;
    let diagnostics = diagnostics_for(source);
    assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
    assert_eq!(diagnostics[0].code, Code::StringExpected);
    assert_eq!(diagnostics[0].span.slice(source), "1");
}

#[test]
fn syntax_failure_produces_no_semantic_diagnostics() {
    // "a" is not a manifest property, but its value never completes, so
    // only the syntax failure is reported.
    let source = r#"{"a": }"#;
    let diagnostics = diagnostics_for(source);
    assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
    assert_eq!(diagnostics[0].code, Code::SyntaxError);
    assert_eq!(diagnostics[0].span.slice(source), "}");
}

#[test]
fn unknown_property_is_a_single_warning() {
    let source = r#"{"bogus": 1}"#;
    let diagnostics = diagnostics_for(source);
    assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
    assert_eq!(diagnostics[0].code, Code::UnknownProperty);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(diagnostics[0].span.slice(source), r#""bogus""#);
}

#[test]
fn unknown_property_suppresses_its_subtree() {
    // The nested object would trip the `name` rule if it were interpreted;
    // the unrecognized name is reported once and everything below it is
    // skipped.
    let diagnostics = diagnostics_for(r#"{"bogus": {"name": 1, "deeper": [2]}}"#);
    assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
    assert_eq!(diagnostics[0].code, Code::UnknownProperty);
}

#[test]
fn unknown_property_is_not_reported_when_the_parse_dies_first() {
    let diagnostics = diagnostics_for(r#"{"bogus": {"name": 1, "deeper": [ugh]}}"#);
    assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
    assert_eq!(diagnostics[0].code, Code::SyntaxError);
}

#[test]
fn type_mismatches_report_one_diagnostic_each() {
    let diagnostics =
        diagnostics_for(r#"{"name": 5, "offline_enabled": "yes", "app": 3, "permissions": "p"}"#);
    let codes: Vec<Code> = diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        [
            Code::StringExpected,
            Code::BooleanExpected,
            Code::ObjectExpected,
            Code::ArrayExpected
        ]
    );
}

#[test]
fn object_type_mismatch_does_not_cascade() {
    // `app` should be an object; its array contents are not interpreted.
    let diagnostics = diagnostics_for(r#"{"app": [1, 2, 3]}"#);
    assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
    assert_eq!(diagnostics[0].code, Code::ObjectExpected);
}

#[test]
fn var_descriptor_is_silently_permissive() {
    assert_eq!(
        diagnostics_for(r#"{"icons": {"16": "icon16.png", "128": 128}}"#),
        []
    );
}

#[test]
fn validation_is_idempotent_and_order_stable() {
    let source = r#"{"manifest_version": 1, "name": 5, "junk": true}"#;
    let first = diagnostics_for(source);
    let second = diagnostics_for(source);
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn listener_stacks_rebalance_on_success() {
    let mut sink: Vec<Diagnostic> = Vec::new();
    let mut listener = ValidatingListener::new(Box::new(NullValidator), &mut sink);
    parse(
        r#"{"a": [1, {"b": [[], {"c": null}]}], "d": {}}"#,
        &mut listener,
    )
    .unwrap();
    assert_eq!(listener.depth(), 0);
}

#[test]
fn null_validator_accepts_anything() {
    let mut sink: Vec<Diagnostic> = Vec::new();
    let mut listener = ValidatingListener::new(Box::new(NullValidator), &mut sink);
    parse(r#"{"x": [true, null, {"y": -1.5e3}]}"#, &mut listener).unwrap();
    assert_eq!(sink, []);
}

use alloc::vec::Vec;

use rstest::rstest;

use crate::{
    diagnostic::{Code, Diagnostic, Severity},
    manifest::{MANIFEST_SCHEMA, ManifestValidatorFactory, validate_manifest},
    schema::validate_schema_definition,
};

static FACTORY: ManifestValidatorFactory = ManifestValidatorFactory::new();

fn diagnostics_for(source: &str) -> Vec<Diagnostic> {
    let mut sink = Vec::new();
    validate_manifest(source, &mut sink);
    sink
}

#[test]
fn manifest_schema_definition_is_well_formed() {
    let problems = validate_schema_definition(MANIFEST_SCHEMA, &FACTORY);
    assert!(problems.is_empty(), "{problems:?}");
}

#[test]
fn unresolvable_tags_are_caught_by_the_self_check() {
    use crate::schema::{Schema, SchemaEntry};
    static BROKEN: Schema = Schema(&[
        ("ok", SchemaEntry::Leaf("string")),
        ("bad", SchemaEntry::Map(Schema(&[(
            "inner",
            SchemaEntry::List(&SchemaEntry::Leaf("mystery")),
        )]))),
    ]);
    let problems = validate_schema_definition(BROKEN, &FACTORY);
    assert_eq!(problems.len(), 1, "{problems:?}");
    assert!(problems[0].contains("mystery"));
    assert!(problems[0].contains("bad.inner[]"));
}

#[test]
fn complete_app_manifest_is_clean() {
    let source = r#"{
        "manifest_version": 2,
        "name": "Sample App",
        "short_name": "Sample",
        "version": "1.2.3",
        "description": "Does app things.",
        "default_locale": "en",
        "icons": {"16": "icon16.png", "128": "icon128.png"},
        "offline_enabled": true,
        "app": {
            "background": {
                "scripts": ["background.js", "util.js"],
                "persistent": false
            }
        },
        "permissions": ["storage", "socket", {"socket": {"udp": "send-to"}}],
        "sockets": {"udp": {"send": "*", "bind": "*"}},
        "bluetooth": {"uuids": ["1105", "1106"], "socket": true}
    }"#;
    assert_eq!(diagnostics_for(source), []);
}

#[test]
fn complete_extension_manifest_is_clean() {
    let source = r#"{
        "manifest_version": 2,
        "name": "Sample Extension",
        "version": "0.1",
        "background": {"scripts": ["bg.js"], "persistent": false},
        "browser_action": {"default_title": "Sample"},
        "content_scripts": [{
            "matches": ["https://example.com/*"],
            "js": ["content.js"],
            "run_at": "document_idle",
            "all_frames": false
        }],
        "permissions": ["tabs", "storage"],
        "web_accessible_resources": ["image.png"]
    }"#;
    assert_eq!(diagnostics_for(source), []);
}

#[rstest]
#[case(r#"{"manifest_version": 2}"#, None)]
#[case(r#"{"manifest_version": 1}"#, Some(Code::ObsoleteManifestVersion))]
#[case(r#"{"manifest_version": 3}"#, Some(Code::InvalidManifestVersion))]
#[case(r#"{"manifest_version": -1}"#, Some(Code::InvalidManifestVersion))]
#[case(r#"{"manifest_version": 2.0}"#, Some(Code::IntegerExpected))]
#[case(r#"{"manifest_version": true}"#, Some(Code::IntegerExpected))]
#[case(r#"{"manifest_version": [2]}"#, Some(Code::IntegerExpected))]
fn manifest_version_rules(#[case] source: &str, #[case] expected: Option<Code>) {
    let diagnostics = diagnostics_for(source);
    match expected {
        None => assert_eq!(diagnostics, []),
        Some(code) => {
            assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
            assert_eq!(diagnostics[0].code, code);
        }
    }
}

#[test]
fn unknown_permission_string_is_a_warning_on_its_span() {
    let source = r#"{"permissions": ["storage", "levitation", "socket"]}"#;
    let diagnostics = diagnostics_for(source);
    assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
    assert_eq!(diagnostics[0].code, Code::UnknownPermission);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(diagnostics[0].span.slice(source), r#""levitation""#);
}

#[test]
fn permission_object_accepts_the_fixed_key_set() {
    assert_eq!(
        diagnostics_for(r#"{"permissions": [{"socket": {"udp": "x"}}, {"usbDevices": []}]}"#),
        []
    );
}

#[test]
fn permission_object_with_unknown_key_is_flagged() {
    let source = r#"{"permissions": [{"levitation": {}}]}"#;
    let diagnostics = diagnostics_for(source);
    assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
    assert_eq!(diagnostics[0].code, Code::UnknownPermission);
    assert_eq!(diagnostics[0].span.slice(source), r#""levitation""#);
}

#[test]
fn permission_of_the_wrong_kind_is_flagged() {
    let diagnostics = diagnostics_for(r#"{"permissions": [42]}"#);
    assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
    assert_eq!(diagnostics[0].code, Code::UnknownPermission);
}

#[test]
fn bluetooth_uuids_must_be_an_array() {
    let diagnostics = diagnostics_for(r#"{"bluetooth": {"uuids": "1105"}}"#);
    assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
    assert_eq!(diagnostics[0].code, Code::ArrayExpected);
}

#[test]
fn content_script_js_elements_are_type_checked() {
    let source = r#"{"content_scripts": [{"js": ["a.js", 7]}]}"#;
    let diagnostics = diagnostics_for(source);
    assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
    assert_eq!(diagnostics[0].code, Code::StringExpected);
    assert_eq!(diagnostics[0].span.slice(source), "7");
}

#[test]
fn content_script_elements_must_be_objects() {
    let diagnostics = diagnostics_for(r#"{"content_scripts": ["content.js"]}"#);
    assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
    assert_eq!(diagnostics[0].code, Code::ObjectExpected);
}

#[test]
fn nested_unknown_property_is_scoped_to_its_schema() {
    let source = r#"{"bluetooth": {"uuids": ["1105"], "strength": 11}}"#;
    let diagnostics = diagnostics_for(source);
    assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
    assert_eq!(diagnostics[0].code, Code::UnknownProperty);
    assert_eq!(diagnostics[0].span.slice(source), r#""strength""#);
}

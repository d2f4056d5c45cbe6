//! Chrome app/extension manifest rules: the schema data, the custom value
//! checkers behind the `"manifest_version"` and `"permission"` tags, and
//! the [`validate_manifest`] entry point.
//!
//! The schema accepts the union of the browser-extension and packaged-app
//! top-level property sets; shape rules live in [`MANIFEST_SCHEMA`] and
//! only the two genuinely value-dependent rules are hand-written checkers.

use alloc::{boxed::Box, format, string::String};

use crate::{
    diagnostic::{Code, Diagnostic, ErrorSink},
    entity::{Entity, NumberValue, StringEntity},
    listener::ValidatingListener,
    parser::parse,
    schema::{
        CoreSchemaValidatorFactory, DeferredDiagnosticValidator, RootObjectSchemaValidator, Schema,
        SchemaEntry, SchemaValidatorFactory,
    },
    validator::{NullValidator, Validator},
};

const STRING: SchemaEntry = SchemaEntry::Leaf("string");
const BOOLEAN: SchemaEntry = SchemaEntry::Leaf("boolean");
const VAR: SchemaEntry = SchemaEntry::Leaf("var");
const STRING_LIST: SchemaEntry = SchemaEntry::List(&SchemaEntry::Leaf("string"));
const PERMISSION_LIST: SchemaEntry = SchemaEntry::List(&SchemaEntry::Leaf("permission"));

/// The accepted top-level property set: the union of the browser-extension
/// and packaged-app manifest shapes.
pub static MANIFEST_SCHEMA: Schema = Schema(&[
    // Shared.
    ("name", STRING),
    ("short_name", STRING),
    ("version", STRING),
    ("version_name", STRING),
    ("manifest_version", SchemaEntry::Leaf("manifest_version")),
    ("description", STRING),
    ("icons", VAR),
    ("default_locale", STRING),
    ("author", VAR),
    ("key", STRING),
    ("minimum_chrome_version", STRING),
    ("update_url", STRING),
    ("homepage_url", STRING),
    ("offline_enabled", BOOLEAN),
    ("permissions", PERMISSION_LIST),
    ("optional_permissions", PERMISSION_LIST),
    ("content_security_policy", STRING),
    ("incognito", STRING),
    ("oauth2", SchemaEntry::Map(Schema(&[
        ("client_id", STRING),
        ("scopes", STRING_LIST),
    ]))),
    ("externally_connectable", SchemaEntry::Map(Schema(&[
        ("matches", STRING_LIST),
        ("ids", STRING_LIST),
        ("accepts_tls_channel_id", BOOLEAN),
    ]))),
    // Packaged apps.
    ("app", SchemaEntry::Map(Schema(&[
        ("background", SchemaEntry::Map(Schema(&[
            ("scripts", STRING_LIST),
            ("persistent", BOOLEAN),
        ]))),
        ("content_security_policy", STRING),
        ("launch", VAR),
        ("urls", STRING_LIST),
    ]))),
    ("sockets", SchemaEntry::Map(Schema(&[
        ("udp", SchemaEntry::Map(Schema(&[
            ("bind", VAR),
            ("send", VAR),
            ("multicastMembership", VAR),
        ]))),
        ("tcp", SchemaEntry::Map(Schema(&[("connect", VAR)]))),
        ("tcpServer", SchemaEntry::Map(Schema(&[("listen", VAR)]))),
    ]))),
    ("bluetooth", SchemaEntry::Map(Schema(&[
        ("uuids", STRING_LIST),
        ("socket", BOOLEAN),
        ("low_energy", BOOLEAN),
    ]))),
    ("kiosk_enabled", BOOLEAN),
    ("kiosk_only", BOOLEAN),
    ("file_handlers", VAR),
    ("url_handlers", VAR),
    ("webview", VAR),
    ("sandbox", VAR),
    // Extensions.
    ("background", SchemaEntry::Map(Schema(&[
        ("scripts", STRING_LIST),
        ("page", STRING),
        ("persistent", BOOLEAN),
    ]))),
    ("browser_action", VAR),
    ("page_action", VAR),
    ("content_scripts", SchemaEntry::List(&SchemaEntry::Map(Schema(&[
        ("matches", STRING_LIST),
        ("exclude_matches", STRING_LIST),
        ("js", STRING_LIST),
        ("css", STRING_LIST),
        ("run_at", STRING),
        ("all_frames", BOOLEAN),
    ])))),
    ("options_page", STRING),
    ("devtools_page", STRING),
    ("chrome_url_overrides", VAR),
    ("commands", VAR),
    ("omnibox", SchemaEntry::Map(Schema(&[("keyword", STRING)]))),
    ("web_accessible_resources", STRING_LIST),
]);

/// Permissions meaningful to browser extensions.
static EXTENSION_PERMISSIONS: &[&str] = &[
    "activeTab",
    "alarms",
    "background",
    "bookmarks",
    "browsingData",
    "clipboardRead",
    "clipboardWrite",
    "contentSettings",
    "contextMenus",
    "cookies",
    "debugger",
    "declarativeContent",
    "desktopCapture",
    "downloads",
    "fontSettings",
    "geolocation",
    "history",
    "identity",
    "idle",
    "management",
    "nativeMessaging",
    "notifications",
    "pageCapture",
    "power",
    "privacy",
    "proxy",
    "sessions",
    "storage",
    "tabCapture",
    "tabs",
    "topSites",
    "tts",
    "ttsEngine",
    "unlimitedStorage",
    "webNavigation",
    "webRequest",
    "webRequestBlocking",
];

/// Permissions meaningful to packaged apps.
static APP_PERMISSIONS: &[&str] = &[
    "audio",
    "browser",
    "fileSystem",
    "gcm",
    "hid",
    "mediaGalleries",
    "pointerLock",
    "serial",
    "socket",
    "syncFileSystem",
    "system.cpu",
    "system.display",
    "system.memory",
    "system.network",
    "system.storage",
    "usb",
    "videoCapture",
    "wallpaper",
];

/// Keys accepted in the object form of a permission entry. Their values
/// carry API-specific option shapes that are not constrained here.
static PERMISSION_OBJECT_KEYS: &[&str] = &["socket", "usbDevices", "fileSystem"];

fn is_known_permission(name: &str) -> bool {
    EXTENSION_PERMISSIONS.contains(&name) || APP_PERMISSIONS.contains(&name)
}

/// Resolves the manifest-specific schema tags, falling back to the core
/// factory for the primitive ones.
pub struct ManifestValidatorFactory {
    parent: CoreSchemaValidatorFactory,
}

impl ManifestValidatorFactory {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            parent: CoreSchemaValidatorFactory::new(None),
        }
    }
}

impl Default for ManifestValidatorFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaValidatorFactory for ManifestValidatorFactory {
    fn validator_for(&self, tag: &str) -> Option<Box<dyn Validator>> {
        match tag {
            "manifest_version" => Some(Box::new(ManifestVersionValidator)),
            "permission" => Some(Box::new(PermissionValidator)),
            _ => self.parent.validator_for(tag),
        }
    }
}

static MANIFEST_FACTORY: ManifestValidatorFactory = ManifestValidatorFactory::new();

/// The root validator wired to [`MANIFEST_SCHEMA`] and its factory chain.
#[must_use]
pub fn manifest_validator() -> Box<dyn Validator> {
    Box::new(RootObjectSchemaValidator::new(
        MANIFEST_SCHEMA,
        &MANIFEST_FACTORY,
    ))
}

/// Parses `source` as a manifest and reports every problem to `sink`.
///
/// The two error channels stay separate: a syntax failure is reported once
/// (as a [`Code::SyntaxError`] diagnostic, through the listener's `fail`
/// hook) and structural feedback stops there; semantic diagnostics are
/// exhaustive within whatever parsed successfully.
pub fn validate_manifest(source: &str, sink: &mut dyn ErrorSink) {
    let mut listener = ValidatingListener::new(manifest_validator(), sink);
    let _already_reported = parse(source, &mut listener);
}

/// `manifest_version` must be the integer 2; 1 is obsolete but tolerated.
struct ManifestVersionValidator;

impl Validator for ManifestVersionValidator {
    fn property_value(&mut self, value: &Entity, sink: &mut dyn ErrorSink) {
        match value {
            Entity::Number {
                span,
                value: NumberValue::Int(version),
            } => match *version {
                2 => {}
                1 => sink.report(Diagnostic::warning(
                    *span,
                    Code::ObsoleteManifestVersion,
                    String::from("manifest version 1 is obsolete; use version 2"),
                )),
                _ => sink.report(Diagnostic::error(
                    *span,
                    Code::InvalidManifestVersion,
                    format!("invalid manifest version: {version}"),
                )),
            },
            other => sink.report(Diagnostic::error(
                other.span(),
                Code::IntegerExpected,
                String::from("integer value expected"),
            )),
        }
    }
}

/// A permission entry: a name from one of the two fixed sets, or an object
/// whose keys come from [`PERMISSION_OBJECT_KEYS`].
struct PermissionValidator;

impl PermissionValidator {
    fn check(value: &Entity, sink: &mut dyn ErrorSink) {
        match value {
            Entity::String(name) => {
                if !is_known_permission(&name.text) {
                    sink.report(Diagnostic::warning(
                        name.span,
                        Code::UnknownPermission,
                        format!("permission '{}' is not recognized", name.text),
                    ));
                }
            }
            // Object-form keys were vetted while the object was open.
            Entity::Object(..) => {}
            other => sink.report(Diagnostic::warning(
                other.span(),
                Code::UnknownPermission,
                String::from("permission must be a string or an object"),
            )),
        }
    }
}

impl Validator for PermissionValidator {
    fn enter_object(&mut self, _sink: &mut dyn ErrorSink) -> Box<dyn Validator> {
        Box::new(PermissionObjectValidator)
    }

    fn property_value(&mut self, value: &Entity, sink: &mut dyn ErrorSink) {
        Self::check(value, sink);
    }

    fn array_element(&mut self, element: &Entity, sink: &mut dyn ErrorSink) {
        Self::check(element, sink);
    }
}

struct PermissionObjectValidator;

impl Validator for PermissionObjectValidator {
    fn property_name(
        &mut self,
        name: &StringEntity,
        _sink: &mut dyn ErrorSink,
    ) -> Box<dyn Validator> {
        if PERMISSION_OBJECT_KEYS.contains(&name.text.as_str()) {
            Box::new(NullValidator)
        } else {
            Box::new(DeferredDiagnosticValidator::new(Diagnostic::warning(
                name.span,
                Code::UnknownPermission,
                format!("permission '{}' is not recognized", name.text),
            )))
        }
    }
}

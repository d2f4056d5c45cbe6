//! Schema-driven validators: a recursive-descent interpreter over
//! declarative schema data, driven by the event stream instead of by
//! direct recursive calls.
//!
//! A [`Schema`] maps property names to [`SchemaEntry`] descriptors: a
//! primitive or custom-checker tag, a nested sub-schema, or
//! "array whose every element matches". Custom tags are resolved through a
//! [`SchemaValidatorFactory`] chain, so a domain factory (for tags like
//! `"manifest_version"`) composes with the core factory that interprets
//! the primitive tags.
//!
//! The general rule is *report once per violation, do not cascade*: a
//! scope-level mismatch (say, a string where an object was expected)
//! produces one diagnostic and the mismatched scope's contents are handed
//! to the null validator. Descriptor `"var"` is the other, distinct
//! outcome: silently permissive, no diagnostic at all.

use alloc::{boxed::Box, format, string::String, vec::Vec};

use crate::{
    diagnostic::{Code, Diagnostic, ErrorSink},
    entity::{Entity, EntityKind, StringEntity},
    validator::{NullValidator, Validator},
};

/// A declarative descriptor for the expected shape of a JSON value.
#[derive(Debug, Clone, Copy)]
pub enum SchemaEntry {
    /// A primitive type tag (`"string"`, `"boolean"`, `"int"`, `"num"`,
    /// `"var"`) or a custom-checker tag resolved through the factory chain.
    Leaf(&'static str),
    /// A nested object with its own schema.
    Map(Schema),
    /// An array whose every element matches the inner descriptor.
    List(&'static SchemaEntry),
}

/// A property-name → descriptor mapping, expressed as static data.
///
/// Schemas are plain `'static` tables — there is no schema file format and
/// nothing is read at runtime. They are immutable and safe to share across
/// threads.
#[derive(Debug, Clone, Copy)]
pub struct Schema(pub &'static [(&'static str, SchemaEntry)]);

impl Schema {
    #[must_use]
    pub fn get(self, name: &str) -> Option<&'static SchemaEntry> {
        self.0
            .iter()
            .find(|(property, _)| *property == name)
            .map(|(_, entry)| entry)
    }
}

/// Resolves custom schema tags to value-level checkers.
///
/// Returns `None` for tags this factory does not recognize; factories hold
/// a parent to fall back to, which is how a domain-specific factory chains
/// onto [`CoreSchemaValidatorFactory`].
pub trait SchemaValidatorFactory: Sync {
    fn validator_for(&self, tag: &str) -> Option<Box<dyn Validator>>;
}

/// The generic factory: interprets the primitive type tags.
///
/// `"var"` resolves to the null validator (anything passes); the four
/// typed tags resolve to checkers that report `*Expected` diagnostics on a
/// kind mismatch. Unrecognized tags go to the parent factory.
pub struct CoreSchemaValidatorFactory {
    parent: Option<&'static dyn SchemaValidatorFactory>,
}

impl CoreSchemaValidatorFactory {
    #[must_use]
    pub const fn new(parent: Option<&'static dyn SchemaValidatorFactory>) -> Self {
        Self { parent }
    }
}

impl SchemaValidatorFactory for CoreSchemaValidatorFactory {
    fn validator_for(&self, tag: &str) -> Option<Box<dyn Validator>> {
        match tag {
            "string" => Some(Box::new(TypeValidator::new(Expected::String))),
            "boolean" => Some(Box::new(TypeValidator::new(Expected::Boolean))),
            "int" => Some(Box::new(TypeValidator::new(Expected::Int))),
            "num" => Some(Box::new(TypeValidator::new(Expected::Num))),
            "var" => Some(Box::new(NullValidator)),
            _ => self.parent.and_then(|parent| parent.validator_for(tag)),
        }
    }
}

/// Maps a descriptor to the validator that checks a value against it.
fn resolve_entry(
    entry: &'static SchemaEntry,
    factory: &'static dyn SchemaValidatorFactory,
) -> Box<dyn Validator> {
    match entry {
        // An unresolvable tag is a schema-definition bug, caught ahead of
        // time by `validate_schema_definition`; at document-validation
        // time the content is simply left unchecked.
        SchemaEntry::Leaf(tag) => factory
            .validator_for(tag)
            .unwrap_or_else(|| Box::new(NullValidator)),
        SchemaEntry::Map(schema) => Box::new(ObjectValueValidator {
            schema: *schema,
            factory,
        }),
        SchemaEntry::List(element) => Box::new(ArrayValueValidator { element, factory }),
    }
}

/// The entry point validator for a schema-validated document.
///
/// The root of the document must be an object conforming to `schema`; any
/// other root value is a [`Code::TopLevelObject`] error.
pub struct RootObjectSchemaValidator {
    schema: Schema,
    factory: &'static dyn SchemaValidatorFactory,
}

impl RootObjectSchemaValidator {
    #[must_use]
    pub fn new(schema: Schema, factory: &'static dyn SchemaValidatorFactory) -> Self {
        Self { schema, factory }
    }
}

impl Validator for RootObjectSchemaValidator {
    fn enter_object(&mut self, _sink: &mut dyn ErrorSink) -> Box<dyn Validator> {
        Box::new(ObjectPropertiesValidator {
            schema: self.schema,
            factory: self.factory,
        })
    }

    fn root_value(&mut self, value: &Entity, sink: &mut dyn ErrorSink) {
        if !value.is_object() {
            sink.report(Diagnostic::error(
                value.span(),
                Code::TopLevelObject,
                String::from("top-level element must be an object"),
            ));
        }
    }
}

/// Active inside an object scope; dispatches each property name through
/// the schema mapping.
struct ObjectPropertiesValidator {
    schema: Schema,
    factory: &'static dyn SchemaValidatorFactory,
}

impl Validator for ObjectPropertiesValidator {
    fn property_name(
        &mut self,
        name: &StringEntity,
        _sink: &mut dyn ErrorSink,
    ) -> Box<dyn Validator> {
        match self.schema.get(&name.text) {
            Some(entry) => resolve_entry(entry, self.factory),
            None => Box::new(DeferredDiagnosticValidator::new(Diagnostic::warning(
                name.span,
                Code::UnknownProperty,
                format!("property '{}' is not recognized", name.text),
            ))),
        }
    }
}

/// Holds a prepared diagnostic and reports it once the offending scope's
/// value actually completes, suppressing everything nested inside it.
///
/// Deferring to `property_value` keeps a document that dies with a syntax
/// error before the value from producing semantic diagnostics for content
/// the validator never reached.
pub(crate) struct DeferredDiagnosticValidator {
    diagnostic: Option<Diagnostic>,
}

impl DeferredDiagnosticValidator {
    pub(crate) fn new(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostic: Some(diagnostic),
        }
    }

    fn report(&mut self, sink: &mut dyn ErrorSink) {
        if let Some(diagnostic) = self.diagnostic.take() {
            sink.report(diagnostic);
        }
    }
}

impl Validator for DeferredDiagnosticValidator {
    fn property_value(&mut self, _value: &Entity, sink: &mut dyn ErrorSink) {
        self.report(sink);
    }

    fn array_element(&mut self, _element: &Entity, sink: &mut dyn ErrorSink) {
        self.report(sink);
    }
}

#[derive(Debug, Clone, Copy)]
enum Expected {
    String,
    Boolean,
    Int,
    Num,
}

impl Expected {
    fn matches(self, kind: EntityKind) -> bool {
        match self {
            Expected::String => kind == EntityKind::String,
            Expected::Boolean => kind == EntityKind::Bool,
            Expected::Int => kind == EntityKind::Integer,
            Expected::Num => matches!(kind, EntityKind::Integer | EntityKind::Float),
        }
    }

    fn code(self) -> Code {
        match self {
            Expected::String => Code::StringExpected,
            Expected::Boolean => Code::BooleanExpected,
            Expected::Int => Code::IntegerExpected,
            Expected::Num => Code::NumberExpected,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Expected::String => "string",
            Expected::Boolean => "boolean",
            Expected::Int => "integer",
            Expected::Num => "number",
        }
    }
}

/// Checks a single value's runtime kind against an expected primitive.
struct TypeValidator {
    expected: Expected,
}

impl TypeValidator {
    fn new(expected: Expected) -> Self {
        Self { expected }
    }

    fn check(&self, value: &Entity, sink: &mut dyn ErrorSink) {
        if !self.expected.matches(value.kind()) {
            sink.report(Diagnostic::error(
                value.span(),
                self.expected.code(),
                format!("{} value expected", self.expected.describe()),
            ));
        }
    }
}

impl Validator for TypeValidator {
    fn property_value(&mut self, value: &Entity, sink: &mut dyn ErrorSink) {
        self.check(value, sink);
    }

    fn array_element(&mut self, element: &Entity, sink: &mut dyn ErrorSink) {
        self.check(element, sink);
    }
}

/// Checks that a value is an object and descends into its sub-schema.
struct ObjectValueValidator {
    schema: Schema,
    factory: &'static dyn SchemaValidatorFactory,
}

impl ObjectValueValidator {
    fn check(&self, value: &Entity, sink: &mut dyn ErrorSink) {
        if !value.is_object() {
            sink.report(Diagnostic::error(
                value.span(),
                Code::ObjectExpected,
                String::from("object value expected"),
            ));
        }
    }
}

impl Validator for ObjectValueValidator {
    fn enter_object(&mut self, _sink: &mut dyn ErrorSink) -> Box<dyn Validator> {
        Box::new(ObjectPropertiesValidator {
            schema: self.schema,
            factory: self.factory,
        })
    }

    fn property_value(&mut self, value: &Entity, sink: &mut dyn ErrorSink) {
        self.check(value, sink);
    }

    fn array_element(&mut self, element: &Entity, sink: &mut dyn ErrorSink) {
        self.check(element, sink);
    }
}

/// Checks that a value is an array and applies the element descriptor to
/// every element.
struct ArrayValueValidator {
    element: &'static SchemaEntry,
    factory: &'static dyn SchemaValidatorFactory,
}

impl ArrayValueValidator {
    fn check(&self, value: &Entity, sink: &mut dyn ErrorSink) {
        if !value.is_array() {
            sink.report(Diagnostic::error(
                value.span(),
                Code::ArrayExpected,
                String::from("array value expected"),
            ));
        }
    }
}

impl Validator for ArrayValueValidator {
    fn enter_array(&mut self, _sink: &mut dyn ErrorSink) -> Box<dyn Validator> {
        Box::new(ArrayElementsValidator {
            element: resolve_entry(self.element, self.factory),
        })
    }

    fn property_value(&mut self, value: &Entity, sink: &mut dyn ErrorSink) {
        self.check(value, sink);
    }

    fn array_element(&mut self, element: &Entity, sink: &mut dyn ErrorSink) {
        self.check(element, sink);
    }
}

/// Active inside an array scope; every element is checked against the one
/// resolved element validator (element checkers are stateless across
/// values, so one instance serves the whole array).
struct ArrayElementsValidator {
    element: Box<dyn Validator>,
}

impl Validator for ArrayElementsValidator {
    fn enter_object(&mut self, sink: &mut dyn ErrorSink) -> Box<dyn Validator> {
        self.element.enter_object(sink)
    }

    fn enter_array(&mut self, sink: &mut dyn ErrorSink) -> Box<dyn Validator> {
        self.element.enter_array(sink)
    }

    fn array_element(&mut self, element: &Entity, sink: &mut dyn ErrorSink) {
        self.element.array_element(element, sink);
    }
}

/// Walks a schema definition and asserts every descriptor is one of the
/// recognized shapes and every leaf tag resolves through `factory`.
///
/// This is a schema-of-schemas sanity check meant for test or build time,
/// not for document-validation time. Returns one message per problem;
/// empty means the schema is well-formed.
#[must_use]
pub fn validate_schema_definition(
    schema: Schema,
    factory: &'static dyn SchemaValidatorFactory,
) -> Vec<String> {
    let mut problems = Vec::new();
    walk_schema(schema, factory, "", &mut problems);
    problems
}

fn walk_schema(
    schema: Schema,
    factory: &'static dyn SchemaValidatorFactory,
    path: &str,
    problems: &mut Vec<String>,
) {
    for (name, entry) in schema.0 {
        let child_path = if path.is_empty() {
            String::from(*name)
        } else {
            format!("{path}.{name}")
        };
        walk_entry(entry, factory, &child_path, problems);
    }
}

fn walk_entry(
    entry: &SchemaEntry,
    factory: &'static dyn SchemaValidatorFactory,
    path: &str,
    problems: &mut Vec<String>,
) {
    match entry {
        SchemaEntry::Leaf(tag) => {
            if factory.validator_for(tag).is_none() {
                problems.push(format!("unresolvable schema tag '{tag}' at '{path}'"));
            }
        }
        SchemaEntry::Map(schema) => walk_schema(*schema, factory, path, problems),
        SchemaEntry::List(element) => walk_entry(element, factory, &format!("{path}[]"), problems),
    }
}

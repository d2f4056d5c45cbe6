//! A streaming, single-pass JSON parser that tracks precise source spans,
//! paired with an event-driven schema-validation framework.
//!
//! The parser ([`parse`]) turns raw JSON text into a stream of structural and
//! value callbacks on a [`Listener`] without building a document tree. The
//! validator layer consumes those callbacks through a polymorphic
//! [`Validator`] visitor whose concrete implementations interpret a
//! declarative [`Schema`], emitting [`Diagnostic`]s anchored to exact source
//! spans.
//!
//! ```rust
//! use jsonvet::{Diagnostic, validate_manifest};
//!
//! let mut diagnostics: Vec<Diagnostic> = Vec::new();
//! validate_manifest(r#"{"manifest_version": 2, "name": "hi"}"#, &mut diagnostics);
//! assert!(diagnostics.is_empty());
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod diagnostic;
mod entity;
mod error;
mod listener;
mod manifest;
mod parser;
mod schema;
mod span;
mod validator;

#[cfg(test)]
mod tests;

pub use diagnostic::{Code, Diagnostic, ErrorSink, Severity};
pub use entity::{ArrayEntity, Entity, EntityKind, NumberValue, ObjectEntity, StringEntity};
pub use error::{ParseError, SyntaxErrorKind};
pub use listener::ValidatingListener;
pub use manifest::{MANIFEST_SCHEMA, ManifestValidatorFactory, manifest_validator, validate_manifest};
pub use parser::{Listener, parse};
pub use schema::{
    CoreSchemaValidatorFactory, RootObjectSchemaValidator, Schema, SchemaEntry,
    SchemaValidatorFactory, validate_schema_definition,
};
pub use span::{LineColumn, LineIndex, Span};
pub use validator::{NullValidator, Validator};

//! User-facing diagnostics and the sink they flow into.
//!
//! The core never formats, persists, or displays diagnostics; it hands each
//! one to an [`ErrorSink`] and moves on. Semantic (validator-level)
//! diagnostics never abort processing — every rule violation is reported
//! independently and validation continues past it.

use alloc::{string::String, vec::Vec};

use crate::span::Span;

/// How serious a diagnostic is.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Stable category identifier for a diagnostic.
///
/// Codes let collaborators (editor markers, test assertions) key off the
/// rule that fired without string-matching the rendered message.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Code {
    /// The document's root value is not an object.
    TopLevelObject,
    StringExpected,
    IntegerExpected,
    NumberExpected,
    BooleanExpected,
    ObjectExpected,
    ArrayExpected,
    /// A property name absent from the schema.
    UnknownProperty,
    ObsoleteManifestVersion,
    InvalidManifestVersion,
    UnknownPermission,
    /// A parser-level failure surfaced through the sink.
    SyntaxError,
}

/// One reported problem, anchored to an exact source span.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub span: Span,
    pub severity: Severity,
    pub code: Code,
    pub message: String,
}

impl Diagnostic {
    #[must_use]
    pub fn error(span: Span, code: Code, message: String) -> Self {
        Self {
            span,
            severity: Severity::Error,
            code,
            message,
        }
    }

    #[must_use]
    pub fn warning(span: Span, code: Code, message: String) -> Self {
        Self {
            span,
            severity: Severity::Warning,
            code,
            message,
        }
    }
}

/// Receiver for diagnostics.
///
/// Mapping spans to markers, severities to squiggles, and so on is the
/// sink's job, not the core's.
pub trait ErrorSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// The standard collecting sink.
impl ErrorSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

//! The parser's single distinguished failure type.
//!
//! Syntax errors are reported once through [`Listener::fail`] and then
//! returned, so callers can reliably tell "syntax failure, abandon parse"
//! apart from anything else. No recovery or resync is attempted.
//!
//! [`Listener::fail`]: crate::Listener::fail

use thiserror::Error;

use crate::span::Span;

/// The grammar violation behind a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SyntaxErrorKind {
    #[error("unexpected token")]
    UnexpectedToken,
    #[error("unexpected identifier")]
    UnexpectedIdentifier,
    #[error("unexpected end of file")]
    UnexpectedEndOfFile,
    #[error("unterminated string")]
    UnterminatedString,
    #[error("control character in string")]
    ControlCharacterInString,
    #[error("invalid escape sequence")]
    InvalidEscape,
    #[error("invalid number")]
    InvalidNumber,
}

/// An unrecoverable syntax error, with a best-effort span for diagnostics.
///
/// The span covers the offending token where one exists, or a bounded
/// lookahead window near the failure position otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at {}..{}", span.start, span.end)]
pub struct ParseError {
    pub kind: SyntaxErrorKind,
    pub span: Span,
}

impl ParseError {
    #[must_use]
    pub fn new(kind: SyntaxErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

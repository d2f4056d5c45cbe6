//! JSON entities: span-tagged values built by the listener adapter.
//!
//! Entities are produced from raw parser callbacks, handed to the active
//! [`Validator`](crate::Validator) for its scope, and then discarded — no
//! document tree is retained, which is what keeps the pipeline streaming.
//! Container entities record only their span (and, for arrays, the element
//! count); their contents were already validated while they were open.

use alloc::string::String;

use crate::span::Span;

/// A parsed JSON number, classified as integer or floating point.
///
/// The classification follows the literal: a number with a fraction or an
/// exponent is a `Float`, otherwise an `Int`. `-0` therefore parses as
/// `Float(-0.0)` while `0` is `Int(0)`. Integer literals that overflow `i64`
/// fall back to `Float`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberValue {
    Int(i64),
    Float(f64),
}

impl NumberValue {
    /// Returns `true` if the value is [`Int`].
    ///
    /// [`Int`]: NumberValue::Int
    #[must_use]
    pub fn is_int(&self) -> bool {
        matches!(self, Self::Int(..))
    }
}

/// A string value (or object key) with its source span.
///
/// The span includes both quote delimiters; `text` holds the unescaped
/// contents.
#[derive(Debug, Clone, PartialEq)]
pub struct StringEntity {
    pub span: Span,
    pub text: String,
}

/// A closed array. The span covers `[` through `]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrayEntity {
    pub span: Span,
    pub len: usize,
}

/// A closed object. The span covers `{` through `}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectEntity {
    pub span: Span,
}

/// The kind of an [`Entity`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    String,
    Integer,
    Float,
    Bool,
    Null,
    Array,
    Object,
}

/// A value or container produced during parsing, tagged by kind.
///
/// Every entity carries a span into the source text.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    String(StringEntity),
    Number { span: Span, value: NumberValue },
    Bool { span: Span, value: bool },
    Null { span: Span },
    Array(ArrayEntity),
    Object(ObjectEntity),
}

impl Entity {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Entity::String(s) => s.span,
            Entity::Number { span, .. }
            | Entity::Bool { span, .. }
            | Entity::Null { span } => *span,
            Entity::Array(a) => a.span,
            Entity::Object(o) => o.span,
        }
    }

    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::String(..) => EntityKind::String,
            Entity::Number { value, .. } => {
                if value.is_int() {
                    EntityKind::Integer
                } else {
                    EntityKind::Float
                }
            }
            Entity::Bool { .. } => EntityKind::Bool,
            Entity::Null { .. } => EntityKind::Null,
            Entity::Array(..) => EntityKind::Array,
            Entity::Object(..) => EntityKind::Object,
        }
    }

    /// Returns `true` if the entity is [`Object`].
    ///
    /// [`Object`]: Entity::Object
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    /// Returns `true` if the entity is [`Array`].
    ///
    /// [`Array`]: Entity::Array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the entity is [`String`].
    ///
    /// [`String`]: Entity::String
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }
}

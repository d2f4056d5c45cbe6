//! The streaming JSON parser.
//!
//! [`parse`] scans a complete in-memory source string in a single pass and
//! emits structural and value callbacks on a [`Listener`], tracking the
//! exact source span of every token and container. No parse tree is built;
//! the listener sees each value once and the parser moves on.
//!
//! The grammar is strict JSON: the four RFC whitespace characters, no
//! trailing commas, no comments, exactly one root value.
//!
//! # Examples
//!
//! ```rust
//! use jsonvet::{Listener, NumberValue, Span, parse};
//!
//! #[derive(Default)]
//! struct Numbers(Vec<(Span, NumberValue)>);
//!
//! impl Listener for Numbers {
//!     fn handle_number(&mut self, span: Span, value: NumberValue) {
//!         self.0.push((span, value));
//!     }
//! }
//!
//! let mut numbers = Numbers::default();
//! parse("[1, 2.5]", &mut numbers).unwrap();
//! assert_eq!(numbers.0[0], (Span { start: 1, end: 2 }, NumberValue::Int(1)));
//! ```

use alloc::{string::String, vec::Vec};

use crate::{
    entity::NumberValue,
    error::{ParseError, SyntaxErrorKind},
    span::Span,
};

/// Callbacks emitted by [`parse`], all defaulted to no-ops.
///
/// Structural callbacks follow the document's nesting exactly:
/// `begin_object` / `end_object` and `begin_array` / `end_array` are always
/// balanced, `property_name` fires once per object member (after the colon,
/// with the name itself delivered through the preceding `handle_string`),
/// and `property_value` / `array_element` fire after each completed member
/// or element — including the last one, just before the container closes.
pub trait Listener {
    /// A completed string literal. `span` includes both quotes; `value` is
    /// the unescaped contents. Also delivers object keys, which are
    /// followed by [`property_name`](Listener::property_name).
    fn handle_string(&mut self, _span: Span, _value: String) {}
    fn handle_number(&mut self, _span: Span, _value: NumberValue) {}
    fn handle_bool(&mut self, _span: Span, _value: bool) {}
    fn handle_null(&mut self, _span: Span) {}

    /// An object opened at byte offset `start`.
    fn begin_object(&mut self, _start: usize) {}
    /// The string just delivered is a property name, not a value.
    fn property_name(&mut self) {}
    /// The current object member's value is complete.
    fn property_value(&mut self) {}
    /// An object closed; `span` covers `{` through `}`.
    fn end_object(&mut self, _span: Span) {}

    /// An array opened at byte offset `start`.
    fn begin_array(&mut self, _start: usize) {}
    /// The current array element is complete.
    fn array_element(&mut self) {}
    /// An array closed; `span` covers `[` through `]`.
    fn end_array(&mut self, _span: Span) {}

    /// The root value is complete and only trailing whitespace followed it.
    fn end_document(&mut self) {}

    /// The parse hit an unrecoverable syntax error. Called exactly once,
    /// immediately before [`parse`] returns `Err` with the same error.
    fn fail(&mut self, _span: Span, _error: &ParseError) {}
}

/// Parses `source`, driving `listener`. Fails on the first syntax error.
///
/// The error is reported through [`Listener::fail`] before this returns, so
/// callers should treat any `Err` as "already reported": the document is
/// only partially parsed and no recovery is attempted.
///
/// # Errors
///
/// Returns the [`ParseError`] for the first grammar violation encountered.
pub fn parse(source: &str, listener: &mut dyn Listener) -> Result<(), ParseError> {
    let mut parser = Parser::new(source, listener);
    match parser.run() {
        Ok(()) => Ok(()),
        Err(error) => {
            parser.listener.fail(error.span, &error);
            Err(error)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Start,
    /// Inside `{`, nothing parsed yet: `}` or a property name may follow.
    BeforeFirstPropertyName,
    /// After a `,` inside an object: only a property name may follow.
    BeforePropertyName,
    AfterPropertyName,
    BeforePropertyValue,
    /// Inside `[`, nothing parsed yet: `]` or a value may follow.
    BeforeFirstArrayValue,
    /// After a `,` inside an array: only a value may follow.
    BeforeArrayValue,
    AfterPropertyValue,
    AfterArrayValue,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContainerKind {
    Array,
    Object,
}

/// One open container: its kind and the offset of its opening bracket,
/// kept so the close span can cover the whole container.
#[derive(Debug, Clone, Copy)]
struct Frame {
    kind: ContainerKind,
    start: usize,
}

struct Parser<'a, 'l> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    state: ParseState,
    frames: Vec<Frame>,
    listener: &'l mut dyn Listener,
}

impl<'a, 'l> Parser<'a, 'l> {
    fn new(source: &'a str, listener: &'l mut dyn Listener) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            state: ParseState::Start,
            frames: Vec::with_capacity(8),
            listener,
        }
    }

    fn run(&mut self) -> Result<(), ParseError> {
        use ParseState::*;

        loop {
            self.skip_whitespace();
            match self.state {
                Start | BeforePropertyValue | BeforeArrayValue => self.parse_value()?,

                BeforeFirstArrayValue => {
                    if self.peek() == Some(b']') {
                        self.close_container(ContainerKind::Array)?;
                    } else {
                        self.parse_value()?;
                    }
                }

                BeforeFirstPropertyName => match self.peek() {
                    Some(b'}') => self.close_container(ContainerKind::Object)?,
                    Some(b'"') => self.parse_property_name()?,
                    Some(_) => return Err(self.unexpected_token()),
                    None => return Err(self.unexpected_eof()),
                },

                BeforePropertyName => match self.peek() {
                    Some(b'"') => self.parse_property_name()?,
                    Some(_) => return Err(self.unexpected_token()),
                    None => return Err(self.unexpected_eof()),
                },

                AfterPropertyName => match self.peek() {
                    Some(b':') => {
                        self.pos += 1;
                        self.listener.property_name();
                        self.state = BeforePropertyValue;
                    }
                    Some(_) => return Err(self.unexpected_token()),
                    None => return Err(self.unexpected_eof()),
                },

                AfterPropertyValue => match self.peek() {
                    Some(b',') => {
                        self.pos += 1;
                        self.listener.property_value();
                        self.state = BeforePropertyName;
                    }
                    Some(b'}') => {
                        self.listener.property_value();
                        self.close_container(ContainerKind::Object)?;
                    }
                    Some(_) => return Err(self.unexpected_token()),
                    None => return Err(self.unexpected_eof()),
                },

                AfterArrayValue => match self.peek() {
                    Some(b',') => {
                        self.pos += 1;
                        self.listener.array_element();
                        self.state = BeforeArrayValue;
                    }
                    Some(b']') => {
                        self.listener.array_element();
                        self.close_container(ContainerKind::Array)?;
                    }
                    Some(_) => return Err(self.unexpected_token()),
                    None => return Err(self.unexpected_eof()),
                },

                End => match self.peek() {
                    None => {
                        self.listener.end_document();
                        return Ok(());
                    }
                    Some(_) => return Err(self.unexpected_token()),
                },
            }
        }
    }

    // ------------------------------------------------------------------
    // Values
    // ------------------------------------------------------------------

    fn parse_value(&mut self) -> Result<(), ParseError> {
        match self.peek() {
            Some(b'{') => {
                let start = self.pos;
                self.pos += 1;
                self.frames.push(Frame {
                    kind: ContainerKind::Object,
                    start,
                });
                self.listener.begin_object(start);
                self.state = ParseState::BeforeFirstPropertyName;
                Ok(())
            }
            Some(b'[') => {
                let start = self.pos;
                self.pos += 1;
                self.frames.push(Frame {
                    kind: ContainerKind::Array,
                    start,
                });
                self.listener.begin_array(start);
                self.state = ParseState::BeforeFirstArrayValue;
                Ok(())
            }
            Some(b'"') => {
                let (span, text) = self.scan_string()?;
                self.listener.handle_string(span, text);
                self.value_completed();
                Ok(())
            }
            Some(b'-' | b'0'..=b'9') => {
                let (span, value) = self.scan_number()?;
                self.listener.handle_number(span, value);
                self.value_completed();
                Ok(())
            }
            Some(b't' | b'f' | b'n') => {
                self.scan_keyword()?;
                self.value_completed();
                Ok(())
            }
            Some(_) => Err(self.unexpected_token()),
            None => Err(self.unexpected_eof()),
        }
    }

    /// A complete value was delivered; restore the enclosing state.
    fn value_completed(&mut self) {
        self.state = match self.frames.last() {
            None => ParseState::End,
            Some(Frame {
                kind: ContainerKind::Array,
                ..
            }) => ParseState::AfterArrayValue,
            Some(Frame {
                kind: ContainerKind::Object,
                ..
            }) => ParseState::AfterPropertyValue,
        };
    }

    fn parse_property_name(&mut self) -> Result<(), ParseError> {
        let (span, text) = self.scan_string()?;
        self.listener.handle_string(span, text);
        self.state = ParseState::AfterPropertyName;
        Ok(())
    }

    /// Consumes the closing bracket, pops the frame, and emits the end
    /// event with a span covering the whole container.
    fn close_container(&mut self, kind: ContainerKind) -> Result<(), ParseError> {
        self.pos += 1;
        let frame = match self.frames.pop() {
            Some(frame) => frame,
            None => return Err(self.unexpected_token()),
        };
        debug_assert_eq!(frame.kind, kind, "container frame out of sync");
        let span = Span::new(frame.start, self.pos);
        match kind {
            ContainerKind::Object => self.listener.end_object(span),
            ContainerKind::Array => self.listener.end_array(span),
        }
        self.value_completed();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Scanners
    // ------------------------------------------------------------------

    /// Scans a string literal the cursor is sitting on the opening quote
    /// of. The returned span includes both quotes.
    fn scan_string(&mut self) -> Result<(Span, String), ParseError> {
        let start = self.pos;
        self.pos += 1; // opening quote
        let mut text = String::new();

        loop {
            // Fast path: copy the longest run of verbatim characters in one
            // slice. Multi-byte UTF-8 units are all >= 0x80 and pass
            // through, so runs only break at ASCII bytes and the slice
            // boundaries stay on char boundaries.
            let run_start = self.pos;
            while let Some(&b) = self.bytes.get(self.pos) {
                if b == b'"' || b == b'\\' || b < 0x20 {
                    break;
                }
                self.pos += 1;
            }
            if self.pos > run_start {
                text.push_str(&self.source[run_start..self.pos]);
            }

            match self.peek() {
                Some(b'"') => {
                    self.pos += 1;
                    return Ok((Span::new(start, self.pos), text));
                }
                Some(b'\\') => {
                    self.pos += 1;
                    self.scan_escape(&mut text, start)?;
                }
                Some(_) => {
                    return Err(self.error_here(SyntaxErrorKind::ControlCharacterInString));
                }
                None => {
                    return Err(ParseError::new(
                        SyntaxErrorKind::UnterminatedString,
                        Span::new(start, self.pos),
                    ));
                }
            }
        }
    }

    /// Scans one escape sequence, cursor just past the backslash.
    fn scan_escape(&mut self, text: &mut String, string_start: usize) -> Result<(), ParseError> {
        let escape_start = self.pos - 1;
        let decoded = match self.peek() {
            Some(b'"') => '"',
            Some(b'\\') => '\\',
            Some(b'/') => '/',
            Some(b'b') => '\u{0008}',
            Some(b'f') => '\u{000C}',
            Some(b'n') => '\n',
            Some(b'r') => '\r',
            Some(b't') => '\t',
            Some(b'u') => {
                self.pos += 1;
                return self.scan_unicode_escape(text, escape_start);
            }
            Some(_) => {
                return Err(ParseError::new(
                    SyntaxErrorKind::InvalidEscape,
                    Span::new(escape_start, self.next_char_end()),
                ));
            }
            None => {
                return Err(ParseError::new(
                    SyntaxErrorKind::UnterminatedString,
                    Span::new(string_start, self.pos),
                ));
            }
        };
        self.pos += 1;
        text.push(decoded);
        Ok(())
    }

    /// Decodes `\uXXXX`, cursor just past the `u`. A high surrogate is
    /// paired with an immediately following `\uXXXX` low surrogate;
    /// unpaired halves decode to U+FFFD.
    fn scan_unicode_escape(
        &mut self,
        text: &mut String,
        escape_start: usize,
    ) -> Result<(), ParseError> {
        let unit = self.hex4(escape_start)?;
        if !(0xD800..0xE000).contains(&unit) {
            text.push(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER));
            return Ok(());
        }
        if unit >= 0xDC00 {
            // Lone low surrogate.
            text.push(char::REPLACEMENT_CHARACTER);
            return Ok(());
        }

        // High surrogate: pair it with a following `\uXXXX` if one is there.
        if self.bytes.get(self.pos) == Some(&b'\\') && self.bytes.get(self.pos + 1) == Some(&b'u') {
            let second_start = self.pos;
            self.pos += 2;
            let low = self.hex4(second_start)?;
            if (0xDC00..0xE000).contains(&low) {
                let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                text.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            } else {
                text.push(char::REPLACEMENT_CHARACTER);
                text.push(char::from_u32(low).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
        } else {
            text.push(char::REPLACEMENT_CHARACTER);
        }
        Ok(())
    }

    /// Reads exactly four hex digits, case-insensitive.
    fn hex4(&mut self, escape_start: usize) -> Result<u32, ParseError> {
        let mut code: u32 = 0;
        for _ in 0..4 {
            let digit = match self.peek() {
                Some(b) if b.is_ascii_hexdigit() => (b as char).to_digit(16).unwrap_or(0),
                _ => {
                    return Err(ParseError::new(
                        SyntaxErrorKind::InvalidEscape,
                        Span::new(escape_start, self.pos),
                    ));
                }
            };
            code = code * 16 + digit;
            self.pos += 1;
        }
        Ok(code)
    }

    /// Scans a number literal, classifying it as integer or float.
    fn scan_number(&mut self) -> Result<(Span, NumberValue), ParseError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }

        // Integer part: `0` or `[1-9][0-9]*`. A digit after a leading zero
        // is left in place and rejected by the enclosing state.
        match self.peek() {
            Some(b'0') => self.pos += 1,
            Some(b'1'..=b'9') => self.skip_digits(),
            Some(_) => return Err(self.error_here(SyntaxErrorKind::InvalidNumber)),
            None => return Err(self.unexpected_eof()),
        }

        let mut is_float = false;
        if self.peek() == Some(b'.') {
            self.pos += 1;
            is_float = true;
            match self.peek() {
                Some(b'0'..=b'9') => self.skip_digits(),
                Some(_) => return Err(self.error_here(SyntaxErrorKind::InvalidNumber)),
                None => return Err(self.unexpected_eof()),
            }
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.pos += 1;
            is_float = true;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            match self.peek() {
                Some(b'0'..=b'9') => self.skip_digits(),
                Some(_) => return Err(self.error_here(SyntaxErrorKind::InvalidNumber)),
                None => return Err(self.unexpected_eof()),
            }
        }

        let span = Span::new(start, self.pos);
        let literal = span.slice(self.source);
        // `-0` carries a sign an integer cannot: classify it as a float so
        // the negative zero survives.
        let is_float = is_float || literal == "-0";
        let value = if is_float {
            NumberValue::Float(
                literal
                    .parse::<f64>()
                    .map_err(|_| ParseError::new(SyntaxErrorKind::InvalidNumber, span))?,
            )
        } else {
            match literal.parse::<i64>() {
                Ok(int) => NumberValue::Int(int),
                // Magnitude overflow; the grammar is still fine.
                Err(_) => NumberValue::Float(
                    literal
                        .parse::<f64>()
                        .map_err(|_| ParseError::new(SyntaxErrorKind::InvalidNumber, span))?,
                ),
            }
        };
        Ok((span, value))
    }

    fn skip_digits(&mut self) {
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
    }

    /// Matches one of the fixed keywords `true` / `false` / `null` and
    /// emits its event.
    fn scan_keyword(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        let rest = &self.source[self.pos..];
        for (keyword, value) in [("true", Some(true)), ("false", Some(false)), ("null", None)] {
            // A keyword running into more identifier characters ("truth",
            // "nullx") is an identifier, not a keyword plus garbage.
            if rest.starts_with(keyword)
                && !matches!(
                    rest.as_bytes().get(keyword.len()),
                    Some(b) if b.is_ascii_alphanumeric() || *b == b'_'
                )
            {
                self.pos += keyword.len();
                let span = Span::new(start, self.pos);
                match value {
                    Some(b) => self.listener.handle_bool(span, b),
                    None => self.listener.handle_null(span),
                }
                return Ok(());
            }
            // Input ends mid-keyword: that is a truncation, not a typo.
            if !rest.is_empty() && keyword.starts_with(rest) {
                self.pos = self.source.len();
                return Err(ParseError::new(
                    SyntaxErrorKind::UnexpectedEndOfFile,
                    Span::new(start, self.pos),
                ));
            }
        }
        while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'_') {
            self.pos += 1;
        }
        Err(ParseError::new(
            SyntaxErrorKind::UnexpectedIdentifier,
            Span::new(start, self.pos),
        ))
    }

    // ------------------------------------------------------------------
    // Cursor
    // ------------------------------------------------------------------

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.pos += 1;
        }
    }

    /// End offset of the char at the cursor, for one-char error spans.
    fn next_char_end(&self) -> usize {
        match self.source[self.pos..].chars().next() {
            Some(c) => self.pos + c.len_utf8(),
            None => self.pos,
        }
    }

    fn error_here(&self, kind: SyntaxErrorKind) -> ParseError {
        ParseError::new(kind, Span::new(self.pos, self.next_char_end()))
    }

    fn unexpected_token(&self) -> ParseError {
        self.error_here(SyntaxErrorKind::UnexpectedToken)
    }

    fn unexpected_eof(&self) -> ParseError {
        ParseError::new(
            SyntaxErrorKind::UnexpectedEndOfFile,
            Span::new(self.pos, self.pos),
        )
    }
}

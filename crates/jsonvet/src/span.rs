//! Source positions: half-open offset spans and the offset → line/column
//! mapping used when diagnostics are rendered.

use alloc::vec::Vec;

/// A half-open `[start, end)` byte-offset range into the source text.
///
/// Spans are immutable once created and always satisfy `start <= end`.
/// `&source[span.start..span.end]` reproduces exactly the token's text,
/// including both delimiters for strings and containers.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    ///
    /// # Panics
    ///
    /// Panics (debug builds only) if `start > end`.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} exceeds end {end}");
        Self { start, end }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the text this span covers.
    #[must_use]
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// A 1-based line/column position.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineColumn {
    pub line: usize,
    pub column: usize,
}

/// Precomputed table of line-start offsets for one source string.
///
/// Entry `0` is always `0`; entry `i` is the offset immediately after the
/// `i`-th newline. Lookup is a binary search for the greatest entry not past
/// the queried offset, so conversion is `O(log lines)`.
///
/// This is a collaborator for diagnostic rendering; the parser itself deals
/// only in raw offsets.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut line_starts = Vec::with_capacity(16);
        line_starts.push(0);
        for (offset, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(offset + 1);
            }
        }
        Self { line_starts }
    }

    /// Converts a byte offset to a 1-based line/column pair.
    ///
    /// Offsets past the end of the source map to the last line.
    #[must_use]
    pub fn line_column(&self, offset: usize) -> LineColumn {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(index) => index,
            Err(index) => index - 1,
        };
        LineColumn {
            line: line + 1,
            column: offset - self.line_starts[line] + 1,
        }
    }
}

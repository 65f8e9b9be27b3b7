//! Logical-line tokenizer for indentation-significant sources.
//!
//! Physical lines joined by open brackets, backslash continuations or
//! multi-line strings form one logical line. Blank and comment-only lines are
//! dropped. Only the first physical line of a logical line carries
//! indentation.

use std::cmp::Ordering;

use crate::error::ExtractionError;

/// Indentation of a logical line measured two ways.
///
/// `width` expands tabs to the next multiple of the tab width, `alt` counts
/// every tab as a single column. Two indents are only comparable when both
/// measures agree on their ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Indent {
    pub width: u32,
    pub alt: u32,
}

impl Indent {
    pub(crate) fn measure(prefix: &[u8], tab_width: u32) -> Self {
        let tab_width = tab_width.max(1);
        let mut indent = Self { width: 0, alt: 0 };
        for &b in prefix {
            match b {
                b' ' => {
                    indent.width += 1;
                    indent.alt += 1;
                }
                b'\t' => {
                    indent.width = (indent.width / tab_width + 1) * tab_width;
                    indent.alt += 1;
                }
                // form feed resets the column
                b'\x0c' => indent = Self { width: 0, alt: 0 },
                _ => break,
            }
        }
        indent
    }

    /// `None` when the ordering depends on the tab width.
    pub(crate) fn compare(self, other: Self) -> Option<Ordering> {
        let by_width = self.width.cmp(&other.width);
        (by_width == self.alt.cmp(&other.alt)).then_some(by_width)
    }
}

/// One parsing unit: a statement header or simple statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LogicalLine {
    /// First physical line (1-based).
    pub first_line: u32,
    /// Last physical line (1-based, inclusive).
    pub last_line: u32,
    /// Byte offset of the first non-blank character.
    pub start: usize,
    /// Byte offset just past the last character of the last physical line.
    pub end: usize,
    /// Byte offset of the first physical line's start.
    pub line_start: usize,
    pub indent: Indent,
    /// Source text with comments removed and trailing whitespace trimmed.
    pub code: String,
}

/// Result of tokenizing a whole text.
#[derive(Debug, Default)]
pub(crate) struct Lexed {
    pub lines: Vec<LogicalLine>,
    /// Set when tokenizing stopped before the end of the input.
    pub error: Option<ExtractionError>,
}

/// Split `source` into logical lines.
/// UTF-8 byte-order mark; skipped so offsets still index the input.
const BOM: &str = "\u{feff}";

pub(crate) fn logical_lines(source: &str, tab_width: u32) -> Lexed {
    let mut lexer = Lexer {
        source,
        bytes: source.as_bytes(),
        pos: if source.starts_with(BOM) { BOM.len() } else { 0 },
        line: 1,
        tab_width,
    };
    let mut lexed = Lexed::default();
    loop {
        match lexer.next_line() {
            Ok(Some(line)) => lexed.lines.push(line),
            Ok(None) => break,
            Err(error) => {
                lexed.error = Some(error);
                break;
            }
        }
    }
    lexed
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: u32,
    tab_width: u32,
}

impl Lexer<'_> {
    fn next_line(&mut self) -> Result<Option<LogicalLine>, ExtractionError> {
        loop {
            if self.pos >= self.bytes.len() {
                return Ok(None);
            }
            let line_start = self.pos;
            let mut i = line_start;
            while i < self.bytes.len() && matches!(self.bytes[i], b' ' | b'\t' | b'\x0c') {
                i += 1;
            }
            match self.peek_at(i) {
                None => return Ok(None),
                Some(b'\n') => self.advance_past_newline(i),
                Some(b'\r') if self.peek_at(i + 1) == Some(b'\n') => {
                    self.advance_past_newline(i + 1);
                }
                Some(b'#') => {
                    let eol = self.find_newline(i);
                    self.advance_past_newline(eol);
                }
                Some(_) => {
                    let indent = Indent::measure(&self.bytes[line_start..i], self.tab_width);
                    return self.scan_logical(line_start, i, indent).map(Some);
                }
            }
        }
    }

    fn scan_logical(
        &mut self,
        line_start: usize,
        start: usize,
        indent: Indent,
    ) -> Result<LogicalLine, ExtractionError> {
        let first_line = self.line;
        let mut code = String::new();
        let mut segment = start;
        let mut depth = 0u32;
        let mut i = start;

        while i < self.bytes.len() {
            match self.bytes[i] {
                b'#' => {
                    code.push_str(&self.source[segment..i]);
                    i = self.find_newline(i);
                    segment = i;
                    continue;
                }
                quote @ (b'"' | b'\'') => {
                    i = self.skip_string(i, quote)?;
                    continue;
                }
                b'(' | b'[' | b'{' => depth += 1,
                b')' | b']' | b'}' => depth = depth.saturating_sub(1),
                b'\\' => {
                    let next = match self.peek_at(i + 1) {
                        Some(b'\r') if self.peek_at(i + 2) == Some(b'\n') => Some(i + 2),
                        Some(b'\n') => Some(i + 1),
                        _ => None,
                    };
                    if let Some(newline) = next {
                        self.line += 1;
                        i = newline + 1;
                        continue;
                    }
                }
                b'\n' if depth > 0 => self.line += 1,
                b'\n' => break,
                _ => {}
            }
            i += 1;
        }

        code.push_str(&self.source[segment..i]);
        let end = if i > start && self.bytes[i - 1] == b'\r' {
            i - 1
        } else {
            i
        };
        let last_line = self.line;
        if i < self.bytes.len() {
            self.advance_past_newline(i);
        } else {
            self.pos = i;
        }

        Ok(LogicalLine {
            first_line,
            last_line,
            start,
            end,
            line_start,
            indent,
            code: code.trim_end().to_string(),
        })
    }

    /// Skip a string literal starting at `open`; returns the offset after it.
    fn skip_string(&mut self, open: usize, quote: u8) -> Result<usize, ExtractionError> {
        let opening_line = self.line;
        let triple = self.peek_at(open + 1) == Some(quote) && self.peek_at(open + 2) == Some(quote);
        let mut j = if triple { open + 3 } else { open + 1 };

        loop {
            let Some(b) = self.peek_at(j) else {
                if triple {
                    return Err(ExtractionError::UnterminatedString { line: opening_line });
                }
                return Ok(j);
            };
            match b {
                b'\\' => {
                    if self.peek_at(j + 1) == Some(b'\n') {
                        self.line += 1;
                    }
                    j += 2;
                }
                b'\n' if triple => {
                    self.line += 1;
                    j += 1;
                }
                // an unclosed single-quoted string ends at the line break
                b'\n' => return Ok(j),
                b if b == quote => {
                    if !triple {
                        return Ok(j + 1);
                    }
                    if self.peek_at(j + 1) == Some(quote) && self.peek_at(j + 2) == Some(quote) {
                        return Ok(j + 3);
                    }
                    j += 1;
                }
                _ => j += 1,
            }
        }
    }

    fn peek_at(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).copied()
    }

    fn find_newline(&self, from: usize) -> usize {
        self.bytes[from..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(self.bytes.len(), |offset| from + offset)
    }

    fn advance_past_newline(&mut self, newline: usize) {
        if newline < self.bytes.len() {
            self.pos = newline + 1;
            self.line += 1;
        } else {
            self.pos = self.bytes.len();
        }
    }
}

/// Number of physical lines in `source` (a trailing newline opens no line).
pub(crate) fn physical_line_count(source: &str) -> u32 {
    let count = source.bytes().filter(|&b| b == b'\n').count();
    let count = if source.is_empty() || source.ends_with('\n') {
        count
    } else {
        count + 1
    };
    u32::try_from(count).unwrap_or(u32::MAX)
}

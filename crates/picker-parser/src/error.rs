//! Extraction error types for picker-parser.

use serde::Serialize;

use crate::outline::Outline;

/// Errors that can stop extraction part-way through a source text.
///
/// Every variant is local to one line; the outline built up to that line is
/// always returned next to the error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractionError {
    #[error("unterminated triple-quoted string starting at line {line}")]
    UnterminatedString { line: u32 },

    #[error("indentation at line {line} is ambiguous: its nesting depends on the tab width")]
    AmbiguousIndent { line: u32 },

    #[error("invalid UTF-8 byte sequence at line {line}")]
    Encoding { line: u32 },
}

impl ExtractionError {
    /// Line (1-based) the error was reported at.
    #[must_use]
    pub const fn line(&self) -> u32 {
        match self {
            Self::UnterminatedString { line }
            | Self::AmbiguousIndent { line }
            | Self::Encoding { line } => *line,
        }
    }
}

/// A best-effort outline returned alongside the errors that cut it short.
#[derive(Debug, Clone, thiserror::Error)]
#[error("extraction stopped early: {}", describe(.errors))]
pub struct PartialExtraction {
    pub outline: Outline,
    pub errors: Vec<ExtractionError>,
}

fn describe(errors: &[ExtractionError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

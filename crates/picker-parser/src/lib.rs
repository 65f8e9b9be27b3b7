//! # picker-parser
//!
//! Structural outline extraction for the element picker.
//!
//! Turns one source file into a tree of navigable [`Element`]s (classes,
//! functions, methods, fields, lambda bindings) with exact line and byte
//! spans. Extraction is line-oriented and tolerant: it never panics, and
//! when the text cannot be read to the end it still returns everything found
//! before the failure together with the [`ExtractionError`]s.
//!
//! ```
//! use picker_parser::{ElementKind, Language, extract};
//!
//! let extraction = extract("class A:\n    def m(self):\n        pass\n", Language::Python);
//! let outline = extraction.into_result().expect("valid source");
//! let m = outline.find_path("A.m").expect("method exists");
//! assert_eq!(outline.get(m).map(|e| e.kind), Some(ElementKind::Method));
//! ```

pub mod error;
pub mod extractors;
pub mod language;
mod lexer;
pub mod outline;
pub mod picker;
pub mod skeleton;
pub mod types;

use serde::{Deserialize, Serialize};

pub use error::{ExtractionError, PartialExtraction};
pub use language::{Language, UnsupportedLanguage, detect_language};
pub use outline::{FoldRange, Outline, Walk, WalkEntry};
pub use picker::{
    Excerpt, PickerEntry, PickerGroup, Selection, UnknownGroup, group_entries, line_label,
    picker_entries,
};
pub use skeleton::summarize;
pub use types::{Element, ElementId, ElementKind, Import, Span, Visibility, decorator_name};

/// Default number of columns a tab advances to.
pub const DEFAULT_TAB_WIDTH: u32 = 8;

/// Tunables for one extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractOptions {
    /// Tab stop width used to measure indentation.
    pub tab_width: u32,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

/// An outline together with whatever stopped it short.
///
/// `errors` is empty when the whole text was read.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub outline: Outline,
    pub errors: Vec<ExtractionError>,
}

impl Extraction {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// The outline, or the partial outline wrapped with its errors.
    ///
    /// # Errors
    /// Returns [`PartialExtraction`] when extraction stopped early.
    pub fn into_result(self) -> Result<Outline, PartialExtraction> {
        if self.errors.is_empty() {
            Ok(self.outline)
        } else {
            Err(PartialExtraction {
                outline: self.outline,
                errors: self.errors,
            })
        }
    }
}

/// Extract the outline of `source` with default options.
#[must_use]
pub fn extract(source: &str, language: Language) -> Extraction {
    extract_with(source, language, &ExtractOptions::default())
}

/// Extract the outline of `source`.
#[must_use]
pub fn extract_with(source: &str, language: Language, options: &ExtractOptions) -> Extraction {
    let extraction = match language {
        Language::Python => extractors::python::extract(source, options),
    };
    report(&extraction, language);
    extraction
}

/// Extract from raw bytes, decoding them as UTF-8.
///
/// Invalid input yields the outline of every line before the offending one
/// and an [`ExtractionError::Encoding`] at that line.
#[must_use]
pub fn extract_bytes(bytes: &[u8], language: Language) -> Extraction {
    extract_bytes_with(bytes, language, &ExtractOptions::default())
}

/// [`extract_bytes`] with explicit options.
#[must_use]
pub fn extract_bytes_with(bytes: &[u8], language: Language, options: &ExtractOptions) -> Extraction {
    match std::str::from_utf8(bytes) {
        Ok(source) => extract_with(source, language, options),
        Err(error) => {
            let valid = &bytes[..error.valid_up_to()];
            let line_start = valid
                .iter()
                .rposition(|&b| b == b'\n')
                .map_or(0, |newline| newline + 1);
            let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
            let line = u32::try_from(line).unwrap_or(u32::MAX);
            // cut at the start of the offending line
            let prefix = std::str::from_utf8(&bytes[..line_start]).unwrap_or_default();

            let mut extraction = extract_with(prefix, language, options);
            let encoding = ExtractionError::Encoding { line };
            tracing::warn!(%language, error = %encoding, "extraction stopped early");
            extraction.errors.push(encoding);
            extraction
        }
    }
}

fn report(extraction: &Extraction, language: Language) {
    for error in &extraction.errors {
        tracing::warn!(%language, %error, "extraction stopped early");
    }
    tracing::debug!(
        %language,
        lines = extraction.outline.root().last_line(),
        elements = extraction.outline.len() - 1,
        imports = extraction.outline.imports().len(),
        errors = extraction.errors.len(),
        "extracted outline"
    );
}

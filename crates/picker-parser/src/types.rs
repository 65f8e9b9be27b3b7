//! Core data types for elements extracted from source text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of an [`Element`] inside its [`Outline`](crate::Outline).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    /// The synthetic module root of every outline.
    pub const ROOT: Self = Self(0);

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A single navigable syntactic unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub kind: ElementKind,
    pub name: String,
    pub span: Span,
    /// Line of the `def`/`class`/assignment header (1-based).
    pub header_line: u32,
    pub signature: String,
    pub decorators: Vec<String>,
    pub bases: Vec<String>,
    pub doc: Option<String>,
    pub is_async: bool,
    pub is_generator: bool,
    pub visibility: Visibility,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
}

impl Element {
    pub(crate) fn new(kind: ElementKind, name: impl Into<String>, span: Span) -> Self {
        let name = name.into();
        let visibility = Visibility::of(&name);
        Self {
            kind,
            name,
            header_line: span.start_line,
            span,
            signature: String::new(),
            decorators: Vec::new(),
            bases: Vec::new(),
            doc: None,
            is_async: false,
            is_generator: false,
            visibility,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Last line (inclusive) covered by the element.
    #[must_use]
    pub const fn last_line(&self) -> u32 {
        if self.span.end_line > self.span.start_line {
            self.span.end_line - 1
        } else {
            self.span.start_line
        }
    }

    /// First decorator reduced to its bare name: `@app.route("/")` -> `route`.
    #[must_use]
    pub fn primary_decorator(&self) -> Option<&str> {
        self.decorators.first().map(|d| decorator_name(d))
    }
}

/// Reduce a decorator expression to its final dotted segment without arguments.
#[must_use]
pub fn decorator_name(decorator: &str) -> &str {
    let base = decorator.split('(').next().unwrap_or(decorator).trim();
    base.rsplit('.').next().unwrap_or(base)
}

/// The kind of an extracted element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Module,
    Function,
    AsyncFunction,
    Class,
    Method,
    Property,
    Classmethod,
    Staticmethod,
    Field,
    LambdaBinding,
    NestedFunction,
    ContextManager,
}

impl ElementKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Function => "function",
            Self::AsyncFunction => "async_function",
            Self::Class => "class",
            Self::Method => "method",
            Self::Property => "property",
            Self::Classmethod => "classmethod",
            Self::Staticmethod => "staticmethod",
            Self::Field => "field",
            Self::LambdaBinding => "lambda_binding",
            Self::NestedFunction => "nested_function",
            Self::ContextManager => "context_manager",
        }
    }

    /// Kinds whose body is executable code (a `def` inside one is nested).
    #[must_use]
    pub const fn is_function_like(self) -> bool {
        matches!(
            self,
            Self::Function
                | Self::AsyncFunction
                | Self::Method
                | Self::Property
                | Self::Classmethod
                | Self::Staticmethod
                | Self::NestedFunction
                | Self::ContextManager
        )
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Half-open source range: lines `[start_line, end_line)`, bytes `[start_byte, end_byte)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start_line: u32,
    pub end_line: u32,
    pub start_column: u32,
    pub start_byte: usize,
    pub end_byte: usize,
}

impl Span {
    /// Whether `other` lies entirely inside `self`.
    #[must_use]
    pub const fn contains(&self, other: &Self) -> bool {
        self.start_line <= other.start_line
            && other.end_line <= self.end_line
            && self.start_byte <= other.start_byte
            && other.end_byte <= self.end_byte
    }

    /// Whether the two ranges share at least one byte.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start_byte < other.end_byte && other.start_byte < self.end_byte
    }

    #[must_use]
    pub const fn contains_line(&self, line: u32) -> bool {
        self.start_line <= line && line < self.end_line
    }
}

/// Element visibility derived from Python naming conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    /// - `__dunder__` -> Public
    /// - `__mangled` -> Private
    /// - `_protected` -> Protected
    /// - everything else -> Public
    #[must_use]
    pub fn of(name: &str) -> Self {
        if name.starts_with("__") && name.ends_with("__") && name.len() > 4 {
            Self::Public
        } else if name.starts_with("__") {
            Self::Private
        } else if name.starts_with('_') {
            Self::Protected
        } else {
            Self::Public
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        };
        f.write_str(s)
    }
}

/// A module-level import statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    /// Imported module path; relative imports keep their leading dots.
    pub module: String,
    /// Names pulled in by `from … import`; empty for plain `import`.
    pub names: Vec<String>,
    pub line: u32,
}

impl Import {
    #[must_use]
    pub fn is_relative(&self) -> bool {
        self.module.starts_with('.')
    }
}

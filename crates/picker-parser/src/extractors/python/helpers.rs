//! Header recognition for Python logical lines.
//!
//! Works on the comment-free code of one logical line. Nothing here looks
//! past that line: block structure is the builder's job.

use std::iter::Peekable;

/// Reserved words that can never name an element.
const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Keywords that open a block without defining an element.
const COMPOUND_KEYWORDS: &[&str] = &[
    "if", "elif", "else", "for", "while", "try", "except", "finally", "with",
];

/// Soft keywords that only open a block when the line ends in a colon.
const SOFT_COMPOUND_KEYWORDS: &[&str] = &["match", "case"];

/// Decorators that turn a method into a property.
const PROPERTY_DECORATORS: &[&str] = &["property", "cached_property"];
const PROPERTY_ACCESSORS: &[&str] = &["setter", "getter", "deleter"];

/// Decorators that turn a module-level function into a context manager.
const CONTEXT_MANAGER_DECORATORS: &[&str] = &["contextmanager", "asynccontextmanager"];

/// Classified shape of one logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Statement<'a> {
    Decorator(&'a str),
    Def {
        name: &'a str,
        signature: &'a str,
        is_async: bool,
        inline_body: bool,
    },
    Class {
        name: &'a str,
        signature: &'a str,
        bases: Vec<String>,
        inline_body: bool,
    },
    MainGuard {
        inline_body: bool,
    },
    Compound {
        inline_body: bool,
    },
    Assignment {
        name: &'a str,
        annotation: Option<&'a str>,
        value: Option<&'a str>,
    },
    Import(Vec<ImportClause>),
    Other,
}

/// `import`/`from … import` content before line numbers are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ImportClause {
    pub module: String,
    pub names: Vec<String>,
}

/// Classify a logical line by its leading tokens.
pub(super) fn parse_statement(code: &str) -> Statement<'_> {
    let code = code.trim();

    if let Some(decorator) = code.strip_prefix('@') {
        return Statement::Decorator(decorator.trim());
    }
    if let Some(rest) = strip_keyword(code, "async") {
        let rest = rest.trim_start();
        if let Some(rest) = strip_keyword(rest, "def") {
            return parse_def(rest, true).unwrap_or(Statement::Other);
        }
        if strip_keyword(rest, "for").is_some() || strip_keyword(rest, "with").is_some() {
            return parse_compound(rest);
        }
        return Statement::Other;
    }
    if let Some(rest) = strip_keyword(code, "def") {
        return parse_def(rest, false).unwrap_or(Statement::Other);
    }
    if let Some(rest) = strip_keyword(code, "class") {
        return parse_class(rest).unwrap_or(Statement::Other);
    }
    if let Some(rest) = strip_keyword(code, "import") {
        return Statement::Import(parse_plain_import(rest));
    }
    if let Some(rest) = strip_keyword(code, "from") {
        return parse_from_import(rest).map_or(Statement::Other, |clause| {
            Statement::Import(vec![clause])
        });
    }
    if let Some(condition) = strip_keyword(code, "if") {
        if let Some(colon) = header_colon(condition) {
            if is_main_guard(&condition[..colon]) {
                return Statement::MainGuard {
                    inline_body: !condition[colon + 1..].trim().is_empty(),
                };
            }
        }
    }
    if COMPOUND_KEYWORDS
        .iter()
        .any(|kw| strip_keyword(code, kw).is_some())
    {
        return parse_compound(code);
    }
    if code.ends_with(':')
        && SOFT_COMPOUND_KEYWORDS
            .iter()
            .any(|kw| strip_keyword(code, kw).is_some())
        && header_colon(code) == Some(code.len() - 1)
    {
        return Statement::Compound { inline_body: false };
    }

    parse_assignment(code).unwrap_or(Statement::Other)
}

fn parse_def(rest: &str, is_async: bool) -> Option<Statement<'_>> {
    let (name, after) = take_identifier(rest.trim_start())?;
    let (signature, inline_body) = split_header(after);
    Some(Statement::Def {
        name,
        signature,
        is_async,
        inline_body,
    })
}

fn parse_class(rest: &str) -> Option<Statement<'_>> {
    let (name, after) = take_identifier(rest.trim_start())?;
    let (signature, inline_body) = split_header(after);
    Some(Statement::Class {
        name,
        signature,
        bases: class_bases(signature),
        inline_body,
    })
}

fn parse_compound(code: &str) -> Statement<'_> {
    let inline_body = header_colon(code).is_none_or(|colon| !code[colon + 1..].trim().is_empty());
    Statement::Compound { inline_body }
}

/// Split the text after a definition name into signature and body marker.
///
/// A header without a colon is malformed; it is kept as an element but never
/// opens a block.
fn split_header(after_name: &str) -> (&str, bool) {
    match header_colon(after_name) {
        Some(colon) => (
            after_name[..colon].trim(),
            !after_name[colon + 1..].trim().is_empty(),
        ),
        None => (after_name.trim(), true),
    }
}

/// Base-class expressions from a class signature such as `[T](Base, metaclass=M)`.
fn class_bases(signature: &str) -> Vec<String> {
    let mut scanner = CodeScanner::new(signature);
    let open = scanner.find(|&(_, b, depth)| depth == 0 && b == b'(');
    let Some((open, _, _)) = open else {
        return Vec::new();
    };
    let close = scanner
        .find(|&(_, b, depth)| depth == 0 && b == b')')
        .map_or(signature.len(), |(i, _, _)| i);
    split_top_level(&signature[open + 1..close], b',')
        .into_iter()
        .map(str::trim)
        .filter(|base| {
            !base.is_empty() && !base.starts_with('*') && find_assignment_eq(base).is_none()
        })
        .map(ToString::to_string)
        .collect()
}

fn parse_assignment(code: &str) -> Option<Statement<'_>> {
    let (name, rest) = take_identifier(code)?;
    if KEYWORDS.contains(&name) {
        return None;
    }
    let rest = rest.trim_start();
    if let Some(value) = rest.strip_prefix('=') {
        if value.starts_with('=') {
            return None;
        }
        return Some(Statement::Assignment {
            name,
            annotation: None,
            value: Some(value.trim()),
        });
    }
    let annotated = rest.strip_prefix(':')?;
    if annotated.starts_with('=') {
        return None;
    }
    let (annotation, value) = match find_assignment_eq(annotated) {
        Some(eq) => (&annotated[..eq], Some(annotated[eq + 1..].trim())),
        None => (annotated, None),
    };
    Some(Statement::Assignment {
        name,
        annotation: Some(annotation.trim()),
        value,
    })
}

/// `import a.b as c, d` -> one clause per module.
fn parse_plain_import(rest: &str) -> Vec<ImportClause> {
    split_top_level(rest, b',')
        .into_iter()
        .filter_map(|item| {
            let module = strip_alias(item);
            (!module.is_empty()).then(|| ImportClause {
                module: module.to_string(),
                names: Vec::new(),
            })
        })
        .collect()
}

/// `from .pkg import (a, b as c)` -> module `.pkg`, names `[a, b]`.
fn parse_from_import(rest: &str) -> Option<ImportClause> {
    let rest = rest.trim_start();
    let module_end = rest
        .find(|c: char| c.is_whitespace())
        .unwrap_or(rest.len());
    let (module, names) = rest.split_at(module_end);
    let names = strip_keyword(names.trim_start(), "import")?;
    let names = names.trim().trim_start_matches('(').trim_end_matches(')');
    Some(ImportClause {
        module: module.to_string(),
        names: split_top_level(names, b',')
            .into_iter()
            .map(strip_alias)
            .filter(|name| !name.is_empty())
            .map(ToString::to_string)
            .collect(),
    })
}

fn strip_alias(item: &str) -> &str {
    let item = item.trim();
    item.split_whitespace().next().unwrap_or(item)
}

/// `__name__ == "__main__"` in either operand order and quote style.
fn is_main_guard(condition: &str) -> bool {
    let compact: String = condition
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .replace('\'', "\"");
    let compact = compact
        .strip_prefix('(')
        .and_then(|c| c.strip_suffix(')'))
        .unwrap_or(compact.as_str());
    compact == "__name__==\"__main__\"" || compact == "\"__main__\"==__name__"
}

/// Parameters of a `lambda` value: `lambda x, y=1: ...` -> `Some("x, y=1")`.
pub(super) fn lambda_parameters(value: &str) -> Option<&str> {
    let rest = strip_keyword(value.trim_start(), "lambda")?;
    let colon = header_colon(rest)?;
    Some(rest[..colon].trim())
}

/// Whether `keyword` appears as a token outside string literals.
pub(super) fn contains_keyword(code: &str, keyword: &str) -> bool {
    identifiers(code).any(|word| word == keyword)
}

/// Whether any decorator names one of `names`, allowing dotted paths and calls.
pub(super) fn decorator_matches_any(decorators: &[String], names: &[&str]) -> bool {
    decorators.iter().any(|d| {
        let base = d.split('(').next().unwrap_or(d).trim();
        names
            .iter()
            .any(|name| base == *name || base.ends_with(&format!(".{name}")))
    })
}

pub(super) fn is_property(decorators: &[String]) -> bool {
    decorator_matches_any(decorators, PROPERTY_DECORATORS)
        || decorators.iter().any(|d| {
            d.rsplit_once('.')
                .is_some_and(|(_, accessor)| PROPERTY_ACCESSORS.contains(&accessor.trim()))
        })
}

pub(super) fn is_context_manager(decorators: &[String]) -> bool {
    decorator_matches_any(decorators, CONTEXT_MANAGER_DECORATORS)
}

// ── token-level scanning ───────────────────────────────────────────

/// Walks the bytes of a code fragment, stepping over string literals.
///
/// Yields `(offset, byte, depth)` where `depth` is the bracket nesting
/// outside the byte: an opening bracket and its matching close both report
/// the enclosing depth.
pub(super) struct CodeScanner<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: u32,
}

impl<'a> CodeScanner<'a> {
    pub(super) const fn new(code: &'a str) -> Self {
        Self {
            bytes: code.as_bytes(),
            pos: 0,
            depth: 0,
        }
    }
}

impl Iterator for CodeScanner<'_> {
    type Item = (usize, u8, u32);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let b = *self.bytes.get(self.pos)?;
            if b == b'"' || b == b'\'' {
                self.pos = string_end(self.bytes, self.pos);
                continue;
            }
            let offset = self.pos;
            self.pos += 1;
            return Some(match b {
                b'(' | b'[' | b'{' => {
                    let depth = self.depth;
                    self.depth += 1;
                    (offset, b, depth)
                }
                b')' | b']' | b'}' => {
                    self.depth = self.depth.saturating_sub(1);
                    (offset, b, self.depth)
                }
                _ => (offset, b, self.depth),
            });
        }
    }
}

/// Offset just past the string literal opened at `open` (or the end of input).
pub(super) fn string_end(bytes: &[u8], open: usize) -> usize {
    let quote = bytes[open];
    let triple = bytes.get(open + 1) == Some(&quote) && bytes.get(open + 2) == Some(&quote);
    let mut j = if triple { open + 3 } else { open + 1 };
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b'\n' if !triple => return j,
            b if b == quote => {
                if !triple {
                    return j + 1;
                }
                if bytes.get(j + 1) == Some(&quote) && bytes.get(j + 2) == Some(&quote) {
                    return j + 3;
                }
                j += 1;
            }
            _ => j += 1,
        }
    }
    bytes.len()
}

/// First colon at bracket depth zero that is not part of a walrus `:=`.
pub(super) fn header_colon(code: &str) -> Option<usize> {
    let bytes = code.as_bytes();
    CodeScanner::new(code)
        .find(|&(i, b, depth)| depth == 0 && b == b':' && bytes.get(i + 1) != Some(&b'='))
        .map(|(i, _, _)| i)
}

/// First top-level `=` that is a plain assignment (not `==`, `<=`, `+=`, …).
fn find_assignment_eq(code: &str) -> Option<usize> {
    let bytes = code.as_bytes();
    CodeScanner::new(code)
        .find(|&(i, b, depth)| {
            depth == 0
                && b == b'='
                && bytes.get(i + 1) != Some(&b'=')
                && (i == 0 || !b"=!<>:+-*/%&|^@~".contains(&bytes[i - 1]))
        })
        .map(|(i, _, _)| i)
}

fn split_top_level(code: &str, separator: u8) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for (i, b, depth) in CodeScanner::new(code) {
        if depth == 0 && b == separator {
            parts.push(&code[start..i]);
            start = i + 1;
        }
    }
    parts.push(&code[start..]);
    parts
}

/// Identifier-like words outside string literals.
fn identifiers(code: &str) -> Identifiers<'_, CodeScanner<'_>> {
    Identifiers {
        code,
        scanner: CodeScanner::new(code).peekable(),
    }
}

struct Identifiers<'a, I: Iterator<Item = (usize, u8, u32)>> {
    code: &'a str,
    scanner: Peekable<I>,
}

impl<'a, I: Iterator<Item = (usize, u8, u32)>> Iterator for Identifiers<'a, I> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (start, b, _) = self.scanner.next()?;
            if !is_ident_byte(b) {
                continue;
            }
            let mut end = start + 1;
            while let Some(&(i, b, _)) = self.scanner.peek() {
                if i != end || !is_ident_byte(b) {
                    break;
                }
                end += 1;
                self.scanner.next();
            }
            return Some(&self.code[start..end]);
        }
    }
}

const fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

/// Split a leading identifier off `s`.
pub(super) fn take_identifier(s: &str) -> Option<(&str, &str)> {
    let mut chars = s.char_indices();
    let (_, first) = chars.next()?;
    if !(first.is_alphabetic() || first == '_') {
        return None;
    }
    let end = chars
        .find(|&(_, c)| !(c.is_alphanumeric() || c == '_'))
        .map_or(s.len(), |(i, _)| i);
    Some((&s[..end], &s[end..]))
}

/// Strip `keyword` from the front of `s` when it stands as a whole word.
fn strip_keyword<'a>(s: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = s.strip_prefix(keyword)?;
    match rest.chars().next() {
        Some(c) if c.is_alphanumeric() || c == '_' => None,
        _ => Some(rest),
    }
}

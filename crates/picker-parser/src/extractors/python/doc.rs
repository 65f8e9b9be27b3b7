use super::helpers::string_end;

/// Body of a statement that is exactly one string literal, quotes removed.
///
/// Only plain, raw and unicode literals qualify; byte strings and f-strings
/// are never docstrings.
pub(super) fn lone_string_literal(code: &str) -> Option<&str> {
    let code = code.trim();
    let quote_at = code.find(['"', '\''])?;
    let prefix = &code[..quote_at];
    if prefix.len() > 2 || !prefix.chars().all(|c| matches!(c, 'r' | 'R' | 'u' | 'U')) {
        return None;
    }

    let bytes = code.as_bytes();
    let end = string_end(bytes, quote_at);
    if end != code.len() {
        return None;
    }

    let quote = bytes[quote_at];
    let triple = bytes.get(quote_at + 1) == Some(&quote) && bytes.get(quote_at + 2) == Some(&quote);
    let delimiter = if triple { 3 } else { 1 };
    let body_start = quote_at + delimiter;
    let body_end = end.checked_sub(delimiter)?;
    (body_end >= body_start).then(|| &code[body_start..body_end])
}

/// Normalise a docstring body the way `inspect.cleandoc` does.
///
/// The first line is stripped; the common indentation of the remaining lines
/// is removed; leading and trailing blank lines are dropped.
pub(super) fn clean_docstring(raw: &str) -> Option<String> {
    let mut lines = raw.lines();
    let first = lines.next().unwrap_or_default().trim();
    let rest: Vec<&str> = lines.collect();

    let margin = rest
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<&str> = Vec::with_capacity(rest.len() + 1);
    cleaned.push(first);
    for line in rest {
        let trimmed = line.trim_end();
        cleaned.push(trimmed.get(margin..).unwrap_or_else(|| trimmed.trim_start()));
    }

    while cleaned.first().is_some_and(|line| line.is_empty()) {
        cleaned.remove(0);
    }
    while cleaned.last().is_some_and(|line| line.is_empty()) {
        cleaned.pop();
    }

    if cleaned.is_empty() {
        return None;
    }
    Some(cleaned.join("\n"))
}

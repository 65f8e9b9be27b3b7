//! Compact one-line-per-section file summary.
//!
//! ```text
//! imports: 5 ext, .models
//! classes: User @dataclass:51, ApiClient (BaseService):59
//! fn: fetch_data:18, @staticmethod helper_function:29
//! ```

use crate::outline::Outline;
use crate::types::{ElementId, ElementKind};

/// Summarise imports, top-level classes and top-level functions.
///
/// Sections with nothing to show are left out; an empty outline gives an
/// empty string.
#[must_use]
pub fn summarize(outline: &Outline) -> String {
    let mut lines = Vec::new();

    let imports = outline.imports();
    if !imports.is_empty() {
        let external = imports.iter().filter(|i| !i.is_relative()).count();
        let mut parts = Vec::new();
        if external > 0 {
            parts.push(format!("{external} ext"));
        }
        parts.extend(
            imports
                .iter()
                .filter(|i| i.is_relative())
                .map(|i| i.module.clone()),
        );
        lines.push(format!("imports: {}", parts.join(", ")));
    }

    let classes: Vec<String> = outline
        .children(ElementId::ROOT)
        .filter(|(_, e)| e.kind == ElementKind::Class)
        .map(|(_, class)| {
            let mut parts = vec![class.name.clone()];
            if let Some(decorator) = class.primary_decorator() {
                parts.push(format!("@{decorator}"));
            }
            if !class.bases.is_empty() {
                parts.push(format!("({})", class.bases.join(",")));
            }
            format!("{}:{}", parts.join(" "), class.header_line)
        })
        .collect();
    if !classes.is_empty() {
        lines.push(format!("classes: {}", classes.join(", ")));
    }

    let functions: Vec<String> = outline
        .children(ElementId::ROOT)
        .filter(|(_, e)| {
            matches!(
                e.kind,
                ElementKind::Function | ElementKind::AsyncFunction | ElementKind::ContextManager
            )
        })
        .map(|(_, function)| match function.primary_decorator() {
            Some(decorator) => format!("@{decorator} {}:{}", function.name, function.header_line),
            None => format!("{}:{}", function.name, function.header_line),
        })
        .collect();
    if !functions.is_empty() {
        lines.push(format!("fn: {}", functions.join(", ")));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Language, extract};
    use pretty_assertions::assert_eq;

    #[test]
    fn summary_lists_each_section() {
        let source = "\
import os
from . import views
from ..models import User

@dataclass
class Point(Base, Mixin):
    x: int

@contextmanager
def session():
    yield

async def load():
    pass

def _private():
    def inner():
        pass
";
        let outline = extract(source, Language::Python).outline;
        assert_eq!(
            summarize(&outline),
            "imports: 1 ext, ., ..models\n\
             classes: Point @dataclass (Base,Mixin):6\n\
             fn: @contextmanager session:10, load:13, _private:16"
        );
    }

    #[test]
    fn decorators_are_reduced_to_their_name() {
        let source = "\
@app.route(\"/x\", methods=[\"GET\"])
def users():
    pass

@attr.s(frozen=True)
class Config:
    pass
";
        let outline = extract(source, Language::Python).outline;
        assert_eq!(
            summarize(&outline),
            "classes: Config @s:6\n\
             fn: @route users:2"
        );
    }

    #[test]
    fn empty_sections_are_omitted() {
        let outline = extract("x = 1\n", Language::Python).outline;
        assert_eq!(summarize(&outline), "");

        let outline = extract("import json\n", Language::Python).outline;
        assert_eq!(summarize(&outline), "imports: 1 ext");
    }
}

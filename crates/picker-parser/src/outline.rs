//! Arena-backed element tree with navigation queries.
//!
//! Elements are stored in source order; parent and child links are
//! [`ElementId`]s into the same arena. The root is always a synthetic
//! `module` element spanning the whole text.

use serde::{Deserialize, Serialize};

use crate::language::Language;
use crate::types::{Element, ElementId, ElementKind, Import, Span};

/// Name of the synthetic root element.
pub const ROOT_NAME: &str = "<module>";

/// The element tree of one source snapshot.
///
/// Only built by extraction, so the root and every child id always resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outline {
    language: Language,
    elements: Vec<Element>,
    imports: Vec<Import>,
}

/// A multi-line element range an editor can fold (lines inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldRange {
    pub id: ElementId,
    pub start_line: u32,
    pub end_line: u32,
}

impl Outline {
    pub(crate) fn new(language: Language, root_span: Span) -> Self {
        Self {
            language,
            elements: vec![Element::new(ElementKind::Module, ROOT_NAME, root_span)],
            imports: Vec::new(),
        }
    }

    /// Append `element` as the last child of `parent`.
    pub(crate) fn push(&mut self, parent: ElementId, mut element: Element) -> ElementId {
        let id = ElementId(self.elements.len());
        element.parent = Some(parent);
        self.elements.push(element);
        self.elements[parent.0].children.push(id);
        id
    }

    pub(crate) fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.0]
    }

    pub(crate) fn push_import(&mut self, import: Import) {
        self.imports.push(import);
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub fn root(&self) -> &Element {
        &self.elements[0]
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    /// Number of elements, the root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether nothing besides the root was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.len() <= 1
    }

    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<(ElementId, &Element)> {
        let parent = self.get(id)?.parent?;
        self.get(parent).map(|element| (parent, element))
    }

    /// Direct children of `id` in source order.
    pub fn children(&self, id: ElementId) -> impl Iterator<Item = (ElementId, &Element)> + '_ {
        self.get(id)
            .map(|element| element.children.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|&child| (child, &self.elements[child.0]))
    }

    /// Pre-order walk over every element below the root.
    ///
    /// Depth 0 is a top-level element.
    #[must_use]
    pub fn iter(&self) -> Walk<'_> {
        let mut stack: Vec<(ElementId, usize)> = self.elements[0]
            .children
            .iter()
            .rev()
            .map(|&id| (id, 0))
            .collect();
        stack.shrink_to_fit();
        Walk {
            outline: self,
            stack,
        }
    }

    /// First element (pre-order) with the given name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<ElementId> {
        self.iter()
            .find(|entry| entry.element.name == name)
            .map(|entry| entry.id)
    }

    /// Resolve a dotted path such as `ApiClient.from_env` from the root.
    #[must_use]
    pub fn find_path(&self, path: &str) -> Option<ElementId> {
        path.split('.').try_fold(ElementId::ROOT, |current, segment| {
            self.children(current)
                .find(|(_, child)| child.name == segment)
                .map(|(id, _)| id)
        })
        .filter(|&id| id != ElementId::ROOT)
    }

    /// Dotted name from the top-level ancestor down to `id`.
    #[must_use]
    pub fn qualified_name(&self, id: ElementId) -> String {
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(current_id) = current {
            if current_id == ElementId::ROOT {
                break;
            }
            let Some(element) = self.get(current_id) else {
                break;
            };
            segments.push(element.name.as_str());
            current = element.parent;
        }
        segments.reverse();
        segments.join(".")
    }

    /// Innermost element (other than the root) whose span covers `line`.
    #[must_use]
    pub fn element_at_line(&self, line: u32) -> Option<ElementId> {
        let mut current = ElementId::ROOT;
        loop {
            let next = self
                .children(current)
                .find(|(_, child)| child.span.contains_line(line))
                .map(|(id, _)| id);
            match next {
                Some(id) => current = id,
                None => break,
            }
        }
        (current != ElementId::ROOT).then_some(current)
    }

    /// Foldable ranges for every element spanning more than one line.
    #[must_use]
    pub fn fold_ranges(&self) -> Vec<FoldRange> {
        self.iter()
            .filter(|entry| entry.element.last_line() > entry.element.span.start_line)
            .map(|entry| FoldRange {
                id: entry.id,
                start_line: entry.element.span.start_line,
                end_line: entry.element.last_line(),
            })
            .collect()
    }

    #[must_use]
    pub fn imports(&self) -> &[Import] {
        &self.imports
    }
}

/// One step of [`Outline::iter`].
#[derive(Debug, Clone, Copy)]
pub struct WalkEntry<'a> {
    pub id: ElementId,
    pub depth: usize,
    pub element: &'a Element,
}

/// Pre-order iterator returned by [`Outline::iter`].
#[derive(Debug)]
pub struct Walk<'a> {
    outline: &'a Outline,
    stack: Vec<(ElementId, usize)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = WalkEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        let element = &self.outline.elements[id.0];
        self.stack
            .extend(element.children.iter().rev().map(|&child| (child, depth + 1)));
        Some(WalkEntry { id, depth, element })
    }
}

//! Flat, grouped view of an outline for selection lists.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::outline::Outline;
use crate::types::ElementKind;

/// Section an entry is listed under, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PickerGroup {
    Functions,
    Classes,
    Methods,
    Fields,
}

impl PickerGroup {
    pub const ALL: [Self; 4] = [Self::Functions, Self::Classes, Self::Methods, Self::Fields];

    /// Group for an element kind; `None` for modules.
    #[must_use]
    pub const fn of(kind: ElementKind) -> Option<Self> {
        match kind {
            ElementKind::Function
            | ElementKind::AsyncFunction
            | ElementKind::ContextManager
            | ElementKind::LambdaBinding
            | ElementKind::NestedFunction => Some(Self::Functions),
            ElementKind::Class => Some(Self::Classes),
            ElementKind::Method
            | ElementKind::Property
            | ElementKind::Classmethod
            | ElementKind::Staticmethod => Some(Self::Methods),
            ElementKind::Field => Some(Self::Fields),
            ElementKind::Module => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Functions => "Functions",
            Self::Classes => "Classes",
            Self::Methods => "Methods",
            Self::Fields => "Fields",
        }
    }
}

impl fmt::Display for PickerGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a group label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown element group '{0}' (expected functions, classes, methods or fields)")]
pub struct UnknownGroup(pub String);

impl FromStr for PickerGroup {
    type Err = UnknownGroup;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|group| group.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownGroup(s.to_string()))
    }
}

/// One selectable row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerEntry {
    /// Stable identity: `kind:name:line`.
    pub key: String,
    pub name: String,
    pub qualified_name: String,
    pub kind: ElementKind,
    pub group: PickerGroup,
    /// First line of the element, decorators included.
    pub line: u32,
    /// Last line of the element (inclusive).
    pub end_line: u32,
    pub display_name: String,
    pub line_label: String,
}

/// Every non-module element of `outline` in source order.
#[must_use]
pub fn picker_entries(outline: &Outline) -> Vec<PickerEntry> {
    outline
        .iter()
        .filter_map(|entry| {
            let element = entry.element;
            let group = PickerGroup::of(element.kind)?;
            let line = element.span.start_line;
            let end_line = element.last_line();

            let mut display_name = element.name.clone();
            if element.kind == ElementKind::Class && !element.bases.is_empty() {
                display_name.push('(');
                display_name.push_str(&element.bases.join(", "));
                display_name.push(')');
            }
            if let Some(decorator) = element.primary_decorator() {
                display_name.push_str(" @");
                display_name.push_str(decorator);
            }

            Some(PickerEntry {
                key: format!("{}:{}:{line}", element.kind, element.name),
                name: element.name.clone(),
                qualified_name: outline.qualified_name(entry.id),
                kind: element.kind,
                group,
                line,
                end_line,
                display_name,
                line_label: line_label(line, end_line),
            })
        })
        .collect()
}

/// `L12` for one line, `L12-20` for a range.
#[must_use]
pub fn line_label(line: u32, end_line: u32) -> String {
    if end_line > line {
        format!("L{line}-{end_line}")
    } else {
        format!("L{line}")
    }
}

/// Split entries into their non-empty groups, in group order.
#[must_use]
pub fn group_entries(entries: &[PickerEntry]) -> Vec<(PickerGroup, Vec<&PickerEntry>)> {
    PickerGroup::ALL
        .into_iter()
        .filter_map(|group| {
            let members: Vec<_> = entries.iter().filter(|e| e.group == group).collect();
            (!members.is_empty()).then_some((group, members))
        })
        .collect()
}

/// Source text of one selected entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Excerpt {
    pub key: String,
    pub qualified_name: String,
    pub line: u32,
    pub end_line: u32,
    pub text: String,
}

/// Set of selected entry keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    keys: BTreeSet<String>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one key; returns whether it is now selected.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.keys.remove(key) {
            false
        } else {
            self.keys.insert(key.to_string());
            true
        }
    }

    /// Select the whole group, or clear it when it is already fully selected.
    pub fn toggle_group(&mut self, group: PickerGroup, entries: &[PickerEntry]) {
        let members: Vec<&PickerEntry> = entries.iter().filter(|e| e.group == group).collect();
        let all_selected = members.iter().all(|e| self.keys.contains(&e.key));
        for entry in members {
            if all_selected {
                self.keys.remove(&entry.key);
            } else {
                self.keys.insert(entry.key.clone());
            }
        }
    }

    #[must_use]
    pub fn is_selected(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Selected entries, in entry order.
    #[must_use]
    pub fn selected<'a>(&self, entries: &'a [PickerEntry]) -> Vec<&'a PickerEntry> {
        entries.iter().filter(|e| self.is_selected(&e.key)).collect()
    }

    /// Lines of `source` covered by each selected entry.
    #[must_use]
    pub fn excerpts(&self, source: &str, entries: &[PickerEntry]) -> Vec<Excerpt> {
        let lines: Vec<&str> = source.lines().collect();
        self.selected(entries)
            .into_iter()
            .map(|entry| {
                let from = (entry.line as usize).saturating_sub(1).min(lines.len());
                let to = (entry.end_line as usize).clamp(from, lines.len());
                Excerpt {
                    key: entry.key.clone(),
                    qualified_name: entry.qualified_name.clone(),
                    line: entry.line,
                    end_line: entry.end_line,
                    text: lines[from..to].join("\n"),
                }
            })
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

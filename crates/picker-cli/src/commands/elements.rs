use picker_parser::{ExtractionError, PickerEntry, PickerGroup, group_entries, picker_entries};
use serde::Serialize;

use crate::cli::root_commands::ElementsArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::{AppContext, LoadedSource};
use crate::output::output;

#[derive(Debug, Serialize)]
struct GroupSection {
    group: PickerGroup,
    label: &'static str,
    entries: Vec<PickerEntry>,
}

#[derive(Debug, Serialize)]
struct ElementsResponse {
    file: String,
    total: usize,
    groups: Vec<GroupSection>,
    errors: Vec<ExtractionError>,
}

#[derive(Debug, Serialize)]
struct ElementRow {
    group: &'static str,
    name: String,
    lines: String,
    key: String,
}

fn build(source: &LoadedSource, args: &ElementsArgs, include_fields: bool) -> ElementsResponse {
    let entries: Vec<PickerEntry> = picker_entries(&source.extraction.outline)
        .into_iter()
        .filter(|entry| include_fields || entry.group != PickerGroup::Fields)
        .filter(|entry| args.group.is_none_or(|group| entry.group == group))
        .collect();

    let groups = group_entries(&entries)
        .into_iter()
        .map(|(group, members)| GroupSection {
            group,
            label: group.label(),
            entries: members.into_iter().cloned().collect(),
        })
        .collect();

    ElementsResponse {
        file: source.display_path(),
        total: entries.len(),
        groups,
        errors: source.extraction.errors.clone(),
    }
}

fn table_rows(response: &ElementsResponse) -> Vec<ElementRow> {
    response
        .groups
        .iter()
        .flat_map(|section| {
            section.entries.iter().map(|entry| ElementRow {
                group: section.label,
                name: entry.display_name.clone(),
                lines: entry.line_label.clone(),
                key: entry.key.clone(),
            })
        })
        .collect()
}

/// Handle `picker elements`.
pub fn handle(args: &ElementsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let source = ctx.load(&args.file)?;
    let include_fields = ctx.config.picker.include_fields && !args.no_fields;
    let response = build(&source, args, include_fields);
    match flags.format {
        OutputFormat::Table => output(&table_rows(&response), flags.format),
        OutputFormat::Json | OutputFormat::Raw => output(&response, flags.format),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use picker_config::PickerConfig;
    use pretty_assertions::assert_eq;

    use super::*;

    const SOURCE: &str = "\
VERSION = 2

class Point:
    x: int

    @property
    def norm(self):
        return 0

square = lambda v: v * v
";

    fn load() -> LoadedSource {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("point.py");
        std::fs::write(&path, SOURCE).expect("write source");
        AppContext::new(PickerConfig::default(), None)
            .load(&path)
            .expect("load")
    }

    fn args(group: Option<PickerGroup>) -> ElementsArgs {
        ElementsArgs {
            file: PathBuf::from("point.py"),
            group,
            no_fields: false,
        }
    }

    fn summary(response: &ElementsResponse) -> Vec<(&'static str, Vec<String>)> {
        response
            .groups
            .iter()
            .map(|section| {
                (
                    section.label,
                    section.entries.iter().map(|e| e.key.clone()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn entries_are_grouped_in_section_order() {
        let response = build(&load(), &args(None), true);
        assert_eq!(response.total, 5);
        assert_eq!(
            summary(&response),
            vec![
                ("Functions", vec!["lambda_binding:square:10".to_string()]),
                ("Classes", vec!["class:Point:3".to_string()]),
                ("Methods", vec!["property:norm:6".to_string()]),
                (
                    "Fields",
                    vec!["field:VERSION:1".to_string(), "field:x:4".to_string()]
                ),
            ]
        );
    }

    #[test]
    fn fields_can_be_left_out() {
        let response = build(&load(), &args(None), false);
        assert_eq!(response.total, 3);
        assert!(response.groups.iter().all(|s| s.group != PickerGroup::Fields));
    }

    #[test]
    fn group_filter_keeps_one_section() {
        let response = build(&load(), &args(Some(PickerGroup::Methods)), true);
        assert_eq!(
            summary(&response),
            vec![("Methods", vec!["property:norm:6".to_string()])]
        );
    }

    #[test]
    fn table_rows_flatten_sections() {
        let rows = table_rows(&build(&load(), &args(None), true));
        let first = &rows[1];
        assert_eq!(
            (first.group, first.name.as_str(), first.lines.as_str()),
            ("Classes", "Point", "L3-8")
        );
        assert_eq!(rows[2].name, "norm @property");
    }
}

use anyhow::bail;
use picker_parser::{
    Excerpt, ExtractionError, PickerEntry, PickerGroup, Selection, line_label,
    picker_entries,
};
use serde::Serialize;

use crate::cli::root_commands::SelectArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SelectResponse {
    file: String,
    excerpts: Vec<Excerpt>,
    errors: Vec<ExtractionError>,
}

/// Apply key and group toggles in order; unknown keys are an error.
fn select(
    entries: &[PickerEntry],
    keys: &[String],
    groups: &[PickerGroup],
) -> anyhow::Result<Selection> {
    let mut selection = Selection::new();
    for key in keys {
        if !entries.iter().any(|entry| &entry.key == key) {
            bail!("unknown element key '{key}' (list keys with `picker elements`)");
        }
        selection.toggle(key);
    }
    for group in groups {
        selection.toggle_group(*group, entries);
    }
    Ok(selection)
}

fn render_text(excerpts: &[Excerpt]) -> String {
    excerpts
        .iter()
        .map(|excerpt| {
            format!(
                "# {} ({})\n{}",
                excerpt.qualified_name,
                line_label(excerpt.line, excerpt.end_line),
                excerpt.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Handle `picker select`.
pub fn handle(args: &SelectArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if args.keys.is_empty() && args.group.is_empty() {
        bail!("select: pass at least one element key or --group");
    }
    let source = ctx.load(&args.file)?;
    let entries = picker_entries(&source.extraction.outline);
    let selection = select(&entries, &args.keys, &args.group)?;
    let excerpts = selection.excerpts(&source.text(), &entries);
    tracing::debug!(selected = selection.len(), "collected excerpts");

    if flags.format == OutputFormat::Table {
        println!("{}", render_text(&excerpts));
        return Ok(());
    }
    output(
        &SelectResponse {
            file: source.display_path(),
            excerpts,
            errors: source.extraction.errors.clone(),
        },
        flags.format,
    )
}

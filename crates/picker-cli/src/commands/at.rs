use anyhow::bail;
use picker_parser::{ElementKind, Outline};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AtArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize, PartialEq, Eq)]
struct AtResponse {
    file: String,
    line: u32,
    qualified_name: Option<String>,
    kind: Option<ElementKind>,
    start_line: Option<u32>,
    end_line: Option<u32>,
}

fn build(file: String, outline: &Outline, line: u32) -> AtResponse {
    let hit = outline
        .element_at_line(line)
        .and_then(|id| Some((outline.qualified_name(id), outline.get(id)?)));
    AtResponse {
        file,
        line,
        qualified_name: hit.as_ref().map(|(name, _)| name.clone()),
        kind: hit.as_ref().map(|(_, element)| element.kind),
        start_line: hit.as_ref().map(|(_, element)| element.span.start_line),
        end_line: hit.as_ref().map(|(_, element)| element.last_line()),
    }
}

/// Handle `picker at`.
pub fn handle(args: &AtArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if args.line == 0 {
        bail!("line numbers start at 1");
    }
    let source = ctx.load(&args.file)?;
    let response = build(
        source.display_path(),
        &source.extraction.outline,
        args.line,
    );
    if response.qualified_name.is_none() {
        tracing::debug!(line = args.line, "no element covers the line");
    }
    output(&response, flags.format)
}

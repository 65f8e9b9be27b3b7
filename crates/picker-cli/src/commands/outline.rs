use picker_parser::{ElementKind, ExtractionError, Import, Language, Visibility, line_label};
use serde::Serialize;

use crate::cli::root_commands::FileArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::{AppContext, LoadedSource};
use crate::output::output;

#[derive(Debug, Serialize)]
struct OutlineElement {
    qualified_name: String,
    depth: usize,
    kind: ElementKind,
    name: String,
    line: u32,
    end_line: u32,
    header_line: u32,
    signature: String,
    decorators: Vec<String>,
    bases: Vec<String>,
    doc: Option<String>,
    is_async: bool,
    is_generator: bool,
    visibility: Visibility,
}

#[derive(Debug, Serialize)]
struct OutlineResponse {
    file: String,
    language: Language,
    complete: bool,
    elements: Vec<OutlineElement>,
    imports: Vec<Import>,
    errors: Vec<ExtractionError>,
}

#[derive(Debug, Serialize)]
struct OutlineRow {
    name: String,
    kind: ElementKind,
    lines: String,
}

fn build(source: &LoadedSource) -> OutlineResponse {
    let outline = &source.extraction.outline;
    let elements = outline
        .iter()
        .map(|entry| {
            let element = entry.element;
            OutlineElement {
                qualified_name: outline.qualified_name(entry.id),
                depth: entry.depth,
                kind: element.kind,
                name: element.name.clone(),
                line: element.span.start_line,
                end_line: element.last_line(),
                header_line: element.header_line,
                signature: element.signature.clone(),
                decorators: element.decorators.clone(),
                bases: element.bases.clone(),
                doc: element.doc.clone(),
                is_async: element.is_async,
                is_generator: element.is_generator,
                visibility: element.visibility,
            }
        })
        .collect();

    OutlineResponse {
        file: source.display_path(),
        language: source.language,
        complete: source.extraction.is_complete(),
        elements,
        imports: outline.imports().to_vec(),
        errors: source.extraction.errors.clone(),
    }
}

fn table_rows(response: &OutlineResponse) -> Vec<OutlineRow> {
    response
        .elements
        .iter()
        .map(|element| OutlineRow {
            name: format!("{}{}", "  ".repeat(element.depth), element.name),
            kind: element.kind,
            lines: line_label(element.line, element.end_line),
        })
        .collect()
}

/// Handle `picker outline`.
pub fn handle(args: &FileArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let source = ctx.load(&args.file)?;
    let response = build(&source);
    match flags.format {
        OutputFormat::Table => output(&table_rows(&response), flags.format),
        OutputFormat::Json | OutputFormat::Raw => output(&response, flags.format),
    }
}

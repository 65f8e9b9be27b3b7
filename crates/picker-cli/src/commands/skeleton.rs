use picker_parser::{ExtractionError, summarize};
use serde::Serialize;

use crate::cli::root_commands::FileArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SkeletonResponse {
    file: String,
    skeleton: String,
    errors: Vec<ExtractionError>,
}

/// Handle `picker skeleton`.
pub fn handle(args: &FileArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let source = ctx.load(&args.file)?;
    let skeleton = summarize(&source.extraction.outline);

    if flags.format == OutputFormat::Table {
        println!("{skeleton}");
        return Ok(());
    }
    output(
        &SkeletonResponse {
            file: source.display_path(),
            skeleton,
            errors: source.extraction.errors.clone(),
        },
        flags.format,
    )
}

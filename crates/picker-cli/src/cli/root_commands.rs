use std::path::PathBuf;

use clap::{Args, Subcommand};
use picker_parser::PickerGroup;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Print the element tree of a source file.
    Outline(FileArgs),
    /// List selectable elements, grouped by section.
    Elements(ElementsArgs),
    /// Print a compact summary of imports, classes and functions.
    Skeleton(FileArgs),
    /// Show the innermost element covering a line.
    At(AtArgs),
    /// Print the source of the selected elements.
    Select(SelectArgs),
}

#[derive(Clone, Debug, Args)]
pub struct FileArgs {
    /// Source file to read
    pub file: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct ElementsArgs {
    /// Source file to read
    pub file: PathBuf,

    /// Only list one section: functions, classes, methods, fields
    #[arg(short, long)]
    pub group: Option<PickerGroup>,

    /// Leave fields out even when `picker.include_fields` is set
    #[arg(long)]
    pub no_fields: bool,
}

#[derive(Clone, Debug, Args)]
pub struct AtArgs {
    /// Source file to read
    pub file: PathBuf,

    /// 1-based line number
    pub line: u32,
}

#[derive(Clone, Debug, Args)]
pub struct SelectArgs {
    /// Source file to read
    pub file: PathBuf,

    /// Element keys as listed by `picker elements` (e.g. `method:get:72`)
    pub keys: Vec<String>,

    /// Toggle a whole section (repeatable)
    #[arg(short, long)]
    pub group: Vec<PickerGroup>,
}

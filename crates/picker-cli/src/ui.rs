//! Terminal presentation settings for table output.

use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{ColorMode, GlobalFlags, OutputFormat};

/// Narrower terminals are treated as unknown width.
const MIN_TERM_WIDTH: usize = 40;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiPrefs {
    pub table_color: bool,
    pub term_width: Option<usize>,
}

impl UiPrefs {
    fn resolve(flags: &GlobalFlags, is_tty: bool, no_color: bool, columns: Option<&str>) -> Self {
        let table = flags.format == OutputFormat::Table;
        let table_color = table
            && match flags.color {
                ColorMode::Always => true,
                ColorMode::Never => false,
                ColorMode::Auto => is_tty && !no_color && !flags.quiet,
            };
        let term_width = columns
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|width| *width >= MIN_TERM_WIDTH);
        Self {
            table_color,
            term_width,
        }
    }
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let columns = std::env::var("COLUMNS").ok();
    let _ = UI_PREFS.set(UiPrefs::resolve(
        flags,
        std::io::stdout().is_terminal(),
        std::env::var_os("NO_COLOR").is_some(),
        columns.as_deref(),
    ));
}

#[must_use]
pub fn prefs() -> UiPrefs {
    UI_PREFS.get().copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn flags(format: OutputFormat, color: ColorMode) -> GlobalFlags {
        GlobalFlags {
            format,
            color,
            quiet: false,
            language: None,
        }
    }

    #[test]
    fn auto_color_needs_a_tty_table_and_no_opt_out() {
        let table = flags(OutputFormat::Table, ColorMode::Auto);
        assert!(UiPrefs::resolve(&table, true, false, None).table_color);
        assert!(!UiPrefs::resolve(&table, false, false, None).table_color);
        assert!(!UiPrefs::resolve(&table, true, true, None).table_color);

        let json = flags(OutputFormat::Json, ColorMode::Always);
        assert!(!UiPrefs::resolve(&json, true, false, None).table_color);
    }

    #[test]
    fn narrow_or_invalid_columns_are_ignored() {
        let table = flags(OutputFormat::Table, ColorMode::Never);
        let width = |columns| UiPrefs::resolve(&table, false, false, columns).term_width;
        assert_eq!(width(Some("120")), Some(120));
        assert_eq!(width(Some("20")), None);
        assert_eq!(width(Some("wide")), None);
        assert_eq!(width(None), None);
    }
}

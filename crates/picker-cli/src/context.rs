//! Shared state for command handlers: configuration and source loading.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use picker_config::PickerConfig;
use picker_parser::{Extraction, Language, detect_language, extract_bytes_with};

pub struct AppContext {
    pub config: PickerConfig,
    language: Option<Language>,
}

/// A file read from disk together with its outline.
pub struct LoadedSource {
    pub path: PathBuf,
    pub language: Language,
    bytes: Vec<u8>,
    pub extraction: Extraction,
}

impl LoadedSource {
    /// Source text; invalid UTF-8 is replaced, past the extracted prefix.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    #[must_use]
    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

impl AppContext {
    #[must_use]
    pub const fn new(config: PickerConfig, language: Option<Language>) -> Self {
        Self { config, language }
    }

    /// Language from `--language`, else from the file extension.
    pub fn language_for(&self, path: &Path) -> anyhow::Result<Language> {
        if let Some(language) = self.language {
            return Ok(language);
        }
        detect_language(&path.to_string_lossy()).with_context(|| {
            format!(
                "cannot detect the language of '{}'; pass --language",
                path.display()
            )
        })
    }

    /// Read `path`, refusing files over `limits.max_input_bytes`, and extract it.
    pub fn load(&self, path: &Path) -> anyhow::Result<LoadedSource> {
        let language = self.language_for(path)?;

        let metadata = std::fs::metadata(path)
            .with_context(|| format!("failed to read '{}'", path.display()))?;
        if !metadata.is_file() {
            bail!("'{}' is not a regular file", path.display());
        }
        let max = self.config.limits.max_input_bytes;
        if !self.config.limits.allows(metadata.len()) {
            bail!(
                "'{}' is {} bytes, over the {max} byte limit (limits.max_input_bytes)",
                path.display(),
                metadata.len()
            );
        }

        let bytes =
            std::fs::read(path).with_context(|| format!("failed to read '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), %language, "loaded source");

        let extraction = extract_bytes_with(&bytes, language, &self.config.extract.options());
        Ok(LoadedSource {
            path: path.to_path_buf(),
            language,
            bytes,
            extraction,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use picker_config::LimitsConfig;
    use pretty_assertions::assert_eq;

    use super::*;

    fn write_source(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).expect("create source file");
        file.write_all(contents).expect("write source file");
        path
    }

    #[test]
    fn loads_and_extracts_python_by_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_source(&dir, "app.py", b"class A:\n    def m(self):\n        pass\n");

        let ctx = AppContext::new(PickerConfig::default(), None);
        let loaded = ctx.load(&path).expect("load should work");

        assert_eq!(loaded.language, Language::Python);
        assert!(loaded.extraction.is_complete());
        assert!(loaded.extraction.outline.find_path("A.m").is_some());
        assert!(loaded.text().starts_with("class A:"));
    }

    #[test]
    fn unknown_extension_needs_language_flag() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_source(&dir, "script", b"def run():\n    pass\n");

        let error = AppContext::new(PickerConfig::default(), None)
            .load(&path)
            .err()
            .expect("detection should fail");
        assert!(error.to_string().contains("--language"));

        let loaded = AppContext::new(PickerConfig::default(), Some(Language::Python))
            .load(&path)
            .expect("explicit language");
        assert!(loaded.extraction.outline.find("run").is_some());
    }

    #[test]
    fn files_over_the_limit_are_refused() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_source(&dir, "big.py", b"x = 1\ny = 2\n");
        let config = PickerConfig {
            limits: LimitsConfig { max_input_bytes: 4 },
            ..PickerConfig::default()
        };

        let error = AppContext::new(config, None)
            .load(&path)
            .err()
            .expect("over the limit");
        assert!(error.to_string().contains("limits.max_input_bytes"));
    }

    #[test]
    fn missing_file_reports_the_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing.py");
        let error = AppContext::new(PickerConfig::default(), None)
            .load(&path)
            .err()
            .expect("missing file");
        assert!(format!("{error:#}").contains("missing.py"));
    }

    #[test]
    fn tab_width_comes_from_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        // a tab and a single space only line up when tabs are one column wide
        let path = write_source(&dir, "tabs.py", b"class A:\n x = 1\n\ty = 2\n");

        let loaded = AppContext::new(PickerConfig::default(), None)
            .load(&path)
            .expect("load");
        assert!(!loaded.extraction.is_complete());

        let mut config = PickerConfig::default();
        config.extract.tab_width = 1;
        let loaded = AppContext::new(config, None).load(&path).expect("load");
        assert!(loaded.extraction.is_complete());
        assert!(loaded.extraction.outline.find_path("A.y").is_some());
    }
}

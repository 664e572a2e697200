//! Run configuration

use std::path::PathBuf;

/// Where to look for email dumps and where to write the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Directory scanned for input files (not recursive)
    pub input_dir: PathBuf,

    /// Input file names start with this
    pub file_prefix: String,

    /// Input file names end with this
    pub file_suffix: String,

    /// Output table, relative paths resolve against `input_dir`
    pub output: PathBuf,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            file_prefix: "hycdx_option_quotes_".into(),
            file_suffix: ".txt".into(),
            output: PathBuf::from("option_quotes.csv"),
        }
    }
}

impl ExtractConfig {
    /// Default naming, rooted at `dir`
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: dir.into(),
            ..Self::default()
        }
    }

    /// Whether a file name looks like an input dump
    #[must_use]
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.len() >= self.file_prefix.len() + self.file_suffix.len()
            && file_name.starts_with(&self.file_prefix)
            && file_name.ends_with(&self.file_suffix)
    }

    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        if self.output.is_absolute() {
            self.output.clone()
        } else {
            self.input_dir.join(&self.output)
        }
    }
}

//! Directory-level run: discover dumps, scan each one, export the table

use crate::book::QuoteBook;
use crate::config::ExtractConfig;
use crate::error::Result;
use crate::scanner::scan_file;
use std::fs;
use std::path::PathBuf;
use tracing::{error, info};

/// Summary of a directory run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractReport {
    /// Files scanned to the end
    pub files_scanned: usize,

    /// Files that could not be read or stopped on a missing context.
    /// Records emitted before the failure are kept.
    pub files_failed: Vec<PathBuf>,

    pub records: usize,

    /// Table written, if any record was emitted
    pub output: Option<PathBuf>,
}

/// Input files in `config.input_dir`, sorted by file name
pub fn discover_inputs(config: &ExtractConfig) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();

    for entry in fs::read_dir(&config.input_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if entry.file_name().to_str().is_some_and(|name| config.matches(name)) {
            inputs.push(entry.path());
        }
    }

    inputs.sort();
    Ok(inputs)
}

/// Scan every input into one book without writing anything
pub fn collect_quotes(config: &ExtractConfig) -> Result<(QuoteBook, ExtractReport)> {
    let mut book = QuoteBook::new();
    let mut report = ExtractReport::default();

    for path in discover_inputs(config)? {
        info!(file = %path.display(), "Reading file");
        match scan_file(&path, &mut book) {
            Ok(_) => report.files_scanned += 1,
            Err(e) => {
                error!(file = %path.display(), error = %e, "Failed to scan file");
                report.files_failed.push(path);
            }
        }
    }

    report.records = book.len();
    Ok((book, report))
}

/// Scan every input and write the table when at least one record came out
pub fn extract_directory(config: &ExtractConfig) -> Result<ExtractReport> {
    let (book, mut report) = collect_quotes(config)?;

    if !book.is_empty() {
        let path = config.output_path();
        book.write_csv_path(&path)?;
        info!(file = %path.display(), records = book.len(), "Wrote quote table");
        report.output = Some(path);
    }

    Ok(report)
}

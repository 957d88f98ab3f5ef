use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::format::Report;

/// Width of the `-` rule separating records in the log file.
const SEPARATOR_WIDTH: usize = 80;

/// Append-only log-file sink.
///
/// Creates the file on first use. Concurrent writers rely on the
/// filesystem's append-mode guarantees; no locking here, and each record
/// goes out as a single write.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record: the report body, an 80-dash rule, a blank line.
    pub fn append(&self, report: &Report) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut record = String::with_capacity(report.body.len() + SEPARATOR_WIDTH + 2);
        record.push_str(&report.body);
        record.push_str(&"-".repeat(SEPARATOR_WIDTH));
        record.push_str("\n\n");
        file.write_all(record.as_bytes())
    }
}

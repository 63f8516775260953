//! Report file writing

use crate::crawler::CrawlReport;
use crate::output::markdown::{
    extract_org_name, format_content_dump, format_index, format_summary_report,
    sanitize_filename,
};
use crate::output::{OutputError, OutputResult};
use crate::summarize::Summary;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the index written next to the reports
pub const INDEX_FILE: &str = "index.md";

/// Writes markdown reports into one output directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
    org_name: String,
    generated_at: DateTime<Utc>,
}

impl ReportWriter {
    /// Creates the output directory if needed and infers the organization name
    ///
    /// # Arguments
    ///
    /// * `output_dir` - Directory the reports are written into
    /// * `report` - The crawl whose page titles name the files
    pub fn new(output_dir: impl Into<PathBuf>, report: &CrawlReport) -> OutputResult<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|e| {
            OutputError::Write(format!(
                "Failed to create output directory {}: {}",
                output_dir.display(),
                e
            ))
        })?;

        let titles: Vec<String> = report.corpus.iter().map(|p| p.title.clone()).collect();
        let org_name = sanitize_filename(&extract_org_name(&titles));

        Ok(Self {
            output_dir,
            org_name,
            generated_at: Utc::now(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// The sanitized organization name used in file names
    pub fn org_name(&self) -> &str {
        &self.org_name
    }

    /// Writes `<Org> - Summary.md`
    pub fn write_summary(&self, summary: &Summary) -> OutputResult<PathBuf> {
        let markdown = format_summary_report(summary, &self.org_name, &self.generated_at);
        self.write_file(&format!("{} - Summary.md", self.org_name), &markdown)
    }

    /// Writes `<Org>.md`
    pub fn write_dump(&self, report: &CrawlReport) -> OutputResult<PathBuf> {
        let markdown = format_content_dump(report, &self.org_name, &self.generated_at);
        self.write_file(&format!("{}.md", self.org_name), &markdown)
    }

    /// Writes `index.md` linking the given files
    pub fn write_index(&self, files: &[PathBuf]) -> OutputResult<PathBuf> {
        let names: Vec<String> = files
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();
        let markdown = format_index(&names, &self.generated_at);
        self.write_file(INDEX_FILE, &markdown)
    }

    fn write_file(&self, name: &str, contents: &str) -> OutputResult<PathBuf> {
        let path = self.output_dir.join(name);
        fs::write(&path, contents)?;
        tracing::info!("Wrote {}", path.display());
        Ok(path)
    }
}

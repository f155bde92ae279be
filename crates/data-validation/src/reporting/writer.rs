//! Persisting the cleaned table and the report.
//!
//! Both files are written to a temporary file inside the output directory
//! and renamed into place once complete, so a target path only ever holds
//! a finished file.

use crate::error::{Result, ValidationError};
use crate::reporting::ValidationReport;
use crate::types::{RunStatus, RunSummary};
use polars::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// Prefix of the cleaned data file name.
pub const CLEANED_PREFIX: &str = "cleaned_";

/// Prefix of the report file name.
pub const REPORT_PREFIX: &str = "validation_report_";

/// Target paths of a run's two outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub cleaned_data: PathBuf,
    pub report: PathBuf,
}

impl OutputPaths {
    /// `cleaned_<file name>` and `validation_report_<file stem>.json`
    /// inside `output_dir`.
    pub fn for_input(input: &Path, output_dir: &Path) -> Result<Self> {
        let (Some(file_name), Some(stem)) = (input.file_name(), input.file_stem()) else {
            return Err(ValidationError::InputNotFound {
                path: input.to_path_buf(),
            });
        };

        let mut cleaned = std::ffi::OsString::from(CLEANED_PREFIX);
        cleaned.push(file_name);
        let mut report = std::ffi::OsString::from(REPORT_PREFIX);
        report.push(stem);
        report.push(".json");

        Ok(Self {
            cleaned_data: output_dir.join(cleaned),
            report: output_dir.join(report),
        })
    }
}

/// Writes run outputs into one directory.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    output_dir: PathBuf,
    report_indent: usize,
}

impl OutputWriter {
    pub fn new(output_dir: impl Into<PathBuf>, report_indent: usize) -> Self {
        Self {
            output_dir: output_dir.into(),
            report_indent,
        }
    }

    /// Write the cleaned table and the report for `input`.
    ///
    /// The report is serialized before anything touches the disk. The
    /// output directory (and its parents) are created if missing.
    pub fn write(
        &self,
        input: &Path,
        data: &mut DataFrame,
        report: &ValidationReport,
    ) -> Result<RunSummary> {
        let paths = OutputPaths::for_input(input, &self.output_dir)?;
        let report_bytes = report.to_json_bytes(self.report_indent)?;

        fs::create_dir_all(&self.output_dir).map_err(|source| ValidationError::OutputDir {
            path: self.output_dir.clone(),
            source,
        })?;

        self.write_atomic(&paths.cleaned_data, |file| {
            CsvWriter::new(file)
                .include_header(true)
                .with_separator(b',')
                .with_quote_char(b'"')
                .finish(data)
                .map_err(|e| e.to_string())
        })?;
        info!("Cleaned data saved: {}", paths.cleaned_data.display());

        self.write_atomic(&paths.report, |file| {
            file.write_all(&report_bytes).map_err(|e| e.to_string())
        })?;
        info!("Report saved: {}", paths.report.display());

        Ok(RunSummary {
            status: RunStatus::Success,
            cleaned_data_path: paths.cleaned_data,
            report_path: paths.report,
        })
    }

    /// Write through a temporary file in the output directory, then rename
    /// it onto `target`. The temporary file is removed on failure.
    fn write_atomic<F>(&self, target: &Path, write: F) -> Result<()>
    where
        F: FnOnce(&mut File) -> std::result::Result<(), String>,
    {
        let output_error = |reason: String| ValidationError::OutputWrite {
            path: target.to_path_buf(),
            reason,
        };

        let mut tmp = NamedTempFile::new_in(&self.output_dir).map_err(|e| output_error(e.to_string()))?;
        write(tmp.as_file_mut()).map_err(output_error)?;
        tmp.as_file_mut()
            .flush()
            .map_err(|e| output_error(e.to_string()))?;
        tmp.persist(target)
            .map_err(|e| output_error(e.error.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColumnMap;
    use tempfile::TempDir;

    fn empty_report() -> ValidationReport {
        ValidationReport::builder()
            .missing_values(ColumnMap::new())
            .duplicate_rows(0)
            .inferred_schema(ColumnMap::new())
            .build()
            .unwrap()
    }

    #[test]
    fn test_output_paths() {
        let paths = OutputPaths::for_input(Path::new("/data/sales.csv"), Path::new("out")).unwrap();
        assert_eq!(paths.cleaned_data, PathBuf::from("out/cleaned_sales.csv"));
        assert_eq!(paths.report, PathBuf::from("out/validation_report_sales.json"));
    }

    #[test]
    fn test_output_paths_without_extension() {
        let paths = OutputPaths::for_input(Path::new("records"), Path::new("out")).unwrap();
        assert_eq!(paths.cleaned_data, PathBuf::from("out/cleaned_records"));
        assert_eq!(paths.report, PathBuf::from("out/validation_report_records.json"));
    }

    #[test]
    fn test_write_creates_nested_directory() {
        let dir = TempDir::new().unwrap();
        let output_dir = dir.path().join("a").join("b");
        let writer = OutputWriter::new(&output_dir, 4);

        let mut df = df! { "x" => &["1", "2"] }.unwrap();
        let summary = writer
            .write(Path::new("input.csv"), &mut df, &empty_report())
            .unwrap();

        assert_eq!(summary.status, RunStatus::Success);
        assert_eq!(
            fs::read_to_string(&summary.cleaned_data_path).unwrap(),
            "x\n1\n2\n"
        );
        assert!(summary.report_path.is_file());

        // only the two outputs, no leftover temporary files
        assert_eq!(fs::read_dir(&output_dir).unwrap().count(), 2);
    }

    #[test]
    fn test_unwritable_output_dir_is_output_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "not a directory").unwrap();

        let writer = OutputWriter::new(blocker.join("out"), 4);
        let mut df = df! { "x" => &["1"] }.unwrap();
        let err = writer
            .write(Path::new("input.csv"), &mut df, &empty_report())
            .unwrap_err();

        assert!(matches!(err, ValidationError::OutputDir { .. }));
        assert!(err.is_output_error());
    }
}

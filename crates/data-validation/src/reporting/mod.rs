//! Report assembly and output persistence.
//!
//! [`ReportBuilder`] collects the section each stage produces into a
//! [`ValidationReport`]; [`OutputWriter`] saves the cleaned table as CSV and
//! the report as JSON next to it.
//!
//! # Example
//!
//! ```rust,ignore
//! use data_validation::reporting::OutputWriter;
//!
//! let writer = OutputWriter::new("out", 4);
//! let summary = writer.write(Path::new("data.csv"), &mut cleaned, &report)?;
//! println!("{}", summary.report_path.display());
//! ```

mod report;
mod writer;

pub use report::{ReportBuilder, ValidationReport};
pub use writer::{CLEANED_PREFIX, OutputPaths, OutputWriter, REPORT_PREFIX};

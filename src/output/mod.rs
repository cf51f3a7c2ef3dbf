//! Response surface: renders match reports for the caller

pub mod formatter;

pub use formatter::{save_report_to_file, OutputFormatter, ReportGenerator};

//! Result aggregation.
//!
//! Turns a [`ResultSet`](crate::harness::ResultSet) into CSV tables:
//!
//! - the per-task report with batch totals,
//! - the cumulative scalability table (one row per invocation),
//! - optional convergence traces for plotting,
//! - optional repetition statistics per task (robustness table).

mod csv;
mod reporter;

pub use csv::{
    append_scalability_sample, format_fitness, format_seconds, report_file_name,
    write_convergence, write_report, write_report_file, write_robustness, FAILURE_MARKER,
    REPORT_HEADER, ROBUSTNESS_HEADER, SCALABILITY_FILE_NAME, SCALABILITY_HEADER,
};
pub use reporter::{log_summary, ReportPaths, Reporter};

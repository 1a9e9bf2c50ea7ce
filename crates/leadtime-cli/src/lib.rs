//! Library half of the `leadtime` binary: logging setup and the report
//! pipeline stages.

pub mod logging;
pub mod pipeline;
pub mod types;

pub use pipeline::{default_output_dir, parse_instant, run_report_pipeline};
pub use types::{ReportOutcome, ReportRequest};

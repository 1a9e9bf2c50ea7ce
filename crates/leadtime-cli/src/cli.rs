//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use leadtime_model::HomeDelivery;
use leadtime_report::ReportFormat;

#[derive(Parser)]
#[command(
    name = "leadtime",
    version,
    about = "Lead-time compliance reports for shipment exports",
    long_about = "Classify shipments against their promised business-day lead time.\n\n\
                  Appends zone, lead time, compliance category, remaining days and\n\
                  operational alerts to a shipment CSV or Excel export, and writes CSV, XLSX,\n\
                  JSON and Markdown reports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags and RUST_LOG).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow locality values in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Directory holding leadtime.toml, zones and holidays
    /// (default: $LEADTIME_STANDARDS_DIR, else the bundled standards).
    #[arg(long = "standards-dir", value_name = "DIR", global = true)]
    pub standards_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Enrich a shipment export and write the reports.
    Report(ReportArgs),

    /// List the configured holidays.
    Holidays(HolidaysArgs),

    /// List the AMBA localities and promised lead times.
    Zones,

    /// Evaluate a single shipment given on the command line.
    Classify(ClassifyArgs),
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Shipment export: CSV (comma or semicolon separated) or Excel workbook.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output directory for generated files (default: <INPUT dir>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Reports to write; repeat or comma-separate (default: all).
    #[arg(long = "format", value_enum, value_delimiter = ',')]
    pub formats: Vec<FormatArg>,

    /// Evaluation instant for alerts (default: now).
    #[arg(long = "as-of", value_name = "DATETIME")]
    pub as_of: Option<String>,

    /// Compute and print the summary without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Exit with status 2 when any shipment raises an alert.
    #[arg(long = "fail-on-alerts")]
    pub fail_on_alerts: bool,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Row selection, applied after enrichment.
#[derive(Args, Default)]
pub struct FilterArgs {
    /// Keep only this client.
    #[arg(long = "client", value_name = "NAME")]
    pub client: Option<String>,

    /// Keep only this sub-account.
    #[arg(long = "sub-account", value_name = "NAME")]
    pub sub_account: Option<String>,

    /// Keep only this destination agency.
    #[arg(long = "agency", value_name = "NAME")]
    pub agency: Option<String>,

    /// Keep only this home-delivery flag (si, no, sin-dato).
    #[arg(
        long = "home-delivery",
        value_name = "FLAG",
        value_parser = leadtime_core::parse_home_delivery_filter
    )]
    pub home_delivery: Option<HomeDelivery>,
}

#[derive(Parser)]
pub struct HolidaysArgs {
    /// Only list holidays of this year.
    #[arg(long = "year")]
    pub year: Option<i32>,
}

#[derive(Parser)]
pub struct ClassifyArgs {
    /// Destination locality as written in the export.
    #[arg(long = "locality")]
    pub locality: Option<String>,

    /// Status text.
    #[arg(long = "status", default_value = "")]
    pub status: String,

    /// Home-delivery flag (si, no, sin-dato).
    #[arg(
        long = "home-delivery",
        value_parser = leadtime_core::parse_home_delivery_filter,
        default_value = "sin-dato"
    )]
    pub home_delivery: HomeDelivery,

    /// Creation timestamp.
    #[arg(long = "created")]
    pub created: Option<String>,

    /// Last status change timestamp.
    #[arg(long = "last-status")]
    pub last_status: Option<String>,

    /// Evaluation instant for alerts (default: now).
    #[arg(long = "as-of", value_name = "DATETIME")]
    pub as_of: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Csv,
    Xlsx,
    Json,
    Markdown,
}

impl From<FormatArg> for ReportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => ReportFormat::Csv,
            FormatArg::Xlsx => ReportFormat::Xlsx,
            FormatArg::Json => ReportFormat::Json,
            FormatArg::Markdown => ReportFormat::Markdown,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

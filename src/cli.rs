//! CLI argument definitions for xlsx2vcard.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};

#[derive(Parser)]
#[command(
    name = "xlsx2vcard",
    version,
    about = "Convert an Excel file with address data to vCard files",
    long_about = "Convert an Excel file with address data to vCard 3.0 files.\n\n\
                  The first row of the sheet holds the column names; every following\n\
                  row becomes one <name>.vcf file in the output directory."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert an Excel file to one vCard file per contact row.
    Convert(ConvertArgs),

    /// Show the supported column names.
    Columns,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Path to the Excel file (.xlsx or .xls).
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Output directory (created if missing).
    #[arg(short = 'o', long = "output", value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// Read the sheet with this name instead of the first sheet.
    #[arg(long = "sheet", value_name = "NAME", conflicts_with = "sheet_index")]
    pub sheet: Option<String>,

    /// Read the sheet at this 0-based position instead of the first sheet.
    #[arg(long = "sheet-index", value_name = "N")]
    pub sheet_index: Option<usize>,

    /// How date cells are written: "serial", "iso8601" or a chrono format string.
    #[arg(long = "date-format", value_name = "FORMAT", default_value = "serial")]
    pub date_format: String,

    /// Escape `\`, `,`, `;` and line breaks inside values (RFC 6350).
    #[arg(long = "escape")]
    pub escape: bool,

    /// Encode rows on a single thread.
    #[arg(long = "sequential")]
    pub sequential: bool,

    /// Summary format printed after the conversion.
    #[arg(long = "report", value_enum, default_value = "text")]
    pub report: ReportFormatArg,
}

/// Summary output choices.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormatArg {
    Text,
    Json,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

//! Subcommand implementations for the xlsx2vcard binary.

use std::fs::File;

use anyhow::{bail, Context, Result};
use tracing::info_span;

use xlsx2vcard::{
    validate_input_path, CardExporter, CardOutcome, ConverterBuilder, DateFormat, EscapeMode,
    ExportReport, Field, SheetSelector,
};

use crate::cli::{ConvertArgs, ReportFormatArg};

/// Print the recognized column names, six per line.
pub fn run_columns() {
    let columns: Vec<&str> = Field::ALL.iter().map(|field| field.key()).collect();
    println!("Supported column names (case-insensitive):");
    for chunk in columns.chunks(6) {
        println!("   {}", chunk.join(", "));
    }
}

/// Convert one workbook into `.vcf` files.
///
/// Validates the input path, reads the selected sheet, encodes every record and
/// writes the cards into the output directory. Fails with "No contacts found in
/// file" when the sheet has a header but no non-empty rows.
pub fn run_convert(args: &ConvertArgs) -> Result<ExportReport> {
    let span = info_span!("convert", input = %args.input.display());
    let _guard = span.enter();

    validate_input_path(&args.input)?;

    let converter = ConverterBuilder::new()
        .with_sheet_selector(sheet_selector(args))
        .with_date_format(parse_date_format(&args.date_format))
        .with_escape_mode(if args.escape {
            EscapeMode::Rfc6350
        } else {
            EscapeMode::Verbatim
        })
        .with_parallel(!args.sequential)
        .build()
        .context("invalid options")?;

    if args.report == ReportFormatArg::Text {
        println!("Reading {}...", args.input.display());
    }
    let input = File::open(&args.input)
        .with_context(|| format!("open {}", args.input.display()))?;
    let records = converter
        .read_contacts(input)
        .with_context(|| format!("read {}", args.input.display()))?;

    if records.is_empty() {
        bail!("No contacts found in file");
    }

    let outcomes: Vec<CardOutcome> = converter.encode_all(&records);
    let report = CardExporter::new(&args.output)
        .export(&outcomes)
        .with_context(|| format!("write to {}", args.output.display()))?;
    Ok(report)
}

/// Print the export summary to stdout, as text lines or pretty JSON.
///
/// In text mode skipped rows are counted as failed in the summary line.
pub fn print_report(report: &ExportReport, format: ReportFormatArg) -> Result<()> {
    match format {
        ReportFormatArg::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        ReportFormatArg::Text => {
            for path in &report.created {
                let name = path.file_name().unwrap_or_default().to_string_lossy();
                println!("Created: {}", name);
            }
            for row in &report.skipped {
                println!("Skipped row {}: No name found", row);
            }
            for failed in &report.failed {
                println!("Failed to create {}: {}", failed.file, failed.error);
            }
            println!(
                "\nConversion complete: {} vCard(s) created, {} failed",
                report.successful(),
                report.failed_count()
            );
            println!("Output directory: {}", report.output_dir.display());
        }
    }
    Ok(())
}

fn sheet_selector(args: &ConvertArgs) -> SheetSelector {
    match (&args.sheet, args.sheet_index) {
        (Some(name), _) => SheetSelector::Name(name.clone()),
        (None, Some(index)) => SheetSelector::Index(index),
        (None, None) => SheetSelector::First,
    }
}

fn parse_date_format(value: &str) -> DateFormat {
    match value.to_ascii_lowercase().as_str() {
        "serial" => DateFormat::Serial,
        "iso8601" | "iso" => DateFormat::Iso8601,
        _ => DateFormat::Custom(value.to_string()),
    }
}

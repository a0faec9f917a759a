//! xlsx2vcard - Pure-Rust Excel contact sheet to vCard converter
//!
//! This crate reads a table of contacts from an Excel workbook (first row =
//! column names, one contact per following row) and turns every row into a
//! vCard 3.0 text block.
//!
//! Recognized column names (case-insensitive, whitespace ignored):
//! `name, firstname, lastname, email, phone, mobile, street, city, state, zip,
//! country, company, title, website`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsx2vcard::{CardExporter, ConverterBuilder};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new().build()?;
//!     let outcomes = converter.convert(File::open("contacts.xlsx")?)?;
//!
//!     let report = CardExporter::new("vcards").export(&outcomes)?;
//!     println!("{} vCard(s) created", report.successful());
//!     Ok(())
//! }
//! ```
//!
//! # Without a workbook
//!
//! The normalizer and encoder work on in-memory values:
//!
//! ```rust
//! use xlsx2vcard::{CardEncoder, CellValue, Header, RowNormalizer};
//!
//! let header = Header::from_names(&["First Name", "Last Name", "City"]);
//! let rows = vec![vec![
//!     CellValue::from("Jane"),
//!     CellValue::from("Doe"),
//!     CellValue::from("Paris"),
//! ]];
//!
//! let records = RowNormalizer::default().normalize_with_header(&header, &rows);
//! let card = CardEncoder::default().encode(&records[0]).unwrap();
//! assert!(card.as_text().contains("N:Doe;Jane;;;\n"));
//! ```

mod api;
mod builder;
mod encoder;
mod error;
mod export;
mod formatter;
pub mod logging;
mod normalizer;
mod parser;
mod record;
mod security;
mod types;

// 公開API
pub use api::{DateFormat, EscapeMode, SheetSelector};
pub use builder::{CardOutcome, Converter, ConverterBuilder};
pub use encoder::{resolve_name, Card, CardEncoder};
pub use error::XlsxToVCardError;
pub use export::{file_stem_for, CardExporter, ExportReport, FailedWrite};
pub use normalizer::{normalize_header, Header, RowNormalizer};
pub use parser::validate_input_path;
pub use record::{ContactRecord, Field};
pub use types::{CellValue, RawRow, Table};

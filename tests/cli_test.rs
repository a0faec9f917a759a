//! CLI Tests for xlsx2vcard
//!
//! Runs the compiled binary against generated workbooks.

use rust_xlsxwriter::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_xlsx2vcard"))
}

fn write_workbook(dir: &Path) -> Result<PathBuf, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "Name")?;
    worksheet.write_string(0, 1, "Email")?;
    worksheet.write_string(0, 2, "City")?;
    worksheet.write_string(1, 0, "Jane Doe")?;
    worksheet.write_string(1, 1, "jane@x.com")?;
    worksheet.write_string(1, 2, "Paris")?;
    worksheet.write_string(2, 2, "Lyon")?;

    let path = dir.join("contacts.xlsx");
    workbook.save(&path)?;
    Ok(path)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_columns_lists_supported_names() {
    let output = binary().arg("columns").output().unwrap();

    assert!(output.status.success());
    let text = stdout(&output);
    for key in ["name", "firstname", "lastname", "email", "website"] {
        assert!(text.contains(key), "missing {key} in {text}");
    }
}

#[test]
fn test_convert_writes_cards() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_workbook(dir.path()).unwrap();
    let out = dir.path().join("vcards");

    let output = binary()
        .arg("convert")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .output()
        .unwrap();

    assert!(output.status.success(), "{:?}", output);
    let text = stdout(&output);
    assert!(text.contains("Created: Jane_Doe.vcf"));
    assert!(text.contains("Skipped row 2: No name found"));
    assert!(text.contains("1 vCard(s) created, 1 failed"));

    let card = fs::read_to_string(out.join("Jane_Doe.vcf")).unwrap();
    assert_eq!(
        card,
        "BEGIN:VCARD\nVERSION:3.0\nFN:Jane Doe\nEMAIL;TYPE=INTERNET:jane@x.com\n\
         ADR:;;;Paris;;;\nEND:VCARD\n"
    );
}

#[test]
fn test_convert_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_workbook(dir.path()).unwrap();
    let out = dir.path().join("vcards");

    let output = binary()
        .args(["convert", "--report", "json", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .output()
        .unwrap();

    assert!(output.status.success(), "{:?}", output);
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["created"].as_array().unwrap().len(), 1);
    assert_eq!(report["skipped"], serde_json::json!([2]));
    assert_eq!(report["failed"], serde_json::json!([]));
}

#[test]
fn test_convert_rejects_non_excel_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("contacts.csv");
    fs::write(&input, "name\nJane\n").unwrap();

    let output = binary()
        .arg("convert")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains(".xlsx or .xls"));
}

#[test]
fn test_convert_missing_input() {
    let dir = tempfile::tempdir().unwrap();

    let output = binary()
        .arg("convert")
        .arg("-i")
        .arg(dir.path().join("missing.xlsx"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}

#[test]
fn test_convert_header_only_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let mut workbook = Workbook::new();
    workbook.add_worksheet().write_string(0, 0, "name").unwrap();
    let input = dir.path().join("empty.xlsx");
    workbook.save(&input).unwrap();

    let output = binary()
        .arg("convert")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("out"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No contacts found in file"));
}

//! Parser Module
//!
//! calamineを使用したExcelファイル読み込みの実装。

mod workbook;

pub use workbook::validate_input_path;
pub(crate) use workbook::WorkbookParser;

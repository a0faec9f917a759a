//! Workbook Parser
//!
//! calamineのラッパーとして、ワークブックを開きシートを`Table`として読み出します。

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::debug;

use crate::api::SheetSelector;
use crate::error::XlsxToVCardError;
use crate::security::SecurityConfig;
use crate::types::{CellValue, RawRow, Table};

/// 受け付ける入力ファイルの拡張子（小文字）
const SUPPORTED_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// 入力ファイルのパスを検証する
///
/// # 戻り値
///
/// * `Ok(())` - ファイルが存在し、拡張子が`.xlsx`または`.xls`（大文字小文字を区別しない）の場合
/// * `Err(XlsxToVCardError::Io)` - ファイルが存在しない場合
/// * `Err(XlsxToVCardError::UnsupportedInput)` - 拡張子がExcel形式でない場合
pub fn validate_input_path(path: &Path) -> Result<(), XlsxToVCardError> {
    if !path.is_file() {
        return Err(XlsxToVCardError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File '{}' not found", path.display()),
        )));
    }

    let supported = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()));

    if !supported {
        return Err(XlsxToVCardError::UnsupportedInput(format!(
            "Please provide an Excel file (.xlsx or .xls): {}",
            path.display()
        )));
    }

    Ok(())
}

/// ワークブックパーサー
///
/// 入力全体をメモリに読み込み、calamineの形式自動判定で開きます。
pub(crate) struct WorkbookParser {
    workbook: Sheets<Cursor<Vec<u8>>>,
}

impl WorkbookParser {
    /// ワークブックを開く
    ///
    /// # 引数
    ///
    /// * `reader` - Excelファイルを読み込むためのリーダー
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - ワークブックの読み込みに成功した場合
    /// * `Err(XlsxToVCardError::SecurityViolation)` - 入力サイズが上限を超えた場合
    /// * `Err(XlsxToVCardError::Parse)` - ワークブックとして解析できない場合
    pub fn open<R: Read>(reader: R) -> Result<Self, XlsxToVCardError> {
        let security_config = SecurityConfig::default();

        // 上限+1バイトまでしか読み込まない
        let mut buffer = Vec::new();
        let bytes_read = reader
            .take(security_config.max_input_file_size + 1)
            .read_to_end(&mut buffer)?;

        if bytes_read as u64 > security_config.max_input_file_size {
            return Err(XlsxToVCardError::SecurityViolation(format!(
                "Input file size exceeds maximum: {} bytes",
                security_config.max_input_file_size
            )));
        }

        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        Ok(Self { workbook })
    }

    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// シート選択方式に基づいてシートを選択
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 選択されたシート名
    /// * `Err(XlsxToVCardError::Config)` - シートが見つからない、またはインデックスが範囲外の場合
    pub fn select_sheet(&self, selector: &SheetSelector) -> Result<String, XlsxToVCardError> {
        let all_sheet_names = self.sheet_names();

        match selector {
            SheetSelector::First => all_sheet_names
                .into_iter()
                .next()
                .ok_or_else(|| XlsxToVCardError::Config("Workbook contains no sheets".to_string())),

            SheetSelector::Index(index) => {
                all_sheet_names.get(*index).cloned().ok_or_else(|| {
                    XlsxToVCardError::Config(format!(
                        "Sheet index {} is out of range (total: {})",
                        index,
                        all_sheet_names.len()
                    ))
                })
            }

            SheetSelector::Name(name) => {
                if !all_sheet_names.contains(name) {
                    return Err(XlsxToVCardError::Config(format!("Sheet '{}' not found", name)));
                }
                Ok(name.clone())
            }
        }
    }

    /// シートを読み込んで`Table`に変換する
    ///
    /// ヘッダー行は常にシートの1行目です。使用範囲が2行目以降から始まる場合、
    /// またはシートが空の場合は`header`が`None`になります。
    /// 列はA列を0とする絶対位置で読み込みます。
    pub fn read_table(&mut self, sheet_name: &str) -> Result<Table, XlsxToVCardError> {
        let range = self.workbook.worksheet_range(sheet_name)?;
        let table = range_to_table(sheet_name, &range);

        debug!(
            sheet = sheet_name,
            has_header = table.header.is_some(),
            rows = table.rows.len(),
            "read sheet"
        );
        Ok(table)
    }
}

/// calamineの範囲を`Table`に変換する
fn range_to_table(sheet_name: &str, range: &Range<Data>) -> Table {
    let (Some((start_row, _)), Some((end_row, end_col))) = (range.start(), range.end()) else {
        return Table {
            sheet: sheet_name.to_string(),
            header: None,
            rows: Vec::new(),
        };
    };

    let read_row = |row: u32| -> RawRow {
        (0..=end_col)
            .map(|col| {
                range
                    .get_value((row, col))
                    .map(to_cell_value)
                    .unwrap_or(CellValue::Empty)
            })
            .collect()
    };

    let header = (start_row == 0).then(|| read_row(0));
    let rows = (start_row.max(1)..=end_row).map(read_row).collect();

    Table {
        sheet: sheet_name.to_string(),
        header,
        rows,
    }
}

/// calamineのセル値を変換する
///
/// エラー値は空セルとして扱います。
fn to_cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::DateTime(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        _ => CellValue::Empty,
    }
}

//! Row Normalizer Module
//!
//! ヘッダー行とデータ行から`ContactRecord`の列を生成するモジュール。
//! ファイルやシートの存在を意識しない純粋な変換です。

use tracing::{debug, trace};

use crate::api::DateFormat;
use crate::error::XlsxToVCardError;
use crate::formatter::CellFormatter;
use crate::record::ContactRecord;
use crate::types::{CellValue, RawRow, Table};

/// ヘッダー名を正規化する
///
/// trim → 小文字化 → 空白文字をすべて除去。
///
/// ```rust
/// use xlsx2vcard::normalize_header;
///
/// assert_eq!(normalize_header(" First Name "), "firstname");
/// assert_eq!(normalize_header("email"), "email");
/// ```
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// 正規化済みヘッダー
///
/// 列位置ごとのキーを保持します。空文字列の列は無視されます。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    keys: Vec<String>,
}

impl Header {
    /// ヘッダー名の一覧から生成する（各名前は正規化される）
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            keys: names
                .iter()
                .map(|name| normalize_header(name.as_ref()))
                .collect(),
        }
    }

    /// 列位置ごとのキー
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// 列数
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// 列が1つもないかを判定
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn from_cells(cells: &[CellValue], formatter: &CellFormatter) -> Self {
        Self {
            keys: cells
                .iter()
                .map(|cell| normalize_header(&formatter.format_cell(cell)))
                .collect(),
        }
    }
}

/// 行ノーマライザー
///
/// # 使用例
///
/// ```rust
/// use xlsx2vcard::{CellValue, Header, RowNormalizer};
///
/// let normalizer = RowNormalizer::default();
/// let header = Header::from_names(&["Name", " E Mail "]);
/// let rows = vec![
///     vec![CellValue::from("Jane Doe"), CellValue::from("jane@x.com")],
///     vec![CellValue::Empty, CellValue::from("   ")],
/// ];
///
/// let records = normalizer.normalize_with_header(&header, &rows);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].name.as_deref(), Some("Jane Doe"));
/// assert_eq!(records[0].email.as_deref(), Some("jane@x.com"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RowNormalizer {
    formatter: CellFormatter,
}

impl RowNormalizer {
    /// 日付セルの出力形式を指定して生成する
    pub fn new(date_format: DateFormat) -> Self {
        Self {
            formatter: CellFormatter::new(date_format),
        }
    }

    /// シート全体を正規化する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<ContactRecord>)` - 空でない行ごとのレコード（データ行が0件なら空）
    /// * `Err(XlsxToVCardError::MissingHeader)` - ヘッダー行が存在しない場合
    pub fn normalize(&self, table: &Table) -> Result<Vec<ContactRecord>, XlsxToVCardError> {
        let header_cells = table
            .header
            .as_ref()
            .ok_or_else(|| XlsxToVCardError::MissingHeader {
                sheet: table.sheet.clone(),
            })?;

        let header = Header::from_cells(header_cells, &self.formatter);
        debug!(sheet = %table.sheet, columns = ?header.keys(), "normalized header");

        Ok(self.normalize_with_header(&header, &table.rows))
    }

    /// 正規化済みヘッダーでデータ行を正規化する
    ///
    /// 空の行（すべてのセルが空または空白のみ）はレコードを生成しません。
    pub fn normalize_with_header(&self, header: &Header, rows: &[RawRow]) -> Vec<ContactRecord> {
        rows.iter()
            .enumerate()
            .filter_map(|(idx, row)| {
                let record = self.normalize_row(header, row);
                if record.is_none() {
                    trace!(row = idx + 1, "dropped empty row");
                }
                record
            })
            .collect()
    }

    /// 1行を正規化する
    ///
    /// ヘッダーより短い行の不足セルは空として扱い、ヘッダーより長い部分は無視します。
    pub fn normalize_row(&self, header: &Header, row: &[CellValue]) -> Option<ContactRecord> {
        let mut record = ContactRecord::new();

        for (key, cell) in header.keys().iter().zip(row.iter()) {
            if key.is_empty() || cell.is_empty() {
                continue;
            }
            record.set(key, &self.formatter.format_cell(cell));
        }

        (!record.is_empty()).then_some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Field;

    fn text(s: &str) -> CellValue {
        CellValue::from(s)
    }

    fn table(header: Option<RawRow>, rows: Vec<RawRow>) -> Table {
        Table {
            sheet: "Sheet1".to_string(),
            header,
            rows,
        }
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header(" First Name "), "firstname");
        assert_eq!(normalize_header("E-MAIL\tAddress"), "e-mailaddress");
        assert_eq!(normalize_header("   "), "");
    }

    #[test]
    fn test_normalize_header_idempotent_for_normalized_input() {
        for field in Field::ALL {
            assert_eq!(normalize_header(field.key()), field.key());
        }
    }

    #[test]
    fn test_missing_header_is_fatal() {
        let normalizer = RowNormalizer::default();
        let result = normalizer.normalize(&table(None, vec![vec![text("Jane")]]));
        match result {
            Err(XlsxToVCardError::MissingHeader { sheet }) => assert_eq!(sheet, "Sheet1"),
            other => panic!("Expected MissingHeader, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_data_rows_is_not_an_error() {
        let normalizer = RowNormalizer::default();
        let records = normalizer
            .normalize(&table(Some(vec![text("name")]), Vec::new()))
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_case_insensitive_headers() {
        let normalizer = RowNormalizer::default();
        let records = normalizer
            .normalize(&table(
                Some(vec![text("First Name"), text("LASTNAME"), text(" Zip ")]),
                vec![vec![text("Jane"), text("Doe"), CellValue::Number(75001.0)]],
            ))
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get(Field::FirstName), Some("Jane"));
        assert_eq!(records[0].get(Field::LastName), Some("Doe"));
        assert_eq!(records[0].get(Field::Zip), Some("75001"));
    }

    #[test]
    fn test_empty_row_produces_no_record() {
        let normalizer = RowNormalizer::default();
        let header = Header::from_names(&["name", "email"]);
        let rows = vec![
            vec![CellValue::Empty, text("   ")],
            vec![],
            vec![text("Jane"), CellValue::Empty],
        ];

        let records = normalizer.normalize_with_header(&header, &rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name.as_deref(), Some("Jane"));
        assert!(!records[0].contains(Field::Email));
    }

    #[test]
    fn test_blank_header_column_is_ignored() {
        let normalizer = RowNormalizer::default();
        let records = normalizer
            .normalize(&table(
                Some(vec![text("name"), CellValue::Empty, text("  ")]),
                vec![
                    vec![text("Jane"), text("ignored"), text("ignored")],
                    vec![CellValue::Empty, text("only in blank column")],
                ],
            ))
            .unwrap();

        assert_eq!(records.len(), 1);
        assert!(records[0].extra.is_empty());
    }

    #[test]
    fn test_unknown_headers_are_carried() {
        let normalizer = RowNormalizer::default();
        let header = Header::from_names(&["Notes"]);
        let records = normalizer.normalize_with_header(&header, &[vec![text("VIP")]]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].extra("notes"), Some("VIP"));
    }

    #[test]
    fn test_values_are_trimmed() {
        let normalizer = RowNormalizer::default();
        let header = Header::from_names(&["city"]);
        let records = normalizer.normalize_with_header(&header, &[vec![text("  Paris \n")]]);
        assert_eq!(records[0].city.as_deref(), Some("Paris"));
    }

    #[test]
    fn test_cell_type_conversion() {
        let normalizer = RowNormalizer::default();
        let header = Header::from_names(&["phone", "title", "zip"]);
        let rows = vec![vec![
            CellValue::Number(49.9),
            CellValue::Bool(true),
            CellValue::DateTime(45658.2),
        ]];

        let records = normalizer.normalize_with_header(&header, &rows);
        assert_eq!(records[0].phone.as_deref(), Some("49"));
        assert_eq!(records[0].title.as_deref(), Some("true"));
        assert_eq!(records[0].zip.as_deref(), Some("45658"));
    }

    #[test]
    fn test_iso_date_cells() {
        let normalizer = RowNormalizer::new(DateFormat::Iso8601);
        let header = Header::from_names(&["title"]);
        let records =
            normalizer.normalize_with_header(&header, &[vec![CellValue::DateTime(45658.0)]]);
        assert_eq!(records[0].title.as_deref(), Some("2025-01-01"));
    }

    #[test]
    fn test_cells_beyond_header_are_ignored() {
        let normalizer = RowNormalizer::default();
        let header = Header::from_names(&["name"]);
        let records = normalizer.normalize_with_header(
            &header,
            &[vec![CellValue::Empty, text("beyond header")]],
        );
        assert!(records.is_empty());
    }

    #[test]
    fn test_numeric_header_cell() {
        let normalizer = RowNormalizer::default();
        let records = normalizer
            .normalize(&table(
                Some(vec![CellValue::Number(2024.0)]),
                vec![vec![text("x")]],
            ))
            .unwrap();
        assert_eq!(records[0].extra("2024"), Some("x"));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_normalize_header_is_idempotent(raw in "[ A-Za-z0-9_\\t-]{0,24}") {
                let once = normalize_header(&raw);
                prop_assert_eq!(normalize_header(&once), once.clone());
                prop_assert!(!once.chars().any(char::is_whitespace));
            }

            #[test]
            fn test_records_never_hold_blank_values(
                cells in proptest::collection::vec("[ a-z]{0,6}", 0..6)
            ) {
                let normalizer = RowNormalizer::default();
                let header = Header::from_names(&["name", "email", "city", "notes", "phone", "zip"]);
                let row: RawRow = cells.iter().map(|c| CellValue::from(c.as_str())).collect();

                match normalizer.normalize_row(&header, &row) {
                    Some(record) => {
                        for field in Field::ALL {
                            if let Some(value) = record.get(field) {
                                prop_assert!(!value.is_empty());
                                prop_assert_eq!(value, value.trim());
                            }
                        }
                    }
                    None => prop_assert!(cells.iter().all(|c| c.trim().is_empty())),
                }
            }
        }
    }
}

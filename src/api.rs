//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// シート選択方式
///
/// 連絡先データを読み込むシートを選択する方法を指定します。
/// 1回の変換で読み込むシートは常に1つです。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum SheetSelector {
    /// 最初のシート（デフォルト）
    #[default]
    First,

    /// インデックス指定（0始まり）
    ///
    /// 例: `SheetSelector::Index(1)` は2番目のシートを選択
    Index(usize),

    /// シート名指定
    ///
    /// 例: `SheetSelector::Name("Contacts".to_string())`
    Name(String),
}

/// 日付セルの出力形式
///
/// Excelの日付セルを文字列に変換する際の形式を指定します。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum DateFormat {
    /// シリアル値の整数部（デフォルト）
    ///
    /// 日付セルを数値セルと同じ規則で変換します。
    /// 例: `2025-11-20 09:30` → `45981`
    #[default]
    Serial,

    /// ISO 8601形式（YYYY-MM-DD）
    ///
    /// 例: `2025-11-20`
    Iso8601,

    /// カスタム形式（chrono互換フォーマット文字列）
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsx2vcard::{ConverterBuilder, DateFormat};
    ///
    /// # fn main() -> Result<(), xlsx2vcard::XlsxToVCardError> {
    /// let converter = ConverterBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%d.%m.%Y".to_string()))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    Custom(String),
}

/// フィールド値のエスケープ方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum EscapeMode {
    /// 値をそのまま出力（デフォルト）
    ///
    /// `;` `,` `\` 改行を含む値も加工せずに挿入します。
    #[default]
    Verbatim,

    /// RFC 6350のテキスト値エスケープを適用
    ///
    /// `\` → `\\`、`,` → `\,`、`;` → `\;`、改行 → `\n`
    ///
    /// `N`・`ADR`の構造区切りの`;`はエスケープされません。
    Rfc6350,
}

//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// xlsx2vcardクレート全体で使用するエラー型
///
/// Excelファイルの読み込み、行の正規化、vCardの書き出し中に発生する
/// バッチ単位のエラーを統一的に扱うために使用されます。
///
/// 名前を解決できないレコード（vCardを生成できない行）はエラーではなく、
/// `CardEncoder::encode()`が`None`を返すことで表現されます。
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー（ファイル読み込み・書き込み失敗など）
/// - `Parse`: Excelファイルの解析中に発生したエラー（calamine由来）
/// - `Config`: 設定の検証に失敗したエラー（存在しないシート名など）
/// - `MissingHeader`: ヘッダー行が存在しない
/// - `UnsupportedInput`: サポートされていない入力ファイル
/// - `SecurityViolation`: 入力サイズ制限などへの違反
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsx2vcard::XlsxToVCardError;
/// use std::fs::File;
///
/// fn read_excel_file(path: &str) -> Result<(), XlsxToVCardError> {
///     let file = File::open(path)?;  // Ioエラーが自動的に変換される
///     // ... 処理 ...
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum XlsxToVCardError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Excelファイルの解析中に発生したエラー
    ///
    /// ファイル形式が不正、破損したファイルなどが原因となります。
    /// `#[from]`属性により、`calamine::Error`から自動的に変換されます。
    #[error("Failed to parse Excel file: {0}")]
    Parse(#[from] calamine::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時の検証エラーや、シート選択の失敗
    /// （範囲外のインデックス、存在しないシート名）で発生します。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use xlsx2vcard::{ConverterBuilder, DateFormat, XlsxToVCardError};
    ///
    /// let result = ConverterBuilder::new()
    ///     .with_date_format(DateFormat::Custom(String::new()))
    ///     .build();
    ///
    /// match result {
    ///     Err(XlsxToVCardError::Config(msg)) => {
    ///         println!("設定エラー: {}", msg);
    ///     }
    ///     _ => {}
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// ヘッダー行が見つからないエラー
    ///
    /// シートの1行目（A1から始まる行）が存在しない場合に発生します。
    /// ヘッダーなしではどの列も正規化できないため、バッチ全体が中断されます。
    /// データ行が0件であることはエラーではありません。
    #[error("No headers found in sheet '{sheet}'")]
    MissingHeader {
        /// ヘッダーが見つからなかったシート名
        sheet: String,
    },

    /// サポートされていない入力
    ///
    /// 例: 拡張子が`.xlsx` / `.xls`ではないファイル
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力ファイルサイズの上限を超えた場合などに発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

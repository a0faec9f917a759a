//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use chrono::NaiveDate;
use rayon::prelude::*;
use std::io::Read;
use tracing::{debug, info};

use crate::api::{DateFormat, EscapeMode, SheetSelector};
use crate::encoder::{resolve_name, Card, CardEncoder};
use crate::error::XlsxToVCardError;
use crate::normalizer::RowNormalizer;
use crate::parser::WorkbookParser;
use crate::record::ContactRecord;
use crate::types::Table;

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// シート選択方式
    pub sheet_selector: SheetSelector,

    /// 日付形式
    pub date_format: DateFormat,

    /// フィールド値のエスケープ方式
    pub escape_mode: EscapeMode,

    /// レコードのエンコードを並列に行うか
    pub parallel: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            sheet_selector: SheetSelector::First,
            date_format: DateFormat::Serial,
            escape_mode: EscapeMode::Verbatim,
            parallel: true,
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsx2vcard::{ConverterBuilder, EscapeMode, SheetSelector};
///
/// # fn main() -> Result<(), xlsx2vcard::XlsxToVCardError> {
/// let converter = ConverterBuilder::new()
///     .with_sheet_selector(SheetSelector::Name("Contacts".to_string()))
///     .with_escape_mode(EscapeMode::Rfc6350)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConverterBuilder {
    config: ConversionConfig,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - シート選択: 最初のシート
    /// - 日付形式: シリアル値（数値セルと同じ規則）
    /// - エスケープ: なし（値をそのまま出力）
    /// - 並列エンコード: 有効
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// 読み込むシートを選択する
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// 日付セルの出力形式を指定する
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.config.date_format = format;
        self
    }

    /// フィールド値のエスケープ方式を指定する
    pub fn with_escape_mode(mut self, mode: EscapeMode) -> Self {
        self.config.escape_mode = mode;
        self
    }

    /// レコードのエンコードを並列に行うかを指定する
    ///
    /// 出力順序は設定にかかわらずレコード順です。
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `XlsxToVCardError::Config(String)`: カスタム日付形式が空、または不正な書式文字列
    pub fn build(self) -> Result<Converter, XlsxToVCardError> {
        if let DateFormat::Custom(ref format_str) = self.config.date_format {
            // テスト用の日付でフォーマット試行
            let test_date = NaiveDate::from_ymd_opt(2025, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .ok_or_else(|| XlsxToVCardError::Config("Failed to create test date".to_string()))?;
            let formatted = crate::formatter::render(&test_date, format_str).unwrap_or_default();
            if formatted.is_empty() {
                return Err(XlsxToVCardError::Config(format!(
                    "Invalid date format string: '{}'",
                    format_str
                )));
            }
        }

        Ok(Converter::new(self.config))
    }
}

/// 1レコード分のエンコード結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardOutcome {
    /// vCardを生成した
    Card {
        /// レコードの位置（0始まり）
        index: usize,
        /// 解決済みの表示名
        name: String,
        /// vCard
        card: Card,
    },

    /// 表示名を解決できずスキップした
    Skipped {
        /// レコードの位置（0始まり）
        index: usize,
    },
}

impl CardOutcome {
    /// レコードの位置（0始まり）
    pub fn index(&self) -> usize {
        match self {
            CardOutcome::Card { index, .. } | CardOutcome::Skipped { index } => *index,
        }
    }

    /// 生成したvCard（スキップの場合は`None`）
    pub fn card(&self) -> Option<&Card> {
        match self {
            CardOutcome::Card { card, .. } => Some(card),
            CardOutcome::Skipped { .. } => None,
        }
    }
}

/// 変換処理のファサード
///
/// ワークブックの読み込み → 行の正規化 → vCardエンコードをまとめて実行します。
/// ファイルへの書き出しは`CardExporter`が担当します。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsx2vcard::ConverterBuilder;
/// use std::fs::File;
///
/// # fn main() -> Result<(), xlsx2vcard::XlsxToVCardError> {
/// let converter = ConverterBuilder::new().build()?;
/// let outcomes = converter.convert(File::open("contacts.xlsx")?)?;
/// for outcome in &outcomes {
///     if let Some(card) = outcome.card() {
///         print!("{}", card);
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    config: ConversionConfig,
    normalizer: RowNormalizer,
    encoder: CardEncoder,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self {
            normalizer: RowNormalizer::new(config.date_format.clone()),
            encoder: CardEncoder::new(config.escape_mode),
            config,
        }
    }

    /// 選択されたシートを`Table`として読み込む
    pub fn read_table<R: Read>(&self, input: R) -> Result<Table, XlsxToVCardError> {
        let mut parser = WorkbookParser::open(input)?;
        let sheet_name = parser.select_sheet(&self.config.sheet_selector)?;
        parser.read_table(&sheet_name)
    }

    /// ワークブックを読み込み、正規化済みレコードを返す
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<ContactRecord>)` - 空でない行ごとのレコード（0件の場合も成功）
    /// * `Err(XlsxToVCardError::MissingHeader)` - シートにヘッダー行がない場合
    pub fn read_contacts<R: Read>(&self, input: R) -> Result<Vec<ContactRecord>, XlsxToVCardError> {
        let table = self.read_table(input)?;
        let records = self.normalizer.normalize(&table)?;
        info!(sheet = %table.sheet, records = records.len(), "read contacts");
        Ok(records)
    }

    /// 1レコードをエンコードする
    pub fn encode(&self, record: &ContactRecord) -> Option<Card> {
        self.encoder.encode(record)
    }

    /// すべてのレコードをエンコードする
    ///
    /// 結果はレコード順に並びます。
    pub fn encode_all(&self, records: &[ContactRecord]) -> Vec<CardOutcome> {
        let encode_one = |(index, record): (usize, &ContactRecord)| match self.encoder.encode(record)
        {
            Some(card) => CardOutcome::Card {
                index,
                name: resolve_name(record),
                card,
            },
            None => {
                debug!(row = index + 1, "skipped record without name");
                CardOutcome::Skipped { index }
            }
        };

        // インデックス付きcollectは元の順序を保つ
        let outcomes: Vec<CardOutcome> = if self.config.parallel {
            records.par_iter().enumerate().map(encode_one).collect()
        } else {
            records.iter().enumerate().map(encode_one).collect()
        };

        let cards = outcomes.iter().filter(|o| o.card().is_some()).count();
        info!(
            cards,
            skipped = outcomes.len() - cards,
            "encoded records"
        );
        outcomes
    }

    /// ワークブックを読み込み、レコードごとのエンコード結果を返す
    pub fn convert<R: Read>(&self, input: R) -> Result<Vec<CardOutcome>, XlsxToVCardError> {
        let records = self.read_contacts(input)?;
        Ok(self.encode_all(&records))
    }
}

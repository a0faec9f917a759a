//! Formatter Module
//!
//! セル値を文字列に変換する処理を提供するモジュール。
//! 数値は整数部のみ（切り捨て）、論理値は`true`/`false`、日付は`DateFormat`に従います。

use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::fmt::Write;

use crate::api::DateFormat;
use crate::types::CellValue;

/// セルフォーマッター
///
/// セル値の文字列変換のファサードとして機能します。
/// 変換は失敗しません。表現できない値は空文字列になります。
#[derive(Debug, Clone, Default)]
pub(crate) struct CellFormatter {
    /// 日付フォーマッター
    date_formatter: DateFormatter,
}

impl CellFormatter {
    /// 新しいCellFormatterインスタンスを生成
    pub fn new(date_format: DateFormat) -> Self {
        Self {
            date_formatter: DateFormatter { date_format },
        }
    }

    /// セル値を文字列に変換（trim前）
    pub fn format_cell(&self, value: &CellValue) -> String {
        match value {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_truncated(*n),
            CellValue::Bool(b) => b.to_string(),
            CellValue::DateTime(serial) => self.date_formatter.format(*serial),
            CellValue::Empty => String::new(),
        }
    }
}

/// 数値を整数部のみの10進表記に変換する
///
/// 小数部は四捨五入せずに切り捨てます（`49.9` → `"49"`、`-3.7` → `"-3"`）。
/// NaNは`"0"`、範囲外の値は`i64`の上限・下限に飽和します。
pub(crate) fn format_truncated(value: f64) -> String {
    (value.trunc() as i64).to_string()
}

/// 日付フォーマッター
///
/// Excelのシリアル日付値を文字列に変換します。
/// 1900年システム（1899年12月30日起算）として処理します。
#[derive(Debug, Clone, Default)]
pub(crate) struct DateFormatter {
    date_format: DateFormat,
}

impl DateFormatter {
    /// 日付値をフォーマット
    ///
    /// # 引数
    ///
    /// * `serial_value` - Excelのシリアル日付値
    ///
    /// # 戻り値
    ///
    /// フォーマット済み日付文字列。`DateFormat::Serial`の場合、
    /// および日付に変換できない値の場合はシリアル値の整数部。
    pub fn format(&self, serial_value: f64) -> String {
        let pattern = match &self.date_format {
            DateFormat::Serial => return format_truncated(serial_value),
            DateFormat::Iso8601 => "%Y-%m-%d",
            DateFormat::Custom(pattern) => pattern.as_str(),
        };

        match serial_to_datetime(serial_value).and_then(|dt| render(&dt, pattern)) {
            Some(formatted) => formatted,
            None => format_truncated(serial_value),
        }
    }
}

/// シリアル値を日時に変換する（1900年システム）
fn serial_to_datetime(serial_value: f64) -> Option<NaiveDateTime> {
    if !serial_value.is_finite() || serial_value < 0.0 {
        return None;
    }

    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let days = serial_value.floor();
    let seconds = ((serial_value - days) * 86_400.0).round() as i64;

    epoch
        .checked_add_signed(Duration::try_days(days as i64)?)?
        .checked_add_signed(Duration::try_seconds(seconds)?)
}

/// chrono書式で描画する
///
/// 不正な書式指定子を含む場合は`None`。
pub(crate) fn render(datetime: &NaiveDateTime, pattern: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", datetime.format(pattern)).ok()?;
    Some(out)
}

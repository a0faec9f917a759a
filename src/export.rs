//! Export Module
//!
//! エンコード結果を1件ずつ`.vcf`ファイルとして出力ディレクトリに書き出すモジュール。

use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::builder::CardOutcome;
use crate::encoder::Card;
use crate::error::XlsxToVCardError;
use crate::security::sanitize_file_stem;

/// vCardファイルの拡張子
const EXTENSION: &str = "vcf";

/// 同名ファイルの回避で試す連番の上限
const MAX_COLLISION_SUFFIX: usize = 10_000;

/// 書き込みに失敗したvCard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedWrite {
    /// 行番号（1始まり）
    pub row: usize,
    /// 書き込もうとしたファイル名
    pub file: String,
    /// エラーメッセージ
    pub error: String,
}

/// 書き出し結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    /// 出力ディレクトリ（可能なら絶対パス）
    pub output_dir: PathBuf,
    /// 作成したファイル
    pub created: Vec<PathBuf>,
    /// 表示名がなくスキップした行番号（1始まり）
    pub skipped: Vec<usize>,
    /// 書き込みに失敗したvCard
    pub failed: Vec<FailedWrite>,
}

impl ExportReport {
    /// 作成したvCardの数
    pub fn successful(&self) -> usize {
        self.created.len()
    }

    /// スキップと書き込み失敗の合計
    pub fn failed_count(&self) -> usize {
        self.skipped.len() + self.failed.len()
    }
}

/// 表示名からファイル名の語幹を決める
///
/// 名前が空の場合は`contact_<行番号>`を使用します。
pub fn file_stem_for(name: &str, index: usize) -> String {
    let stem = sanitize_file_stem(name);
    if stem.is_empty() {
        format!("contact_{}", index + 1)
    } else {
        stem
    }
}

/// vCardファイルの書き出し
///
/// # 使用例
///
/// ```rust,no_run
/// use std::fs::File;
/// use xlsx2vcard::{CardExporter, ConverterBuilder};
///
/// # fn main() -> Result<(), xlsx2vcard::XlsxToVCardError> {
/// let converter = ConverterBuilder::new().build()?;
/// let outcomes = converter.convert(File::open("contacts.xlsx")?)?;
/// let report = CardExporter::new("vcards").export(&outcomes)?;
/// println!("{} created, {} failed", report.successful(), report.failed_count());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CardExporter {
    output_dir: PathBuf,
}

impl CardExporter {
    /// 出力ディレクトリを指定して生成する
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// エンコード結果を書き出す
    ///
    /// 出力ディレクトリは存在しなければ作成されます。
    /// 既存ファイルや同じバッチ内のファイルと名前が衝突した場合は、
    /// `_2`、`_3`…を付けた名前で作成します。
    ///
    /// # 戻り値
    ///
    /// * `Ok(ExportReport)` - 個々の書き込み失敗は`failed`に記録されます
    /// * `Err(XlsxToVCardError::Io)` - 出力ディレクトリを作成できない場合
    pub fn export(&self, outcomes: &[CardOutcome]) -> Result<ExportReport, XlsxToVCardError> {
        fs::create_dir_all(&self.output_dir)?;

        let mut report = ExportReport {
            output_dir: fs::canonicalize(&self.output_dir)
                .unwrap_or_else(|_| self.output_dir.clone()),
            ..Default::default()
        };

        for outcome in outcomes {
            match outcome {
                CardOutcome::Card { index, name, card } => {
                    let stem = file_stem_for(name, *index);
                    match self.write_card(&stem, card) {
                        Ok(path) => {
                            debug!(row = index + 1, file = %path.display(), "created vCard");
                            report.created.push(path);
                        }
                        Err(e) => {
                            warn!(row = index + 1, file = %stem, error = %e, "failed to write vCard");
                            report.failed.push(FailedWrite {
                                row: index + 1,
                                file: format!("{}.{}", stem, EXTENSION),
                                error: e.to_string(),
                            });
                        }
                    }
                }
                CardOutcome::Skipped { index } => report.skipped.push(index + 1),
            }
        }

        Ok(report)
    }

    /// 衝突しないファイル名で1件書き込む
    fn write_card(&self, stem: &str, card: &Card) -> io::Result<PathBuf> {
        for suffix in 1..=MAX_COLLISION_SUFFIX {
            let file_name = if suffix == 1 {
                format!("{}.{}", stem, EXTENSION)
            } else {
                format!("{}_{}.{}", stem, suffix, EXTENSION)
            };
            let path = self.output_dir.join(file_name);

            // create_newで既存ファイルを上書きしない
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(card.as_text().as_bytes())?;
                    file.flush()?;
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            }
        }

        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("too many files named '{}'", stem),
        ))
    }
}

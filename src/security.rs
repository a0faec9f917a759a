//! Security Module
//!
//! 入力サイズの制限と、出力ファイル名の無害化を提供するモジュール。

/// セキュリティ設定
///
/// ファイル処理時のセキュリティ制限を定義します。
#[derive(Debug, Clone)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 2GB (2_147_483_648 bytes)
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 2_147_483_648, // 2GB
        }
    }
}

/// 連絡先名から出力ファイル名の語幹を生成する
///
/// 空白文字、`/`、`\`、制御文字を`_`に置き換え、出力ディレクトリの外を
/// 指すパスにならないようにします。
///
/// # 引数
///
/// * `name` - 解決済みの表示名
///
/// # 戻り値
///
/// 無害化された語幹（`name`が空の場合は空文字列）
pub(crate) fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_whitespace() || c.is_control() || c == '/' || c == '\\' {
                '_'
            } else {
                c
            }
        })
        .collect()
}

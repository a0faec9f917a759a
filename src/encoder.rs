//! Card Encoder Module
//!
//! `ContactRecord`をvCard 3.0のテキストに変換するモジュール。
//!
//! 出力行の順序は固定です。各条件行は（出力条件, 整形関数）の組として
//! `CONDITIONAL_LINES`に並べられ、先頭から順に評価されます。
//!
//! ```text
//! BEGIN:VCARD
//! VERSION:3.0
//! FN:<name>
//! [N:<lastname>;<firstname>;;;]
//! [TEL;TYPE=VOICE:<phone>]
//! [TEL;TYPE=CELL:<mobile>]
//! [EMAIL;TYPE=INTERNET:<email>]
//! [ADR:;;<street>;<city>;<state>;<zip>;<country>]
//! [ORG:<company>]
//! [TITLE:<title>]
//! [URL:<website>]
//! END:VCARD
//! ```

use std::borrow::Cow;
use std::fmt;

use crate::api::EscapeMode;
use crate::record::{ContactRecord, Field};

const BEGIN: &str = "BEGIN:VCARD";
const VERSION: &str = "VERSION:3.0";
const END: &str = "END:VCARD";

/// 条件付きで出力される1行
struct CardLine {
    applies: fn(&ContactRecord) -> bool,
    render: fn(&ContactRecord, EscapeMode) -> String,
}

const CONDITIONAL_LINES: [CardLine; 8] = [
    CardLine {
        applies: has_name_parts,
        render: render_structured_name,
    },
    CardLine {
        applies: has_phone,
        render: render_phone,
    },
    CardLine {
        applies: has_mobile,
        render: render_mobile,
    },
    CardLine {
        applies: has_email,
        render: render_email,
    },
    CardLine {
        applies: has_address,
        render: render_address,
    },
    CardLine {
        applies: has_company,
        render: render_company,
    },
    CardLine {
        applies: has_title,
        render: render_title,
    },
    CardLine {
        applies: has_website,
        render: render_website,
    },
];

// N:は値の有無ではなくキーの有無で判定する
fn has_name_parts(record: &ContactRecord) -> bool {
    record.contains(Field::LastName) || record.contains(Field::FirstName)
}

fn render_structured_name(record: &ContactRecord, mode: EscapeMode) -> String {
    format!(
        "N:{};{};;;",
        escape(record.get_or_empty(Field::LastName), mode),
        escape(record.get_or_empty(Field::FirstName), mode)
    )
}

fn has_phone(record: &ContactRecord) -> bool {
    record.has_value(Field::Phone)
}

fn render_phone(record: &ContactRecord, mode: EscapeMode) -> String {
    format!("TEL;TYPE=VOICE:{}", escape(record.get_or_empty(Field::Phone), mode))
}

fn has_mobile(record: &ContactRecord) -> bool {
    record.has_value(Field::Mobile)
}

fn render_mobile(record: &ContactRecord, mode: EscapeMode) -> String {
    format!("TEL;TYPE=CELL:{}", escape(record.get_or_empty(Field::Mobile), mode))
}

fn has_email(record: &ContactRecord) -> bool {
    record.has_value(Field::Email)
}

fn render_email(record: &ContactRecord, mode: EscapeMode) -> String {
    format!(
        "EMAIL;TYPE=INTERNET:{}",
        escape(record.get_or_empty(Field::Email), mode)
    )
}

fn has_address(record: &ContactRecord) -> bool {
    Field::ADDRESS.iter().any(|field| record.has_value(*field))
}

fn render_address(record: &ContactRecord, mode: EscapeMode) -> String {
    let parts: Vec<Cow<'_, str>> = Field::ADDRESS
        .iter()
        .map(|field| escape(record.get_or_empty(*field), mode))
        .collect();
    format!("ADR:;;{}", parts.join(";"))
}

fn has_company(record: &ContactRecord) -> bool {
    record.has_value(Field::Company)
}

fn render_company(record: &ContactRecord, mode: EscapeMode) -> String {
    format!("ORG:{}", escape(record.get_or_empty(Field::Company), mode))
}

fn has_title(record: &ContactRecord) -> bool {
    record.has_value(Field::Title)
}

fn render_title(record: &ContactRecord, mode: EscapeMode) -> String {
    format!("TITLE:{}", escape(record.get_or_empty(Field::Title), mode))
}

fn has_website(record: &ContactRecord) -> bool {
    record.has_value(Field::Website)
}

fn render_website(record: &ContactRecord, mode: EscapeMode) -> String {
    format!("URL:{}", escape(record.get_or_empty(Field::Website), mode))
}

/// テキスト値をエスケープする
fn escape(value: &str, mode: EscapeMode) -> Cow<'_, str> {
    match mode {
        EscapeMode::Verbatim => Cow::Borrowed(value),
        EscapeMode::Rfc6350 => {
            if !value.contains(['\\', ',', ';', '\n', '\r']) {
                return Cow::Borrowed(value);
            }
            let mut out = String::with_capacity(value.len() + 8);
            let mut chars = value.chars().peekable();
            while let Some(c) = chars.next() {
                match c {
                    '\\' => out.push_str("\\\\"),
                    ',' => out.push_str("\\,"),
                    ';' => out.push_str("\\;"),
                    '\r' => {
                        if chars.peek() == Some(&'\n') {
                            chars.next();
                        }
                        out.push_str("\\n");
                    }
                    '\n' => out.push_str("\\n"),
                    _ => out.push(c),
                }
            }
            Cow::Owned(out)
        }
    }
}

/// 表示名を解決する
///
/// `name`が存在し空でなければそのまま使用し、そうでなければ
/// `firstname + " " + lastname`をtrimした値を返します（存在しない部分は空文字列）。
pub fn resolve_name(record: &ContactRecord) -> String {
    match record.get(Field::Name) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!(
            "{} {}",
            record.get_or_empty(Field::FirstName),
            record.get_or_empty(Field::LastName)
        )
        .trim()
        .to_string(),
    }
}

/// エンコード済みのvCard
///
/// 各行は改行（LF）で終端されて出力されます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    lines: Vec<String>,
}

impl Card {
    /// 出力行（改行なし）
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// 完成したvCardテキスト
    pub fn as_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// vCardエンコーダー
///
/// # 使用例
///
/// ```rust
/// use xlsx2vcard::{CardEncoder, ContactRecord, Field};
///
/// let record = ContactRecord::new()
///     .with(Field::Name, "Jane Doe")
///     .with(Field::Email, "jane@x.com")
///     .with(Field::City, "Paris");
///
/// let card = CardEncoder::default().encode(&record).unwrap();
/// assert_eq!(
///     card.as_text(),
///     "BEGIN:VCARD\nVERSION:3.0\nFN:Jane Doe\nEMAIL;TYPE=INTERNET:jane@x.com\n\
///      ADR:;;;Paris;;;\nEND:VCARD\n"
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CardEncoder {
    escape_mode: EscapeMode,
}

impl CardEncoder {
    /// エスケープ方式を指定して生成する
    pub fn new(escape_mode: EscapeMode) -> Self {
        Self { escape_mode }
    }

    /// レコードをvCardに変換する
    ///
    /// # 戻り値
    ///
    /// * `Some(Card)` - 変換に成功した場合
    /// * `None` - 表示名を解決できない場合（このレコードはスキップ対象）
    pub fn encode(&self, record: &ContactRecord) -> Option<Card> {
        let name = resolve_name(record);
        if name.is_empty() {
            return None;
        }

        let mut lines = Vec::with_capacity(CONDITIONAL_LINES.len() + 4);
        lines.push(BEGIN.to_string());
        lines.push(VERSION.to_string());
        lines.push(format!("FN:{}", escape(&name, self.escape_mode)));
        lines.extend(
            CONDITIONAL_LINES
                .iter()
                .filter(|line| (line.applies)(record))
                .map(|line| (line.render)(record, self.escape_mode)),
        );
        lines.push(END.to_string());

        Some(Card { lines })
    }
}

//! Contact Record Module
//!
//! 正規化済みの連絡先レコードと、認識するフィールド語彙を定義するモジュール。

use std::collections::BTreeMap;
use std::fmt;

/// 認識するフィールド（正規化済みヘッダー名）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    FirstName,
    LastName,
    Email,
    Phone,
    Mobile,
    Street,
    City,
    State,
    Zip,
    Country,
    Company,
    Title,
    Website,
}

impl Field {
    /// すべてのフィールド（表示順）
    pub const ALL: [Field; 14] = [
        Field::Name,
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Phone,
        Field::Mobile,
        Field::Street,
        Field::City,
        Field::State,
        Field::Zip,
        Field::Country,
        Field::Company,
        Field::Title,
        Field::Website,
    ];

    /// 住所を構成するフィールド（`ADR`の出力順）
    pub const ADDRESS: [Field; 5] = [
        Field::Street,
        Field::City,
        Field::State,
        Field::Zip,
        Field::Country,
    ];

    /// 正規化済みヘッダー名
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::FirstName => "firstname",
            Field::LastName => "lastname",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Mobile => "mobile",
            Field::Street => "street",
            Field::City => "city",
            Field::State => "state",
            Field::Zip => "zip",
            Field::Country => "country",
            Field::Company => "company",
            Field::Title => "title",
            Field::Website => "website",
        }
    }

    /// 正規化済みヘッダー名からフィールドを取得
    ///
    /// 語彙外のキーは`None`。
    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.key() == key)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// 1行分の連絡先レコード
///
/// 認識するフィールドは`Option`で保持し、キーの有無（`Some`/`None`）を区別します。
/// 語彙外の列は`extra`にそのまま保持されますが、vCardには出力されません。
///
/// `set()`は空文字列（trim後）を保存しないため、存在するキーの値は常に空ではありません。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactRecord {
    pub name: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub website: Option<String>,

    /// 語彙外の列（正規化済みヘッダー名 → 値）
    pub extra: BTreeMap<String, String>,
}

impl ContactRecord {
    /// 空のレコードを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// 正規化済みキーで値を設定する
    ///
    /// 値はtrimされ、空になった場合は何も設定しません。
    /// 同じキーが複数回設定された場合は後の値が優先されます。
    ///
    /// # 戻り値
    ///
    /// 値を設定した場合は`true`
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            return false;
        }

        match Field::from_key(key) {
            Some(field) => *self.slot_mut(field) = Some(value.to_string()),
            None => {
                self.extra.insert(key.to_string(), value.to_string());
            }
        }
        true
    }

    /// フィールドを設定する（ビルダー形式）
    pub fn with(mut self, field: Field, value: &str) -> Self {
        self.set(field.key(), value);
        self
    }

    /// フィールドの値を取得
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// フィールドの値を取得（存在しない場合は空文字列）
    pub fn get_or_empty(&self, field: Field) -> &str {
        self.get(field).unwrap_or("")
    }

    /// キーが存在するかを判定
    pub fn contains(&self, field: Field) -> bool {
        self.slot(field).is_some()
    }

    /// 値が存在し、空でないかを判定
    pub fn has_value(&self, field: Field) -> bool {
        self.get(field).is_some_and(|value| !value.is_empty())
    }

    /// 語彙外の列の値を取得
    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }

    /// 認識フィールド・語彙外の列のどちらも設定されていないかを判定
    pub fn is_empty(&self) -> bool {
        self.extra.is_empty() && Field::ALL.iter().all(|field| !self.contains(*field))
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::Name => &self.name,
            Field::FirstName => &self.firstname,
            Field::LastName => &self.lastname,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Mobile => &self.mobile,
            Field::Street => &self.street,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::Zip => &self.zip,
            Field::Country => &self.country,
            Field::Company => &self.company,
            Field::Title => &self.title,
            Field::Website => &self.website,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Name => &mut self.name,
            Field::FirstName => &mut self.firstname,
            Field::LastName => &mut self.lastname,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Mobile => &mut self.mobile,
            Field::Street => &mut self.street,
            Field::City => &mut self.city,
            Field::State => &mut self.state,
            Field::Zip => &mut self.zip,
            Field::Country => &mut self.country,
            Field::Company => &mut self.company,
            Field::Title => &mut self.title,
            Field::Website => &mut self.website,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_key_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_key(field.key()), Some(field));
        }
        assert_eq!(Field::from_key("fax"), None);
        assert_eq!(Field::from_key("Name"), None);
    }

    #[test]
    fn test_set_recognized_and_extra() {
        let mut record = ContactRecord::new();
        assert!(record.set("email", " jane@x.com "));
        assert!(record.set("fax", "123"));

        assert_eq!(record.email.as_deref(), Some("jane@x.com"));
        assert_eq!(record.extra("fax"), Some("123"));
        assert!(!record.contains(Field::Phone));
    }

    #[test]
    fn test_set_ignores_blank_values_and_keys() {
        let mut record = ContactRecord::new();
        assert!(!record.set("firstname", "   "));
        assert!(!record.set("", "value"));

        assert!(!record.contains(Field::FirstName));
        assert!(record.is_empty());
    }

    #[test]
    fn test_set_later_value_wins() {
        let mut record = ContactRecord::new();
        record.set("city", "Paris");
        record.set("city", "Lyon");
        assert_eq!(record.get(Field::City), Some("Lyon"));
    }

    #[test]
    fn test_is_empty_with_only_extra() {
        let mut record = ContactRecord::new();
        record.set("notes", "vip");
        assert!(!record.is_empty());
    }

    #[test]
    fn test_builder_with() {
        let record = ContactRecord::new()
            .with(Field::FirstName, "Jane")
            .with(Field::LastName, "Doe");
        assert_eq!(record.get_or_empty(Field::FirstName), "Jane");
        assert_eq!(record.get_or_empty(Field::LastName), "Doe");
        assert_eq!(record.get_or_empty(Field::Name), "");
    }
}

//! フォームと参照データの型定義
//!
//! CLIと他のフロントエンドで共有される型:
//! - InitData: `/api/init-data` のレスポンス
//! - FormState: 入力中のフォーム
//! - SubmitPayload / SubmitResponse: `/api/submit` の送受信
//! - StatusMessage: 一時表示メッセージ

use crate::parser::{coerce_unit_price, coerce_work_output};
use crate::tables::{ProductCodeTable, UnitPriceTable};
use serde::{Deserialize, Deserializer, Serialize};

/// 作業者
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    /// サーバ側は数値IDで返すことがあるため文字列に正規化する
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl Worker {
    /// 選択肢の表示ラベル
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            self.id.clone()
        } else {
            format!("{}: {}", self.id, self.name)
        }
    }
}

/// 品名候補
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "workname", default)]
    pub work_name: String,
    #[serde(rename = "bookname", default)]
    pub book_name: String,
}

impl Candidate {
    pub fn new(work_name: impl Into<String>, book_name: impl Into<String>) -> Self {
        Self {
            work_name: work_name.into(),
            book_name: book_name.into(),
        }
    }
}

/// `/api/init-data` のレスポンス
///
/// キー欠落・`null` はどちらも空として扱う。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InitData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub personids: Vec<Worker>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub workprocess_list: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unitprice_dict: UnitPriceTable,
    #[serde(default, deserialize_with = "null_as_default")]
    pub workcord_dict: ProductCodeTable,
}

/// 起動時に一度だけ読み込む参照データ
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub workers: Vec<Worker>,
    pub processes: Vec<String>,
    pub unit_prices: UnitPriceTable,
    pub product_codes: ProductCodeTable,
}

impl From<InitData> for ReferenceData {
    fn from(data: InitData) -> Self {
        Self {
            workers: data.personids,
            processes: data.workprocess_list,
            unit_prices: data.unitprice_dict,
            product_codes: data.workcord_dict,
        }
    }
}

impl ReferenceData {
    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
            && self.processes.is_empty()
            && self.unit_prices.is_empty()
            && self.product_codes.is_empty()
    }
}

/// 入力中のフォーム
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub person_id: String,
    pub task_code: String,
    pub work_name: String,
    pub book_name: String,
    pub process: String,
    pub unit_price: f64,
    /// 入力されたままの文字列（送信時に整数化）
    pub output_quantity: String,
    /// YYYY-MM-DD
    pub work_date: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            person_id: String::new(),
            task_code: String::new(),
            work_name: String::new(),
            book_name: String::new(),
            process: String::new(),
            unit_price: 0.0,
            output_quantity: "0".to_string(),
            work_date: String::new(),
        }
    }
}

impl FormState {
    /// 送信用ペイロードを組み立てる
    pub fn to_payload(&self) -> SubmitPayload {
        SubmitPayload {
            personid: self.person_id.clone(),
            workcd: self.task_code.clone(),
            workname: self.work_name.clone(),
            bookname: self.book_name.clone(),
            workprocess: self.process.clone(),
            unitprice: coerce_unit_price(self.unit_price),
            workoutput: coerce_work_output(&self.output_quantity),
            workday: self.work_date.clone(),
        }
    }
}

/// `/api/submit` のリクエストボディ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitPayload {
    pub personid: String,
    pub workcd: String,
    pub workname: String,
    pub bookname: String,
    pub workprocess: String,
    pub unitprice: f64,
    pub workoutput: i64,
    pub workday: String,
}

/// `/api/submit` のレスポンス
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// メッセージ種別
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Error,
    #[default]
    None,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
            MessageKind::None => "",
        }
    }
}

/// 一時表示メッセージ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: MessageKind,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.kind == MessageKind::None
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Int(i64),
    Float(f64),
    Text(String),
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Int(n) => n.to_string(),
        IdRepr::Float(f) => f.to_string(),
        IdRepr::Text(s) => s,
    })
}

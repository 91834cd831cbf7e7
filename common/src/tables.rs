//! 参照テーブル
//!
//! 単価表（行程名 → 単価）と品番コード表（コード → 品名候補）。
//! どちらも起動時に全件取得し、検索はクライアント側で行う。

use crate::parser::parse_float_prefix;
use crate::types::Candidate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};

/// 前方一致検索を行う最小文字数
pub const PREFIX_SEARCH_MIN_LEN: usize = 3;

/// 行程名 → 単価
///
/// シート由来の値は `"500"` のような文字列で届くことがあるため、
/// 数値・文字列のどちらも受け付ける。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UnitPriceTable(HashMap<String, f64>);

#[derive(Deserialize)]
#[serde(untagged)]
enum PriceRepr {
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for UnitPriceTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = HashMap::<String, Option<PriceRepr>>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .map(|(process, price)| {
                let price = match price {
                    Some(PriceRepr::Number(n)) => n,
                    Some(PriceRepr::Text(t)) => parse_float_prefix(&t).unwrap_or(0.0),
                    None => 0.0,
                };
                (process, price)
            })
            .collect())
    }
}

impl UnitPriceTable {
    /// 行程の単価。空・未登録は 0
    pub fn price_for(&self, process: &str) -> f64 {
        if process.is_empty() {
            return 0.0;
        }
        self.0.get(process).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for UnitPriceTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// コード付きの品名候補（前方一致検索の結果）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodedCandidate {
    pub code: String,
    #[serde(flatten)]
    pub candidate: Candidate,
}

/// 品番コード → 品名候補
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCodeTable(BTreeMap<String, Vec<Candidate>>);

impl ProductCodeTable {
    /// 完全一致の候補（登録順）。未登録は空
    pub fn get(&self, code: &str) -> &[Candidate] {
        self.0.get(code).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 完全一致を先頭に、続けて前方一致の候補を返す
    ///
    /// 前方一致は `PREFIX_SEARCH_MIN_LEN` 文字以上のときだけ行う。
    pub fn search(&self, code: &str) -> Vec<CodedCandidate> {
        let code = code.trim();
        if code.is_empty() {
            return Vec::new();
        }

        let tag = |key: &str, items: &[Candidate]| {
            items
                .iter()
                .map(|c| CodedCandidate {
                    code: key.to_string(),
                    candidate: c.clone(),
                })
                .collect::<Vec<_>>()
        };

        let mut results = tag(code, self.get(code));

        if code.chars().count() >= PREFIX_SEARCH_MIN_LEN {
            for (key, items) in self.0.range(code.to_string()..) {
                if !key.starts_with(code) {
                    break;
                }
                if key != code {
                    results.extend(tag(key, items));
                }
            }
        }

        results
    }

    /// 候補の総件数
    pub fn candidate_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Vec<Candidate>)> for ProductCodeTable {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Candidate>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

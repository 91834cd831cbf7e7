//! サーバAPI
//!
//! - `GET /api/init-data`: 参照データ一括取得
//! - `POST /api/submit`: 作業実績の送信
//! - `/records`: 一覧ページ（遷移先のみ）

mod http;

pub use http::HttpFormApi;

use crate::error::Result;
use async_trait::async_trait;
use piecework_common::{InitData, SubmitPayload};

pub const INIT_DATA_PATH: &str = "/api/init-data";
pub const SUBMIT_PATH: &str = "/api/submit";
pub const RECORDS_PATH: &str = "/records";

/// 初期データ取得失敗時の文言
pub const INIT_DATA_FAILED: &str = "初期データ取得に失敗しました";
/// サーバが理由を返さなかった送信失敗の文言
pub const SUBMIT_FAILED: &str = "送信に失敗しました";

#[async_trait]
pub trait FormApi: Send + Sync {
    /// 参照データを一括取得
    async fn fetch_init_data(&self) -> Result<InitData>;

    /// 作業実績を送信し、サーバのメッセージを返す
    ///
    /// 失敗ステータスは `FormError::Server` になる。
    async fn submit(&self, payload: &SubmitPayload) -> Result<String>;

    /// 一覧ページのURL
    fn records_url(&self) -> String;
}

//! reqwestによるAPIクライアント

use super::{FormApi, INIT_DATA_FAILED, INIT_DATA_PATH, RECORDS_PATH, SUBMIT_FAILED, SUBMIT_PATH};
use crate::config::Config;
use crate::error::{FormError, Result};
use async_trait::async_trait;
use piecework_common::{parse_init_data, parse_submit_response, InitData, SubmitPayload};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct HttpFormApi {
    client: Client,
    base_url: String,
}

impl HttpFormApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.server_url(), Duration::from_secs(config.timeout_seconds))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl FormApi for HttpFormApi {
    async fn fetch_init_data(&self) -> Result<InitData> {
        let url = self.url(INIT_DATA_PATH);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("init-data 失敗: {}", status);
            return Err(FormError::Server(INIT_DATA_FAILED.into()));
        }

        let body = response.text().await?;
        Ok(parse_init_data(&body)?)
    }

    async fn submit(&self, payload: &SubmitPayload) -> Result<String> {
        let url = self.url(SUBMIT_PATH);
        debug!("POST {} personid={} workday={}", url, payload.personid, payload.workday);

        let response = self.client.post(&url).json(payload).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // ステータスに関わらず本文をパースする
        let parsed = parse_submit_response(&body);

        if !status.is_success() {
            warn!("submit 失敗: {}", status);
            let reason = parsed
                .ok()
                .and_then(|r| r.error)
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| SUBMIT_FAILED.to_string());
            return Err(FormError::Server(reason));
        }

        Ok(parsed?.message.unwrap_or_default())
    }

    fn records_url(&self) -> String {
        self.url(RECORDS_PATH)
    }
}

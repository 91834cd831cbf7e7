use crate::error::{FormError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 接続先を上書きする環境変数
pub const SERVER_URL_ENV: &str = "PIECEWORK_SERVER_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    pub timeout_seconds: u64,
    /// 前回入力（PersonID・作業日）の保存先。未指定なら設定ディレクトリ
    pub store_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            timeout_seconds: 30,
            store_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| FormError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("piecework"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// 接続先URL（環境変数を優先）
    pub fn server_url(&self) -> String {
        match std::env::var(SERVER_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => self.server_url.clone(),
        }
    }

    pub fn set_server_url(&mut self, url: String) -> Result<()> {
        let url = url.trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(FormError::Config(format!(
                "URLは http:// または https:// で始めてください: {}",
                url
            )));
        }
        self.server_url = url;
        self.save()
    }

    pub fn field_store_path(&self) -> Result<PathBuf> {
        match &self.store_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("fields.json")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.server_url.starts_with("http://"));
        assert!(config.store_path.is_none());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"server_url": "https://work.example.com"}"#).unwrap();
        assert_eq!(config.server_url, "https://work.example.com");
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_explicit_store_path() {
        let config = Config {
            store_path: Some(PathBuf::from("/tmp/fields.json")),
            ..Default::default()
        };
        assert_eq!(config.field_store_path().unwrap(), PathBuf::from("/tmp/fields.json"));
    }

    #[test]
    fn test_reject_invalid_server_url() {
        let mut config = Config::default();
        let err = config.set_server_url("ftp://example.com".into()).unwrap_err();
        assert!(matches!(err, FormError::Config(_)));
        assert_eq!(config.server_url, Config::default().server_url);
    }
}

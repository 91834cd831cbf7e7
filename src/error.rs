use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("設定エラー: {0}")]
    Config(String),

    /// 入力チェックエラー（送信前に検出）
    #[error("{0}")]
    Validation(String),

    /// サーバが失敗を返した（本文の `error` または既定文言）
    #[error("{0}")]
    Server(String),

    #[error("通信エラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] piecework_common::Error),

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),
}

pub type Result<T> = std::result::Result<T, FormError>;

//! 作業実績（出来高）入力フォーム・クライアント
//!
//! 参照データ（作業者・行程・単価・品番）をサーバから取得し、
//! 作業実績フォームの入力・送信を行う。

pub mod api;
pub mod cli;
pub mod config;
pub mod controller;
pub mod entry;
pub mod error;
pub mod logging;
pub mod message;
pub mod store;

pub use api::{FormApi, HttpFormApi};
pub use controller::FormController;
pub use error::{FormError, Result};
pub use message::MessageBoard;
pub use store::{FieldStore, JsonFileStore, MemoryStore};

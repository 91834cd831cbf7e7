//! 一時表示メッセージ
//!
//! 表示から一定時間（既定 3000ms）後にメッセージを消す。
//! 新しいメッセージは保留中の消去タイマーを取り消してから自分のタイマーを
//! 登録するため、古いタイマーが新しいメッセージを消すことはない。

use piecework_common::{MessageKind, StatusMessage};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// メッセージを消すまでの時間
pub const MESSAGE_CLEAR_DELAY: Duration = Duration::from_millis(3000);

#[derive(Debug)]
pub struct MessageBoard {
    tx: Arc<watch::Sender<StatusMessage>>,
    pending_clear: Option<JoinHandle<()>>,
    clear_delay: Duration,
}

impl Default for MessageBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageBoard {
    pub fn new() -> Self {
        Self::with_delay(MESSAGE_CLEAR_DELAY)
    }

    pub fn with_delay(clear_delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(StatusMessage::default());
        Self {
            tx: Arc::new(tx),
            pending_clear: None,
            clear_delay,
        }
    }

    /// メッセージを表示し、消去タイマーを登録
    ///
    /// tokioランタイム外で呼ばれた場合はタイマーを登録せず、
    /// 次のメッセージか `clear` まで残る。
    pub fn show(&mut self, text: impl Into<String>, kind: MessageKind) {
        self.cancel_pending();
        self.tx.send_replace(StatusMessage::new(text, kind));

        match Handle::try_current() {
            Ok(handle) => {
                let tx = Arc::clone(&self.tx);
                let delay = self.clear_delay;
                self.pending_clear = Some(handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    tx.send_replace(StatusMessage::default());
                }));
            }
            Err(_) => debug!("ランタイム外のため消去タイマーなし"),
        }
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.show(text, MessageKind::Success);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.show(text, MessageKind::Error);
    }

    /// 即時に消去
    pub fn clear(&mut self) {
        self.cancel_pending();
        self.tx.send_replace(StatusMessage::default());
    }

    /// 現在のメッセージ
    pub fn current(&self) -> StatusMessage {
        self.tx.borrow().clone()
    }

    /// 変更を購読
    pub fn subscribe(&self) -> watch::Receiver<StatusMessage> {
        self.tx.subscribe()
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending_clear.take() {
            handle.abort();
        }
    }
}

impl Drop for MessageBoard {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_without_runtime_keeps_message() {
        let mut board = MessageBoard::new();
        board.error("品名コードを入力してください");

        let current = board.current();
        assert_eq!(current.kind, MessageKind::Error);
        assert_eq!(current.text, "品名コードを入力してください");

        board.clear();
        assert!(board.current().is_empty());
    }
}

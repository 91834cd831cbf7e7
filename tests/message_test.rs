//! 一時メッセージのテスト
//!
//! 消去タイマーの動作を仮想時間で検証

use piecework_common::MessageKind;
use piecework_form::message::{MessageBoard, MESSAGE_CLEAR_DELAY};
use std::time::Duration;

async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    tokio::task::yield_now().await;
}

/// 3秒後に消える
#[tokio::test(start_paused = true)]
async fn test_message_clears_after_delay() {
    let mut board = MessageBoard::new();
    board.success("候補が 2 件見つかりました");

    sleep_ms(2999).await;
    assert_eq!(board.current().kind, MessageKind::Success);

    sleep_ms(2).await;
    assert!(board.current().is_empty());
}

#[test]
fn test_default_delay_is_three_seconds() {
    assert_eq!(MESSAGE_CLEAR_DELAY, Duration::from_millis(3000));
}

/// 後のメッセージは前のタイマーで消えない
#[tokio::test(start_paused = true)]
async fn test_newer_message_survives_older_timer() {
    let mut board = MessageBoard::new();
    board.error("品名コードを入力してください");

    sleep_ms(2000).await;
    board.success("✅ 送信成功: ok");

    // 最初のタイマーの期限（3000ms）を過ぎても残る
    sleep_ms(1500).await;
    let current = board.current();
    assert_eq!(current.kind, MessageKind::Success);
    assert_eq!(current.text, "✅ 送信成功: ok");

    // 自分のタイマー（5000ms）で消える
    sleep_ms(1600).await;
    assert!(board.current().is_empty());
}

/// 購読者に変更が届く
#[tokio::test(start_paused = true)]
async fn test_subscribe_receives_clear() {
    let mut board = MessageBoard::with_delay(Duration::from_millis(100));
    let mut rx = board.subscribe();

    board.error("送信に失敗しました");
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().kind, MessageKind::Error);

    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().is_empty());
}

/// 即時消去でタイマーも止まる
#[tokio::test(start_paused = true)]
async fn test_clear_cancels_timer() {
    let mut board = MessageBoard::new();
    board.error("作業日を選んでください");
    board.clear();
    assert!(board.current().is_empty());

    board.success("再表示");
    sleep_ms(1000).await;
    assert_eq!(board.current().text, "再表示");
}

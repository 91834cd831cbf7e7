//! 前回入力ストアのテスト
//!
//! JSONファイルへの保存・読み込みを検証

use piecework_form::store::{FieldStore, JsonFileStore, PERSON_ID_KEY, WORK_DAY_KEY};
use tempfile::tempdir;

/// ファイルが無ければ空
#[test]
fn test_open_missing_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = JsonFileStore::open(dir.path().join("fields.json"));

    assert!(store.get(PERSON_ID_KEY).is_none());
    assert!(store.get(WORK_DAY_KEY).is_none());
}

/// 保存して開き直すと同じ値
#[test]
fn test_save_and_reopen() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("fields.json");

    let mut store = JsonFileStore::open(&path);
    store.set(PERSON_ID_KEY, "101").expect("保存失敗");
    store.set(WORK_DAY_KEY, "2026-10-17").expect("保存失敗");

    let reopened = JsonFileStore::open(&path);
    assert_eq!(reopened.get(PERSON_ID_KEY).as_deref(), Some("101"));
    assert_eq!(reopened.get(WORK_DAY_KEY).as_deref(), Some("2026-10-17"));
}

/// 上書き
#[test]
fn test_overwrite() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("fields.json");

    let mut store = JsonFileStore::open(&path);
    store.set(PERSON_ID_KEY, "101").unwrap();
    store.set(PERSON_ID_KEY, "205").unwrap();

    let reopened = JsonFileStore::open(&path);
    assert_eq!(reopened.get(PERSON_ID_KEY).as_deref(), Some("205"));
}

/// 親ディレクトリが無くても作成される
#[test]
fn test_creates_parent_dir() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("piecework").join("fields.json");

    let mut store = JsonFileStore::open(&path);
    store.set(WORK_DAY_KEY, "2026-10-01").expect("保存失敗");

    assert!(path.exists());
    assert_eq!(store.path(), path.as_path());
}

/// 壊れたファイルは空として扱う
#[test]
fn test_corrupted_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("fields.json");
    std::fs::write(&path, "{ invalid json }").unwrap();

    let mut store = JsonFileStore::open(&path);
    assert!(store.get(PERSON_ID_KEY).is_none());

    // 書き込めば正しいファイルになる
    store.set(PERSON_ID_KEY, "101").unwrap();
    let reopened = JsonFileStore::open(&path);
    assert_eq!(reopened.get(PERSON_ID_KEY).as_deref(), Some("101"));
}

//! 前回入力の保存モジュール
//!
//! PersonID と作業日をキー・値形式で保存し、次回起動時に復元する。
//! キーは名前空間なしの固定文字列。

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const PERSON_ID_KEY: &str = "personid";
pub const WORK_DAY_KEY: &str = "workday";

/// キー・値ストア
pub trait FieldStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// JSONファイルに保存するストア
///
/// 書き込みのたびにファイル全体を書き直す。
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// ストアを開く。ファイルが無い・壊れている場合は空
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::read_entries(&path);
        Self { path, entries }
    }

    fn read_entries(path: &Path) -> BTreeMap<String, String> {
        if !path.exists() {
            return BTreeMap::new();
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("保存ファイルを開けません: {} ({})", path.display(), e);
                return BTreeMap::new();
            }
        };

        match serde_json::from_reader::<_, StoreFile>(BufReader::new(file)) {
            Ok(store) => store.entries,
            Err(e) => {
                warn!("保存ファイルが壊れています、空として扱います: {} ({})", path.display(), e);
                BTreeMap::new()
            }
        }
    }

    fn write_entries(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);
        let store = StoreFile {
            entries: self.entries.clone(),
        };
        serde_json::to_writer_pretty(writer, &store)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FieldStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.write_entries()?;
        debug!("保存: {} -> {}", key, self.path.display());
        Ok(())
    }
}

/// メモリ上のストア（テスト・一時利用）
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FieldStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.get(PERSON_ID_KEY).is_none());

        store.set(PERSON_ID_KEY, "101").unwrap();
        store.set(PERSON_ID_KEY, "102").unwrap();
        assert_eq!(store.get(PERSON_ID_KEY).as_deref(), Some("102"));
        assert_eq!(store.len(), 1);
    }
}

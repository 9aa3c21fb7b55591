use crate::domain::value_objects::OperationKey;
use std::collections::HashMap;
use tracing::warn;

/// 実行中ミューテーションの取り消し用データを保持する台帳。
/// エントリはリモート呼び出し 1 回分の間だけ存在する。
#[derive(Debug, Clone)]
pub struct PendingLedger<E> {
    entries: HashMap<OperationKey, E>,
}

impl<E> PendingLedger<E> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// エントリを登録。同じキーが実行中なら拒否して `false` を返す
    /// （既存エントリには触れない）。
    pub fn begin(&mut self, key: OperationKey, entry: E) -> bool {
        if self.entries.contains_key(&key) {
            warn!(key = %key, "duplicate mutation refused while one is in flight");
            return false;
        }
        self.entries.insert(key, entry);
        true
    }

    /// 成功時に破棄。エントリがなくても何もしない。
    pub fn commit(&mut self, key: &OperationKey) {
        self.entries.remove(key);
    }

    /// 失敗時に取り出して破棄
    pub fn rollback(&mut self, key: &OperationKey) -> Option<E> {
        self.entries.remove(key)
    }

    pub fn get(&self, key: &OperationKey) -> Option<&E> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &OperationKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &OperationKey> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E> Default for PendingLedger<E> {
    fn default() -> Self {
        Self::new()
    }
}

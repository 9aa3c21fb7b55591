use super::{PendingLedger, RecordSnapshot, RecordStore};
use crate::application::coordinator::MutationKind;
use crate::domain::aggregates::Aggregate;
use crate::domain::entities::{ListPage, Pagination, Record};
use crate::domain::value_objects::{OperationKey, RecordId};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// 実行中ミューテーション 1 件分の取り消しデータ
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry<R, D> {
    pub kind: MutationKind,
    pub record_id: RecordId,
    /// 変更前のレコード。`None` は純粋な新規作成。
    pub snapshot: Option<RecordSnapshot<R>>,
    /// 楽観的適用時にサマリーへ加えた差分
    pub delta: D,
    /// 適用時点のコレクション世代
    pub generation: u64,
    pub started_at: DateTime<Utc>,
}

/// 1 コレクション分の状態（レコード・保留台帳・集計サマリー）
pub struct CollectionState<R: Record, A: Aggregate<R>> {
    pub(crate) records: RecordStore<R>,
    pub(crate) ledger: PendingLedger<LedgerEntry<R, A::Delta>>,
    pub(crate) summary: A,
    pub(crate) generation: u64,
}

impl<R: Record, A: Aggregate<R>> CollectionState<R, A> {
    pub fn new() -> Self {
        Self {
            records: RecordStore::new(),
            ledger: PendingLedger::new(),
            summary: A::default(),
            generation: 0,
        }
    }

    /// 一覧取得結果で差し替え、サマリーを全件再計算する。
    /// 世代が進むため、差し替え前に発行された保留中ミューテーションの
    /// 確定・取り消しは新しいコレクションに影響しない。
    pub fn replace_all(&mut self, page: ListPage<R>, filters: BTreeMap<String, String>) {
        self.records
            .replace_all(page.items, page.pagination, filters);
        self.summary = A::recompute(self.records.records());
        self.generation += 1;
    }

    pub fn records(&self) -> &RecordStore<R> {
        &self.records
    }

    pub fn find(&self, id: &RecordId) -> Option<&R> {
        self.records.find(id)
    }

    pub fn summary(&self) -> &A {
        &self.summary
    }

    pub fn pagination(&self) -> &Pagination {
        self.records.pagination()
    }

    pub fn ledger(&self) -> &PendingLedger<LedgerEntry<R, A::Delta>> {
        &self.ledger
    }

    pub fn is_pending(&self, key: &OperationKey) -> bool {
        self.ledger.contains(key)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl<R: Record, A: Aggregate<R>> Default for CollectionState<R, A> {
    fn default() -> Self {
        Self::new()
    }
}

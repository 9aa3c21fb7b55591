use super::failure::MutationFailure;
use super::mutation::Mutation;
use super::phases::{Applied, Reverted};
use crate::application::store::CollectionState;
use crate::domain::aggregates::Aggregate;
use crate::domain::entities::{ListPage, Pagination, Record};
use crate::domain::value_objects::{OperationKey, RecordId};
use crate::shared::{AppError, MutationMetrics, MutationMetricsSnapshot};
use chrono::Utc;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

/// 1 コレクション分の状態コンテナ。
///
/// 各フェーズは書き込みロックを取って同期的に完了し、リモート呼び出しの
/// await をまたいでロックを保持しない。
pub struct OptimisticCollection<R: Record, A: Aggregate<R>> {
    name: &'static str,
    state: Arc<RwLock<CollectionState<R, A>>>,
    metrics: Arc<MutationMetrics>,
}

impl<R: Record, A: Aggregate<R>> Clone for OptimisticCollection<R, A> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            state: Arc::clone(&self.state),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

impl<R: Record, A: Aggregate<R>> OptimisticCollection<R, A> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: Arc::new(RwLock::new(CollectionState::new())),
            metrics: Arc::new(MutationMetrics::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn read(&self) -> RwLockReadGuard<'_, CollectionState<R, A>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CollectionState<R, A>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn replace_all(&self, page: ListPage<R>, filters: BTreeMap<String, String>) {
        let count = page.items.len();
        let mut state = self.write();
        let dropped = state.ledger().len();
        state.replace_all(page, filters);
        info!(
            collection = self.name,
            count,
            stale_entries = dropped,
            "collection replaced"
        );
    }

    pub fn records(&self) -> Vec<R> {
        self.read().records().records().to_vec()
    }

    pub fn find(&self, id: &RecordId) -> Option<R> {
        self.read().find(id).cloned()
    }

    pub fn summary(&self) -> A {
        self.read().summary().clone()
    }

    pub fn pagination(&self) -> Pagination {
        self.read().pagination().clone()
    }

    pub fn filters(&self) -> BTreeMap<String, String> {
        self.read().records().filters().clone()
    }

    pub fn is_pending(&self, key: &OperationKey) -> bool {
        self.read().is_pending(key)
    }

    pub fn pending_count(&self) -> usize {
        self.read().ledger().len()
    }

    pub fn metrics(&self) -> MutationMetricsSnapshot {
        self.metrics.snapshot()
    }

    /// 読み取り専用で状態全体を参照する
    pub fn inspect<T>(&self, f: impl FnOnce(&CollectionState<R, A>) -> T) -> T {
        let state = self.read();
        f(&state)
    }

    pub fn apply_optimistic<M>(&self, mutation: &M) -> Result<Applied<R>, AppError>
    where
        M: Mutation<R> + ?Sized,
    {
        let result = self.write().apply_optimistic(mutation, Utc::now());
        match &result {
            Ok(_) => self.metrics.record_applied(),
            Err(AppError::Conflict(message)) => {
                self.metrics.record_conflict();
                warn!(
                    collection = self.name,
                    key = %mutation.key(),
                    kind = %mutation.kind(),
                    "mutation refused: {message}"
                );
            }
            Err(err) => {
                debug!(
                    collection = self.name,
                    key = %mutation.key(),
                    kind = %mutation.kind(),
                    error = %err,
                    "mutation rejected before dispatch"
                );
            }
        }
        result
    }

    pub fn reconcile<M>(
        &self,
        mutation: &M,
        key: &OperationKey,
        confirmed: M::Confirmed,
    ) -> Option<R>
    where
        M: Mutation<R> + ?Sized,
    {
        // 台帳エントリを消費した時点で確定扱い（差し替え済みで反映しない場合も含む）
        let mut state = self.write();
        if !state.is_pending(key) {
            return None;
        }
        let reconciled = state.reconcile(mutation, key, confirmed);
        drop(state);

        self.metrics.record_reconciled();
        info!(
            collection = self.name,
            key = %key,
            kind = %mutation.kind(),
            dropped = reconciled.is_none(),
            "mutation reconciled"
        );
        reconciled
    }

    pub fn revert(&self, key: &OperationKey) -> Option<Reverted<R>> {
        let mut state = self.write();
        let Some(kind) = state.ledger().get(key).map(|entry| entry.kind) else {
            return None;
        };
        let reverted = state.revert(key);
        drop(state);

        self.metrics.record_reverted();
        warn!(
            collection = self.name,
            key = %key,
            kind = %kind,
            restored = reverted.is_some(),
            "mutation reverted"
        );
        reverted
    }

    /// 楽観的適用 → `remote` の完了待ち → 確定または取り消し。
    ///
    /// 確定後のレコード（削除なら `None`）を返す。`remote` の完了前に
    /// このフューチャーが破棄された場合も取り消される。
    pub async fn execute<M, F>(
        &self,
        mutation: M,
        remote: F,
    ) -> Result<Option<R>, MutationFailure<R>>
    where
        M: Mutation<R>,
        F: Future<Output = Result<M::Confirmed, AppError>>,
    {
        let applied = match self.apply_optimistic(&mutation) {
            Ok(applied) => applied,
            Err(error) => {
                return Err(MutationFailure {
                    key: mutation.key(),
                    kind: mutation.kind(),
                    snapshot: self.find(mutation.target()),
                    error,
                });
            }
        };

        let mut guard = RevertOnDrop {
            collection: self,
            key: Some(applied.key.clone()),
        };
        let outcome = remote.await;
        guard.disarm();

        match outcome {
            Ok(confirmed) => Ok(self.reconcile(&mutation, &applied.key, confirmed)),
            Err(error) => {
                self.revert(&applied.key);
                Err(MutationFailure {
                    key: applied.key,
                    kind: applied.kind,
                    snapshot: applied.snapshot,
                    error,
                })
            }
        }
    }
}

/// `execute` が途中で破棄されたときに保留中の変更を取り消す
struct RevertOnDrop<'a, R: Record, A: Aggregate<R>> {
    collection: &'a OptimisticCollection<R, A>,
    key: Option<OperationKey>,
}

impl<R: Record, A: Aggregate<R>> RevertOnDrop<'_, R, A> {
    fn disarm(&mut self) {
        self.key = None;
    }
}

impl<R: Record, A: Aggregate<R>> Drop for RevertOnDrop<'_, R, A> {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            warn!(
                collection = self.collection.name,
                key = %key,
                "mutation abandoned before the remote call completed"
            );
            self.collection.revert(&key);
        }
    }
}

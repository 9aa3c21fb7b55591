use super::mutation::{Mutation, MutationKind, OptimisticChange};
use crate::application::store::{CollectionState, LedgerEntry};
use crate::domain::aggregates::{Aggregate, SummaryDelta};
use crate::domain::entities::Record;
use crate::domain::value_objects::OperationKey;
use crate::shared::AppError;
use chrono::{DateTime, Utc};
use tracing::debug;

/// 楽観的適用の結果
#[derive(Debug, Clone, PartialEq)]
pub struct Applied<R> {
    pub key: OperationKey,
    pub kind: MutationKind,
    /// 適用後のレコード（削除なら `None`）
    pub optimistic: Option<R>,
    /// 適用前のレコード（新規作成なら `None`）
    pub snapshot: Option<R>,
}

/// 取り消しの結果
#[derive(Debug, Clone, PartialEq)]
pub struct Reverted<R> {
    pub key: OperationKey,
    pub kind: MutationKind,
    /// 復元したレコード。新規作成の取り消しなら `None`。
    pub restored: Option<R>,
}

impl<R: Record, A: Aggregate<R>> CollectionState<R, A> {
    /// IDLE → OPTIMISTIC_APPLIED。
    ///
    /// 検証エラー・競合時は状態を一切変更しない。
    pub fn apply_optimistic<M>(
        &mut self,
        mutation: &M,
        now: DateTime<Utc>,
    ) -> Result<Applied<R>, AppError>
    where
        M: Mutation<R> + ?Sized,
    {
        let key = mutation.key();
        let kind = mutation.kind();
        let target = mutation.target();

        if let Some(in_flight) = self.ledger.get(&key) {
            return Err(AppError::Conflict(format!(
                "{} is already in flight for {}",
                in_flight.kind, key
            )));
        }

        let current = self.records.find(target);
        let mut change = mutation.prepare(current, now)?;

        let consistent = match (&change, current) {
            (OptimisticChange::Update(record), Some(_)) => record.record_id() == target,
            (OptimisticChange::Insert(record), None) => record.record_id() == target,
            (OptimisticChange::Remove, Some(_)) => true,
            _ => false,
        };
        if !consistent {
            return Err(AppError::Internal(format!(
                "{kind} produced an inconsistent change for {target}"
            )));
        }

        if let OptimisticChange::Update(record) | OptimisticChange::Insert(record) = &mut change {
            record.touch(now);
        }

        let delta = A::transition(current, change.record());
        let snapshot = self.records.snapshot(target);
        let entry = LedgerEntry {
            kind,
            record_id: target.clone(),
            snapshot: snapshot.clone(),
            delta: delta.clone(),
            generation: self.generation,
            started_at: now,
        };
        if !self.ledger.begin(key.clone(), entry) {
            return Err(AppError::Conflict(format!("{kind} is already in flight for {key}")));
        }

        let optimistic = change.record().cloned();
        match change {
            OptimisticChange::Update(record) => {
                self.records.replace_existing(target, record);
            }
            OptimisticChange::Insert(record) => self.records.insert_at(0, record),
            OptimisticChange::Remove => {
                self.records.remove(target);
            }
        }
        self.summary = self.summary.apply_delta(&delta);

        debug!(key = %key, kind = %kind, "optimistic change applied");
        Ok(Applied {
            key,
            kind,
            optimistic,
            snapshot: snapshot.map(|snapshot| snapshot.record),
        })
    }

    /// OPTIMISTIC_APPLIED → RECONCILED。
    ///
    /// 確定値でレコードを置き換えて台帳エントリを破棄する。サマリーには
    /// 確定値と楽観値の食い違い分だけを加える。
    /// レコードが既に無い、またはコレクションが差し替え済みなら何もしない。
    pub fn reconcile<M>(
        &mut self,
        mutation: &M,
        key: &OperationKey,
        confirmed: M::Confirmed,
    ) -> Option<R>
    where
        M: Mutation<R> + ?Sized,
    {
        let Some((record_id, generation)) = self
            .ledger
            .get(key)
            .map(|entry| (entry.record_id.clone(), entry.generation))
        else {
            debug!(key = %key, "no pending entry to reconcile");
            return None;
        };
        self.ledger.commit(key);

        if generation != self.generation {
            debug!(key = %key, "collection replaced since dispatch; confirmed payload dropped");
            return None;
        }
        let Some(current) = self.records.find(&record_id) else {
            debug!(key = %key, "record no longer present; confirmed payload dropped");
            return None;
        };

        match mutation.reconcile(current, confirmed) {
            Some(next) => {
                // 確定値が楽観値と一致すれば差分はゼロ
                let correction = A::transition(Some(current), Some(&next));
                self.records.replace_existing(&record_id, next.clone());
                if !correction.is_zero() {
                    debug!(key = %key, "confirmed payload differs from optimistic guess");
                    self.summary = self.summary.apply_delta(&correction);
                }
                Some(next)
            }
            None => Some(current.clone()),
        }
    }

    /// OPTIMISTIC_APPLIED → REVERTED。
    ///
    /// スナップショットを元の位置へ戻し（新規作成なら削除し）、適用した差分の
    /// 逆差分をサマリーに加える。
    pub fn revert(&mut self, key: &OperationKey) -> Option<Reverted<R>> {
        let entry = self.ledger.rollback(key)?;
        if entry.generation != self.generation {
            debug!(key = %key, "collection replaced since dispatch; nothing to revert");
            return None;
        }

        let restored = match entry.snapshot {
            Some(snapshot) => {
                let record = snapshot.record.clone();
                self.records.restore(snapshot);
                Some(record)
            }
            None => {
                self.records.remove(&entry.record_id);
                None
            }
        };
        self.summary = self.summary.apply_delta(&A::invert_delta(&entry.delta));

        debug!(key = %key, kind = %entry.kind, "optimistic change reverted");
        Some(Reverted {
            key: key.clone(),
            kind: entry.kind,
            restored,
        })
    }
}

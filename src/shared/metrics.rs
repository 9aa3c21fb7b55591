use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub const UNSET_TS: u64 = 0;

/// コレクション単位の楽観的ミューテーション集計
#[derive(Debug)]
pub struct MutationMetrics {
    applied: AtomicU64,
    reconciled: AtomicU64,
    reverted: AtomicU64,
    conflicts: AtomicU64,
    last_success_ms: AtomicU64,
    last_failure_ms: AtomicU64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MutationMetricsSnapshot {
    pub applied: u64,
    pub reconciled: u64,
    pub reverted: u64,
    pub conflicts: u64,
    pub last_success_ms: Option<u64>,
    pub last_failure_ms: Option<u64>,
}

impl MutationMetricsSnapshot {
    /// 送信済みで結果待ちの件数
    pub fn in_flight(&self) -> u64 {
        self.applied
            .saturating_sub(self.reconciled)
            .saturating_sub(self.reverted)
    }
}

impl MutationMetrics {
    pub const fn new() -> Self {
        Self {
            applied: AtomicU64::new(0),
            reconciled: AtomicU64::new(0),
            reverted: AtomicU64::new(0),
            conflicts: AtomicU64::new(0),
            last_success_ms: AtomicU64::new(UNSET_TS),
            last_failure_ms: AtomicU64::new(UNSET_TS),
        }
    }

    pub fn record_applied(&self) {
        self.applied.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reconciled(&self) {
        self.reconciled.fetch_add(1, Ordering::Relaxed);
        self.last_success_ms
            .store(current_unix_ms(), Ordering::Relaxed);
    }

    pub fn record_reverted(&self) {
        self.reverted.fetch_add(1, Ordering::Relaxed);
        self.last_failure_ms
            .store(current_unix_ms(), Ordering::Relaxed);
    }

    pub fn record_conflict(&self) {
        self.conflicts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MutationMetricsSnapshot {
        MutationMetricsSnapshot {
            applied: self.applied.load(Ordering::Relaxed),
            reconciled: self.reconciled.load(Ordering::Relaxed),
            reverted: self.reverted.load(Ordering::Relaxed),
            conflicts: self.conflicts.load(Ordering::Relaxed),
            last_success_ms: timestamp_to_option(self.last_success_ms.load(Ordering::Relaxed)),
            last_failure_ms: timestamp_to_option(self.last_failure_ms.load(Ordering::Relaxed)),
        }
    }

    pub fn reset(&self) {
        self.applied.store(0, Ordering::Relaxed);
        self.reconciled.store(0, Ordering::Relaxed);
        self.reverted.store(0, Ordering::Relaxed);
        self.conflicts.store(0, Ordering::Relaxed);
        self.last_success_ms.store(UNSET_TS, Ordering::Relaxed);
        self.last_failure_ms.store(UNSET_TS, Ordering::Relaxed);
    }
}

impl Default for MutationMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
pub fn current_unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis() as u64)
        .unwrap_or(UNSET_TS)
}

#[inline]
pub fn timestamp_to_option(value: u64) -> Option<u64> {
    if value == UNSET_TS { None } else { Some(value) }
}

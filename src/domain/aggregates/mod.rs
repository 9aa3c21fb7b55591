//! 集計サマリー（件数・合計・率）の差分適用と再計算。
//!
//! 各サマリーはレコードごとの「寄与（contribution）」の総和から導出される。
//! 楽観的更新では変更前後の寄与の差分だけを適用し、失敗時はその逆差分を
//! 適用する。差分の積み上げと全件再計算は常に一致する。

pub mod coupon_stats;
pub mod payout_stats;
pub mod question_stats;
pub mod review_stats;
pub mod transaction_stats;

pub use coupon_stats::{CouponStats, CouponStatsDelta};
pub use payout_stats::{PayoutStats, PayoutStatsDelta};
pub use question_stats::{QuestionStats, QuestionStatsDelta};
pub use review_stats::{ReviewStats, ReviewStatsDelta};
pub use transaction_stats::{TransactionStats, TransactionStatsDelta};

use std::fmt;

/// サマリーに適用する符号付きカウンタ差分
pub trait SummaryDelta: Clone + PartialEq + fmt::Debug + Default + Send + Sync + 'static {
    fn plus(&self, other: &Self) -> Self;

    fn negate(&self) -> Self;

    fn minus(&self, other: &Self) -> Self {
        self.plus(&other.negate())
    }

    fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// レコードコレクションから導出される集計サマリー
pub trait Aggregate<R>: Clone + PartialEq + fmt::Debug + Default + Send + Sync + 'static {
    type Delta: SummaryDelta;

    /// 1 レコードがサマリーに寄与するカウンタ
    fn contribution(record: &R) -> Self::Delta;

    /// 現在のサマリーを構成するカウンタ
    fn counters(&self) -> Self::Delta;

    /// カウンタから派生値（率・平均など）を含むサマリーを組み立てる
    fn from_counters(counters: Self::Delta) -> Self;

    fn apply_delta(&self, delta: &Self::Delta) -> Self {
        Self::from_counters(self.counters().plus(delta))
    }

    fn invert_delta(delta: &Self::Delta) -> Self::Delta {
        delta.negate()
    }

    fn recompute(records: &[R]) -> Self {
        let counters = records
            .iter()
            .fold(Self::Delta::default(), |acc, record| {
                acc.plus(&Self::contribution(record))
            });
        Self::from_counters(counters)
    }

    /// レコードの変更（作成・更新・削除）に対応する差分
    fn transition(before: Option<&R>, after: Option<&R>) -> Self::Delta {
        let before = before.map(Self::contribution).unwrap_or_default();
        let after = after.map(Self::contribution).unwrap_or_default();
        after.minus(&before)
    }
}

/// `round(numerator / total * 100)`（0.5 は切り上げ）。total が 0 なら 0。
pub fn response_rate(numerator: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    (numerator * 200 + total) / (total * 2)
}

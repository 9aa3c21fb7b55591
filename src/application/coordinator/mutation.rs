use crate::domain::entities::Record;
use crate::domain::value_objects::{OperationKey, RecordId};
use crate::shared::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    RefundTransaction,
    ProcessPayout,
    AnswerQuestion,
    UpdateAnswer,
    DeleteAnswer,
    MarkQuestionResolved,
    ReplyToReview,
    UpdateReply,
    DeleteReply,
    CreateCoupon,
    UpdateCoupon,
    DeleteCoupon,
}

impl MutationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationKind::RefundTransaction => "refund_transaction",
            MutationKind::ProcessPayout => "process_payout",
            MutationKind::AnswerQuestion => "answer_question",
            MutationKind::UpdateAnswer => "update_answer",
            MutationKind::DeleteAnswer => "delete_answer",
            MutationKind::MarkQuestionResolved => "mark_question_resolved",
            MutationKind::ReplyToReview => "reply_to_review",
            MutationKind::UpdateReply => "update_reply",
            MutationKind::DeleteReply => "delete_reply",
            MutationKind::CreateCoupon => "create_coupon",
            MutationKind::UpdateCoupon => "update_coupon",
            MutationKind::DeleteCoupon => "delete_coupon",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 楽観的に反映するレコードの変更
#[derive(Debug, Clone, PartialEq)]
pub enum OptimisticChange<R> {
    /// 既存レコードを置き換える（ID は変えない）
    Update(R),
    /// 存在しないレコードを先頭に挿入する
    Insert(R),
    /// 既存レコードを取り除く
    Remove,
}

impl<R> OptimisticChange<R> {
    pub fn record(&self) -> Option<&R> {
        match self {
            OptimisticChange::Update(record) | OptimisticChange::Insert(record) => Some(record),
            OptimisticChange::Remove => None,
        }
    }
}

/// 楽観的ミューテーション 1 種類分の定義。
///
/// `prepare` は入力検証と楽観的な変更の計算だけを行う純粋関数で、
/// 状態への反映・台帳登録・サマリー差分はコーディネーターが行う。
pub trait Mutation<R: Record>: Send + Sync {
    /// リモート呼び出しが返す確定値
    type Confirmed: Send;

    fn kind(&self) -> MutationKind;

    /// 変更対象のレコード ID
    fn target(&self) -> &RecordId;

    fn key(&self) -> OperationKey {
        OperationKey::from(self.target())
    }

    fn prepare(
        &self,
        current: Option<&R>,
        now: DateTime<Utc>,
    ) -> Result<OptimisticChange<R>, AppError>;

    /// 確定値で置き換えるレコード。`None` なら現状維持。
    fn reconcile(&self, current: &R, confirmed: Self::Confirmed) -> Option<R>;
}

//! ミューテーション種別ごとの検証と楽観的変更

pub mod coupons;
pub mod payouts;
pub mod questions;
pub mod reviews;
pub mod transactions;

pub use coupons::{CreateCoupon, DeleteCoupon, UpdateCoupon};
pub use payouts::ProcessPayout;
pub use questions::{AnswerQuestion, DeleteAnswer, MarkQuestionResolved, UpdateAnswer};
pub use reviews::{DeleteReply, ReplyToReview, UpdateReply};
pub use transactions::RefundTransaction;

use crate::domain::value_objects::RecordId;
use crate::shared::{AppError, ValidationFailureKind};

pub(crate) fn require<'a, R>(
    current: Option<&'a R>,
    what: &str,
    id: &RecordId,
) -> Result<&'a R, AppError> {
    current.ok_or_else(|| {
        AppError::validation(
            ValidationFailureKind::RecordNotFound,
            format!("{what} {id} is not in the current list"),
        )
    })
}

/// サーバー確定済みの ID を要求する（一時 ID のレコードは編集できない）
pub fn require_confirmed<'a>(id: &'a RecordId, what: &str) -> Result<&'a str, AppError> {
    id.as_confirmed().ok_or_else(|| {
        AppError::validation(
            ValidationFailureKind::PendingRecord,
            format!("{what} is still being saved"),
        )
    })
}

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// ミューテーション発行前のバリデーション失敗理由。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ValidationFailureKind {
    /// 汎用的なバリデーションエラー。
    Generic,
    /// 対象レコードがコレクションに存在しない。
    RecordNotFound,
    /// 本文が空。
    EmptyContent,
    /// 本文が上限文字数を超過。
    ContentTooLarge,
    /// 金額が 0 以下。
    NonPositiveAmount,
    /// 返金額が残額を超過。
    RefundExceedsBalance,
    /// 現在のステータスでは実行できない操作。
    InvalidState,
    /// 回答・返信が既に存在する。
    AlreadyAttached,
    /// 回答・返信が存在しない。
    NothingAttached,
    /// サーバー未確定（一時 ID）のレコードに対する操作。
    PendingRecord,
    /// 更新内容が空のパッチ。
    EmptyPatch,
    /// クーポンコードの形式違反。
    InvalidCouponCode,
    /// 割引率・割引額が範囲外。
    DiscountOutOfRange,
}

impl ValidationFailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationFailureKind::Generic => "generic",
            ValidationFailureKind::RecordNotFound => "record_not_found",
            ValidationFailureKind::EmptyContent => "empty_content",
            ValidationFailureKind::ContentTooLarge => "content_too_large",
            ValidationFailureKind::NonPositiveAmount => "non_positive_amount",
            ValidationFailureKind::RefundExceedsBalance => "refund_exceeds_balance",
            ValidationFailureKind::InvalidState => "invalid_state",
            ValidationFailureKind::AlreadyAttached => "already_attached",
            ValidationFailureKind::NothingAttached => "nothing_attached",
            ValidationFailureKind::PendingRecord => "pending_record",
            ValidationFailureKind::EmptyPatch => "empty_patch",
            ValidationFailureKind::InvalidCouponCode => "invalid_coupon_code",
            ValidationFailureKind::DiscountOutOfRange => "discount_out_of_range",
        }
    }
}

impl fmt::Display for ValidationFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationFailureKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "generic" => Ok(ValidationFailureKind::Generic),
            "record_not_found" => Ok(ValidationFailureKind::RecordNotFound),
            "empty_content" => Ok(ValidationFailureKind::EmptyContent),
            "content_too_large" => Ok(ValidationFailureKind::ContentTooLarge),
            "non_positive_amount" => Ok(ValidationFailureKind::NonPositiveAmount),
            "refund_exceeds_balance" => Ok(ValidationFailureKind::RefundExceedsBalance),
            "invalid_state" => Ok(ValidationFailureKind::InvalidState),
            "already_attached" => Ok(ValidationFailureKind::AlreadyAttached),
            "nothing_attached" => Ok(ValidationFailureKind::NothingAttached),
            "pending_record" => Ok(ValidationFailureKind::PendingRecord),
            "empty_patch" => Ok(ValidationFailureKind::EmptyPatch),
            "invalid_coupon_code" => Ok(ValidationFailureKind::InvalidCouponCode),
            "discount_out_of_range" => Ok(ValidationFailureKind::DiscountOutOfRange),
            _ => Err(()),
        }
    }
}

/// 本文（回答・返信）の最大文字数
pub const MAX_CONTENT_CHARS: usize = 5000;

/// 空白のみ・上限超過の本文を拒否し、前後の空白を除いた本文を返す
pub fn normalize_content(content: &str) -> Result<String, crate::shared::AppError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(crate::shared::AppError::validation(
            ValidationFailureKind::EmptyContent,
            "Content is required",
        ));
    }
    if trimmed.chars().count() > MAX_CONTENT_CHARS {
        return Err(crate::shared::AppError::validation(
            ValidationFailureKind::ContentTooLarge,
            format!("Content must be at most {MAX_CONTENT_CHARS} characters"),
        ));
    }
    Ok(trimmed.to_string())
}

use super::mutation::MutationKind;
use crate::domain::value_objects::OperationKey;
use crate::shared::{AppError, ValidationFailureKind};
use std::fmt;
use thiserror::Error;

/// 失敗したミューテーション。呼び出し側のリトライ UI 向けにキーと
/// 適用前のレコードを添える。
#[derive(Debug, Clone, Error)]
#[error("{kind} failed for {key}: {error}")]
pub struct MutationFailure<R: fmt::Debug> {
    pub key: OperationKey,
    pub kind: MutationKind,
    /// 適用前のレコード（新規作成なら `None`）
    pub snapshot: Option<R>,
    #[source]
    pub error: AppError,
}

impl<R: fmt::Debug> MutationFailure<R> {
    pub fn user_message(&self) -> &str {
        self.error.user_message()
    }

    /// 送信前に拒否された（状態は一度も変更されていない）
    pub fn is_rejected_before_dispatch(&self) -> bool {
        matches!(
            self.error,
            AppError::ValidationError { .. } | AppError::Conflict(_)
        )
    }

    pub fn validation_kind(&self) -> Option<ValidationFailureKind> {
        self.error.validation_kind()
    }

    pub fn into_error(self) -> AppError {
        self.error
    }
}

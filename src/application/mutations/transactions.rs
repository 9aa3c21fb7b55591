use super::require;
use crate::application::coordinator::{Mutation, MutationKind, OptimisticChange};
use crate::application::ports::RefundRequest;
use crate::domain::entities::Transaction;
use crate::domain::value_objects::{RecordId, TransactionStatus};
use crate::shared::{AppError, ValidationFailureKind};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// 取引の返金（全額・一部）
#[derive(Debug, Clone)]
pub struct RefundTransaction {
    id: RecordId,
    request: RefundRequest,
}

impl RefundTransaction {
    pub fn new(id: RecordId, amount: Decimal, reason: Option<String>) -> Self {
        let reason = reason
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Self {
            id,
            request: RefundRequest { amount, reason },
        }
    }

    pub fn request(&self) -> &RefundRequest {
        &self.request
    }
}

impl Mutation<Transaction> for RefundTransaction {
    type Confirmed = Transaction;

    fn kind(&self) -> MutationKind {
        MutationKind::RefundTransaction
    }

    fn target(&self) -> &RecordId {
        &self.id
    }

    fn prepare(
        &self,
        current: Option<&Transaction>,
        now: DateTime<Utc>,
    ) -> Result<OptimisticChange<Transaction>, AppError> {
        let transaction = require(current, "Transaction", &self.id)?;
        let amount = self.request.amount;

        if amount <= Decimal::ZERO {
            return Err(AppError::validation(
                ValidationFailureKind::NonPositiveAmount,
                "Refund amount must be greater than 0",
            ));
        }
        if !transaction.status.is_refundable() {
            return Err(AppError::validation(
                ValidationFailureKind::InvalidState,
                format!(
                    "Transactions in {} status cannot be refunded",
                    transaction.status
                ),
            ));
        }
        let balance = transaction.refundable_balance();
        if amount > balance {
            return Err(AppError::validation(
                ValidationFailureKind::RefundExceedsBalance,
                format!("Refund amount exceeds the refundable balance of {balance}"),
            ));
        }

        let mut next = transaction.clone();
        next.refund_amount += amount;
        next.status = TransactionStatus::after_refund(next.amount, next.refund_amount);
        next.refunded_at = Some(now);
        if self.request.reason.is_some() {
            next.refund_reason = self.request.reason.clone();
        }
        Ok(OptimisticChange::Update(next))
    }

    fn reconcile(&self, _current: &Transaction, confirmed: Transaction) -> Option<Transaction> {
        Some(confirmed)
    }
}

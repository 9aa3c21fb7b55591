use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Completed,
    PartiallyRefunded,
    Refunded,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Completed => "COMPLETED",
            TransactionStatus::PartiallyRefunded => "PARTIALLY_REFUNDED",
            TransactionStatus::Refunded => "REFUNDED",
            TransactionStatus::Failed => "FAILED",
        }
    }

    /// 返金を受け付けるステータスか
    pub fn is_refundable(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Completed | TransactionStatus::PartiallyRefunded
        )
    }

    /// 累計返金額から返金後のステータスを決める
    pub fn after_refund(amount: Decimal, refunded_total: Decimal) -> Self {
        if refunded_total >= amount {
            TransactionStatus::Refunded
        } else if refunded_total > Decimal::ZERO {
            TransactionStatus::PartiallyRefunded
        } else {
            TransactionStatus::Completed
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use super::{Aggregate, SummaryDelta};
use crate::domain::entities::Transaction;
use crate::domain::value_objects::TransactionStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStats {
    pub total_transactions: i64,
    pub completed_transactions: i64,
    pub partially_refunded_transactions: i64,
    pub refunded_transactions: i64,
    pub total_revenue: Decimal,
    pub total_refunded: Decimal,
    pub net_revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionStatsDelta {
    pub transactions: i64,
    pub completed: i64,
    pub partially_refunded: i64,
    pub refunded: i64,
    pub revenue: Decimal,
    pub refunded_amount: Decimal,
}

impl SummaryDelta for TransactionStatsDelta {
    fn plus(&self, other: &Self) -> Self {
        Self {
            transactions: self.transactions + other.transactions,
            completed: self.completed + other.completed,
            partially_refunded: self.partially_refunded + other.partially_refunded,
            refunded: self.refunded + other.refunded,
            revenue: self.revenue + other.revenue,
            refunded_amount: self.refunded_amount + other.refunded_amount,
        }
    }

    fn negate(&self) -> Self {
        Self {
            transactions: -self.transactions,
            completed: -self.completed,
            partially_refunded: -self.partially_refunded,
            refunded: -self.refunded,
            revenue: -self.revenue,
            refunded_amount: -self.refunded_amount,
        }
    }
}

impl Aggregate<Transaction> for TransactionStats {
    type Delta = TransactionStatsDelta;

    fn contribution(transaction: &Transaction) -> TransactionStatsDelta {
        let settled = matches!(
            transaction.status,
            TransactionStatus::Completed
                | TransactionStatus::PartiallyRefunded
                | TransactionStatus::Refunded
        );
        TransactionStatsDelta {
            transactions: 1,
            completed: i64::from(transaction.status == TransactionStatus::Completed),
            partially_refunded: i64::from(
                transaction.status == TransactionStatus::PartiallyRefunded,
            ),
            refunded: i64::from(transaction.status == TransactionStatus::Refunded),
            revenue: if settled {
                transaction.amount
            } else {
                Decimal::ZERO
            },
            refunded_amount: transaction.refund_amount,
        }
    }

    fn counters(&self) -> TransactionStatsDelta {
        TransactionStatsDelta {
            transactions: self.total_transactions,
            completed: self.completed_transactions,
            partially_refunded: self.partially_refunded_transactions,
            refunded: self.refunded_transactions,
            revenue: self.total_revenue,
            refunded_amount: self.total_refunded,
        }
    }

    fn from_counters(counters: TransactionStatsDelta) -> Self {
        Self {
            total_transactions: counters.transactions,
            completed_transactions: counters.completed,
            partially_refunded_transactions: counters.partially_refunded,
            refunded_transactions: counters.refunded,
            total_revenue: counters.revenue,
            total_refunded: counters.refunded_amount,
            net_revenue: counters.revenue - counters.refunded_amount,
        }
    }
}

use crate::domain::entities::Record;
use crate::domain::value_objects::{RecordId, TransactionStatus};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: RecordId,
    pub amount: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub refund_amount: Decimal,
    pub status: TransactionStatus,
    #[serde(default)]
    pub refund_reason: Option<String>,
    #[serde(default)]
    pub refunded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_currency() -> String {
    "INR".to_string()
}

impl Transaction {
    /// 返金可能な残額
    pub fn refundable_balance(&self) -> Decimal {
        (self.amount - self.refund_amount).max(Decimal::ZERO)
    }
}

impl Record for Transaction {
    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

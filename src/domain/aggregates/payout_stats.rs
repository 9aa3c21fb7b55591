use super::{Aggregate, SummaryDelta};
use crate::domain::entities::Payout;
use crate::domain::value_objects::PayoutStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutStats {
    pub pending_payouts: i64,
    pub completed_payouts: i64,
    pub pending_amount: Decimal,
    pub completed_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PayoutStatsDelta {
    pub pending: i64,
    pub completed: i64,
    pub pending_amount: Decimal,
    pub completed_amount: Decimal,
}

impl SummaryDelta for PayoutStatsDelta {
    fn plus(&self, other: &Self) -> Self {
        Self {
            pending: self.pending + other.pending,
            completed: self.completed + other.completed,
            pending_amount: self.pending_amount + other.pending_amount,
            completed_amount: self.completed_amount + other.completed_amount,
        }
    }

    fn negate(&self) -> Self {
        Self {
            pending: -self.pending,
            completed: -self.completed,
            pending_amount: -self.pending_amount,
            completed_amount: -self.completed_amount,
        }
    }
}

impl Aggregate<Payout> for PayoutStats {
    type Delta = PayoutStatsDelta;

    fn contribution(payout: &Payout) -> PayoutStatsDelta {
        let mut delta = PayoutStatsDelta::default();
        if payout.status.is_outstanding() {
            delta.pending = 1;
            delta.pending_amount = payout.amount;
        } else if payout.status == PayoutStatus::Completed {
            delta.completed = 1;
            delta.completed_amount = payout.amount;
        }
        delta
    }

    fn counters(&self) -> PayoutStatsDelta {
        PayoutStatsDelta {
            pending: self.pending_payouts,
            completed: self.completed_payouts,
            pending_amount: self.pending_amount,
            completed_amount: self.completed_amount,
        }
    }

    fn from_counters(counters: PayoutStatsDelta) -> Self {
        Self {
            pending_payouts: counters.pending,
            completed_payouts: counters.completed,
            pending_amount: counters.pending_amount,
            completed_amount: counters.completed_amount,
        }
    }
}

use super::require;
use crate::application::coordinator::{Mutation, MutationKind, OptimisticChange};
use crate::application::ports::ProcessPayoutRequest;
use crate::domain::entities::Payout;
use crate::domain::value_objects::{PayoutStatus, RecordId};
use crate::shared::{AppError, ValidationFailureKind};
use chrono::{DateTime, Utc};

/// 講師への支払い処理
#[derive(Debug, Clone)]
pub struct ProcessPayout {
    id: RecordId,
    request: ProcessPayoutRequest,
}

impl ProcessPayout {
    pub fn new(id: RecordId, gateway_id: Option<String>) -> Self {
        let gateway_id = gateway_id
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Self {
            id,
            request: ProcessPayoutRequest { gateway_id },
        }
    }

    pub fn request(&self) -> &ProcessPayoutRequest {
        &self.request
    }
}

impl Mutation<Payout> for ProcessPayout {
    type Confirmed = Payout;

    fn kind(&self) -> MutationKind {
        MutationKind::ProcessPayout
    }

    fn target(&self) -> &RecordId {
        &self.id
    }

    fn prepare(
        &self,
        current: Option<&Payout>,
        now: DateTime<Utc>,
    ) -> Result<OptimisticChange<Payout>, AppError> {
        let payout = require(current, "Payout", &self.id)?;
        if !payout.status.is_outstanding() {
            return Err(AppError::validation(
                ValidationFailureKind::InvalidState,
                format!("Payout is already {}", payout.status),
            ));
        }

        let mut next = payout.clone();
        next.status = PayoutStatus::Completed;
        next.processed_at = Some(now);
        if self.request.gateway_id.is_some() {
            next.gateway_id = self.request.gateway_id.clone();
        }
        Ok(OptimisticChange::Update(next))
    }

    fn reconcile(&self, _current: &Payout, confirmed: Payout) -> Option<Payout> {
        Some(confirmed)
    }
}

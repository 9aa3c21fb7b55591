use crate::application::coordinator::{MutationFailure, OptimisticCollection};
use crate::application::mutations::{require_confirmed, ProcessPayout};
use crate::application::ports::PayoutGateway;
use crate::domain::aggregates::PayoutStats;
use crate::domain::entities::{ListQuery, Pagination, Payout};
use crate::domain::value_objects::{OperationKey, RecordId};
use crate::shared::{AppError, MutationMetricsSnapshot};
use std::sync::Arc;

/// 講師への支払い一覧
pub struct PayoutStore {
    gateway: Arc<dyn PayoutGateway>,
    collection: OptimisticCollection<Payout, PayoutStats>,
}

impl PayoutStore {
    pub fn new(gateway: Arc<dyn PayoutGateway>) -> Self {
        Self {
            gateway,
            collection: OptimisticCollection::new("payouts"),
        }
    }

    pub async fn load(&self, query: ListQuery) -> Result<Pagination, AppError> {
        let page = self.gateway.list(&query).await?;
        let pagination = page.pagination.clone();
        self.collection.replace_all(page, query.filters);
        Ok(pagination)
    }

    pub async fn process(
        &self,
        id: &RecordId,
        gateway_id: Option<String>,
    ) -> Result<Option<Payout>, MutationFailure<Payout>> {
        let mutation = ProcessPayout::new(id.clone(), gateway_id);
        let request = mutation.request().clone();
        let gateway = Arc::clone(&self.gateway);
        let id = id.clone();
        self.collection
            .execute(mutation, async move {
                let id = require_confirmed(&id, "Payout")?;
                gateway.process(id, &request).await
            })
            .await
    }

    pub fn records(&self) -> Vec<Payout> {
        self.collection.records()
    }

    pub fn find(&self, id: &RecordId) -> Option<Payout> {
        self.collection.find(id)
    }

    pub fn summary(&self) -> PayoutStats {
        self.collection.summary()
    }

    pub fn pagination(&self) -> Pagination {
        self.collection.pagination()
    }

    pub fn is_pending(&self, id: &RecordId) -> bool {
        self.collection.is_pending(&OperationKey::from(id))
    }

    pub fn metrics(&self) -> MutationMetricsSnapshot {
        self.collection.metrics()
    }

    pub fn collection(&self) -> &OptimisticCollection<Payout, PayoutStats> {
        &self.collection
    }
}

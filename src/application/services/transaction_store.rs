use crate::application::coordinator::{MutationFailure, OptimisticCollection};
use crate::application::mutations::{require_confirmed, RefundTransaction};
use crate::application::ports::TransactionGateway;
use crate::domain::aggregates::TransactionStats;
use crate::domain::entities::{ListQuery, Pagination, Transaction};
use crate::domain::value_objects::{OperationKey, RecordId};
use crate::shared::{AppError, MutationMetricsSnapshot};
use rust_decimal::Decimal;
use std::sync::Arc;

/// 管理画面の取引一覧
pub struct TransactionStore {
    gateway: Arc<dyn TransactionGateway>,
    collection: OptimisticCollection<Transaction, TransactionStats>,
}

impl TransactionStore {
    pub fn new(gateway: Arc<dyn TransactionGateway>) -> Self {
        Self {
            gateway,
            collection: OptimisticCollection::new("transactions"),
        }
    }

    pub async fn load(&self, query: ListQuery) -> Result<Pagination, AppError> {
        let page = self.gateway.list(&query).await?;
        let pagination = page.pagination.clone();
        self.collection.replace_all(page, query.filters);
        Ok(pagination)
    }

    pub async fn refund(
        &self,
        id: &RecordId,
        amount: Decimal,
        reason: Option<String>,
    ) -> Result<Option<Transaction>, MutationFailure<Transaction>> {
        let mutation = RefundTransaction::new(id.clone(), amount, reason);
        let request = mutation.request().clone();
        let gateway = Arc::clone(&self.gateway);
        let id = id.clone();
        self.collection
            .execute(mutation, async move {
                let id = require_confirmed(&id, "Transaction")?;
                gateway.refund(id, &request).await
            })
            .await
    }

    pub fn records(&self) -> Vec<Transaction> {
        self.collection.records()
    }

    pub fn find(&self, id: &RecordId) -> Option<Transaction> {
        self.collection.find(id)
    }

    pub fn summary(&self) -> TransactionStats {
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

    pub fn collection(&self) -> &OptimisticCollection<Transaction, TransactionStats> {
        &self.collection
    }
}

use crate::application::coordinator::{MutationFailure, OptimisticCollection};
use crate::application::mutations::{require_confirmed, DeleteReply, ReplyToReview, UpdateReply};
use crate::application::ports::ReviewGateway;
use crate::domain::aggregates::ReviewStats;
use crate::domain::entities::{ListQuery, Pagination, Review};
use crate::domain::value_objects::{OperationKey, RecordId};
use crate::shared::{AppError, MutationMetricsSnapshot};
use std::sync::Arc;

/// コースレビュー一覧（返信の操作はレビュー ID をキーにする）
pub struct ReviewStore {
    gateway: Arc<dyn ReviewGateway>,
    collection: OptimisticCollection<Review, ReviewStats>,
}

impl ReviewStore {
    pub fn new(gateway: Arc<dyn ReviewGateway>) -> Self {
        Self {
            gateway,
            collection: OptimisticCollection::new("reviews"),
        }
    }

    pub async fn load(&self, query: ListQuery) -> Result<Pagination, AppError> {
        let page = self.gateway.list(&query).await?;
        let pagination = page.pagination.clone();
        self.collection.replace_all(page, query.filters);
        Ok(pagination)
    }

    pub async fn reply(
        &self,
        review_id: &RecordId,
        content: &str,
    ) -> Result<Option<Review>, MutationFailure<Review>> {
        let mutation = ReplyToReview::new(review_id.clone(), content);
        let draft = mutation.draft().clone();
        let gateway = Arc::clone(&self.gateway);
        let review_id = review_id.clone();
        self.collection
            .execute(mutation, async move {
                let review_id = require_confirmed(&review_id, "Review")?;
                gateway.reply(review_id, &draft).await
            })
            .await
    }

    pub async fn update_reply(
        &self,
        review_id: &RecordId,
        reply_id: &RecordId,
        content: &str,
    ) -> Result<Option<Review>, MutationFailure<Review>> {
        let mutation = UpdateReply::new(review_id.clone(), reply_id.clone(), content);
        let draft = mutation.draft().clone();
        let gateway = Arc::clone(&self.gateway);
        let reply_id = reply_id.clone();
        self.collection
            .execute(mutation, async move {
                let reply_id = require_confirmed(&reply_id, "Reply")?;
                gateway.update_reply(reply_id, &draft).await
            })
            .await
    }

    pub async fn delete_reply(
        &self,
        review_id: &RecordId,
        reply_id: &RecordId,
    ) -> Result<Option<Review>, MutationFailure<Review>> {
        let mutation = DeleteReply::new(review_id.clone(), reply_id.clone());
        let gateway = Arc::clone(&self.gateway);
        let reply_id = reply_id.clone();
        self.collection
            .execute(mutation, async move {
                let reply_id = require_confirmed(&reply_id, "Reply")?;
                gateway.delete_reply(reply_id).await
            })
            .await
    }

    pub fn records(&self) -> Vec<Review> {
        self.collection.records()
    }

    pub fn find(&self, id: &RecordId) -> Option<Review> {
        self.collection.find(id)
    }

    pub fn summary(&self) -> ReviewStats {
        self.collection.summary()
    }

    pub fn pagination(&self) -> Pagination {
        self.collection.pagination()
    }

    pub fn is_pending(&self, review_id: &RecordId) -> bool {
        self.collection.is_pending(&OperationKey::from(review_id))
    }

    pub fn metrics(&self) -> MutationMetricsSnapshot {
        self.collection.metrics()
    }

    pub fn collection(&self) -> &OptimisticCollection<Review, ReviewStats> {
        &self.collection
    }
}

use crate::application::coordinator::{MutationFailure, OptimisticCollection};
use crate::application::mutations::{require_confirmed, CreateCoupon, DeleteCoupon, UpdateCoupon};
use crate::application::ports::{CouponDraft, CouponGateway, CouponPatch};
use crate::domain::aggregates::CouponStats;
use crate::domain::entities::{Coupon, ListQuery, Pagination};
use crate::domain::value_objects::{OperationKey, RecordId};
use crate::shared::{AppError, MutationMetricsSnapshot};
use std::sync::Arc;

/// 講師のクーポン一覧
pub struct CouponStore {
    gateway: Arc<dyn CouponGateway>,
    collection: OptimisticCollection<Coupon, CouponStats>,
}

impl CouponStore {
    pub fn new(gateway: Arc<dyn CouponGateway>) -> Self {
        Self {
            gateway,
            collection: OptimisticCollection::new("coupons"),
        }
    }

    pub async fn load(&self, query: ListQuery) -> Result<Pagination, AppError> {
        let page = self.gateway.list(&query).await?;
        let pagination = page.pagination.clone();
        self.collection.replace_all(page, query.filters);
        Ok(pagination)
    }

    /// 作成。確定後は一時 ID がサーバー採番の ID に置き換わる。
    pub async fn create(
        &self,
        draft: CouponDraft,
    ) -> Result<Option<Coupon>, MutationFailure<Coupon>> {
        let mutation = CreateCoupon::new(draft);
        let draft = mutation.draft().clone();
        let gateway = Arc::clone(&self.gateway);
        self.collection
            .execute(mutation, async move { gateway.create(&draft).await })
            .await
    }

    pub async fn update(
        &self,
        id: &RecordId,
        patch: CouponPatch,
    ) -> Result<Option<Coupon>, MutationFailure<Coupon>> {
        let mutation = UpdateCoupon::new(id.clone(), patch);
        let patch = mutation.patch().clone();
        let gateway = Arc::clone(&self.gateway);
        let id = id.clone();
        self.collection
            .execute(mutation, async move {
                let id = require_confirmed(&id, "Coupon")?;
                gateway.update(id, &patch).await
            })
            .await
    }

    pub async fn delete(&self, id: &RecordId) -> Result<(), MutationFailure<Coupon>> {
        let mutation = DeleteCoupon::new(id.clone());
        let gateway = Arc::clone(&self.gateway);
        let id = id.clone();
        self.collection
            .execute(mutation, async move {
                let id = require_confirmed(&id, "Coupon")?;
                gateway.delete(id).await
            })
            .await
            .map(|_| ())
    }

    pub fn records(&self) -> Vec<Coupon> {
        self.collection.records()
    }

    pub fn find(&self, id: &RecordId) -> Option<Coupon> {
        self.collection.find(id)
    }

    pub fn summary(&self) -> CouponStats {
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

    pub fn collection(&self) -> &OptimisticCollection<Coupon, CouponStats> {
        &self.collection
    }
}

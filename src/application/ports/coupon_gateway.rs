use crate::domain::entities::{Coupon, DiscountType, ListPage, ListQuery};
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponDraft {
    pub code: String,
    pub discount_type: DiscountType,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_value: Decimal,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl CouponDraft {
    pub fn new(code: impl Into<String>, discount_type: DiscountType, discount_value: Decimal) -> Self {
        Self {
            code: code.into(),
            discount_type,
            discount_value,
            is_active: true,
            usage_limit: None,
            expires_at: None,
        }
    }
}

/// 部分更新。`None` のフィールドは変更しない。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub discount_value: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
}

impl CouponPatch {
    pub fn activation(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_none()
            && self.discount_value.is_none()
            && self.is_active.is_none()
            && self.usage_limit.is_none()
    }

    pub fn apply_to(&self, coupon: &mut Coupon) {
        if let Some(code) = &self.code {
            coupon.code = code.clone();
        }
        if let Some(value) = self.discount_value {
            coupon.discount_value = value;
        }
        if let Some(is_active) = self.is_active {
            coupon.is_active = is_active;
        }
        if let Some(limit) = self.usage_limit {
            coupon.usage_limit = Some(limit);
        }
    }
}

#[async_trait]
pub trait CouponGateway: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<ListPage<Coupon>, AppError>;

    async fn create(&self, draft: &CouponDraft) -> Result<Coupon, AppError>;

    async fn update(&self, id: &str, patch: &CouponPatch) -> Result<Coupon, AppError>;

    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

use crate::domain::entities::{ListPage, ListQuery, Transaction};
use crate::shared::error::AppError;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// 管理者向け取引 API
#[async_trait]
pub trait TransactionGateway: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<ListPage<Transaction>, AppError>;

    /// 返金を実行し、返金後の取引を返す
    async fn refund(&self, id: &str, request: &RefundRequest) -> Result<Transaction, AppError>;
}

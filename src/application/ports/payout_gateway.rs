use crate::domain::entities::{ListPage, ListQuery, Payout};
use crate::shared::error::AppError;
use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPayoutRequest {
    /// 決済ゲートウェイ側の送金 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_id: Option<String>,
}

#[async_trait]
pub trait PayoutGateway: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<ListPage<Payout>, AppError>;

    async fn process(&self, id: &str, request: &ProcessPayoutRequest) -> Result<Payout, AppError>;
}

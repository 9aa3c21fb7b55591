use crate::domain::entities::{ListPage, ListQuery, Review, ReviewReply};
use crate::shared::error::AppError;
use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyDraft {
    pub content: String,
}

#[async_trait]
pub trait ReviewGateway: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<ListPage<Review>, AppError>;

    async fn reply(&self, review_id: &str, draft: &ReplyDraft) -> Result<ReviewReply, AppError>;

    async fn update_reply(&self, reply_id: &str, draft: &ReplyDraft)
        -> Result<ReviewReply, AppError>;

    async fn delete_reply(&self, reply_id: &str) -> Result<(), AppError>;
}

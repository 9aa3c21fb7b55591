use crate::domain::entities::{Answer, ListPage, ListQuery, Question};
use crate::shared::error::AppError;
use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDraft {
    pub content: String,
    /// 回答と同時に質問を解決済みにする
    pub mark_resolved: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_accepted: Option<bool>,
}

impl AnswerPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            is_accepted: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.is_accepted.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    pub is_resolved: bool,
}

/// 講師コミュニティの Q&A API
#[async_trait]
pub trait QuestionGateway: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<ListPage<Question>, AppError>;

    async fn answer(&self, question_id: &str, draft: &AnswerDraft) -> Result<Answer, AppError>;

    async fn update_answer(&self, answer_id: &str, patch: &AnswerPatch)
        -> Result<Answer, AppError>;

    async fn delete_answer(&self, answer_id: &str) -> Result<(), AppError>;

    /// 解決済みフラグを更新し、更新後の質問を返す
    async fn mark_resolved(
        &self,
        question_id: &str,
        request: &ResolveRequest,
    ) -> Result<Question, AppError>;
}

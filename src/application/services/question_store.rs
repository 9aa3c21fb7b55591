use crate::application::coordinator::{MutationFailure, OptimisticCollection};
use crate::application::mutations::{
    require_confirmed, AnswerQuestion, DeleteAnswer, MarkQuestionResolved, UpdateAnswer,
};
use crate::application::ports::{AnswerPatch, QuestionGateway};
use crate::domain::aggregates::QuestionStats;
use crate::domain::entities::{ListQuery, Pagination, Question};
use crate::domain::value_objects::{OperationKey, RecordId};
use crate::shared::{AppError, MutationMetricsSnapshot};
use std::sync::Arc;

/// 講師コミュニティの Q&A 一覧。
///
/// 回答の操作も親の質問 ID をキーにするため、同じ質問への操作は同時に
/// 1 件しか実行できない。
pub struct QuestionStore {
    gateway: Arc<dyn QuestionGateway>,
    collection: OptimisticCollection<Question, QuestionStats>,
}

impl QuestionStore {
    pub fn new(gateway: Arc<dyn QuestionGateway>) -> Self {
        Self {
            gateway,
            collection: OptimisticCollection::new("questions"),
        }
    }

    pub async fn load(&self, query: ListQuery) -> Result<Pagination, AppError> {
        let page = self.gateway.list(&query).await?;
        let pagination = page.pagination.clone();
        self.collection.replace_all(page, query.filters);
        Ok(pagination)
    }

    pub async fn answer(
        &self,
        question_id: &RecordId,
        content: &str,
        mark_resolved: bool,
    ) -> Result<Option<Question>, MutationFailure<Question>> {
        let mutation = AnswerQuestion::new(question_id.clone(), content, mark_resolved);
        let draft = mutation.draft().clone();
        let gateway = Arc::clone(&self.gateway);
        let question_id = question_id.clone();
        self.collection
            .execute(mutation, async move {
                let question_id = require_confirmed(&question_id, "Question")?;
                gateway.answer(question_id, &draft).await
            })
            .await
    }

    pub async fn update_answer(
        &self,
        question_id: &RecordId,
        answer_id: &RecordId,
        patch: AnswerPatch,
    ) -> Result<Option<Question>, MutationFailure<Question>> {
        let mutation = UpdateAnswer::new(question_id.clone(), answer_id.clone(), patch);
        let patch = mutation.patch().clone();
        let gateway = Arc::clone(&self.gateway);
        let answer_id = answer_id.clone();
        self.collection
            .execute(mutation, async move {
                let answer_id = require_confirmed(&answer_id, "Answer")?;
                gateway.update_answer(answer_id, &patch).await
            })
            .await
    }

    pub async fn delete_answer(
        &self,
        question_id: &RecordId,
        answer_id: &RecordId,
    ) -> Result<Option<Question>, MutationFailure<Question>> {
        let mutation = DeleteAnswer::new(question_id.clone(), answer_id.clone());
        let gateway = Arc::clone(&self.gateway);
        let answer_id = answer_id.clone();
        self.collection
            .execute(mutation, async move {
                let answer_id = require_confirmed(&answer_id, "Answer")?;
                gateway.delete_answer(answer_id).await
            })
            .await
    }

    pub async fn mark_resolved(
        &self,
        question_id: &RecordId,
        is_resolved: bool,
    ) -> Result<Option<Question>, MutationFailure<Question>> {
        let mutation = MarkQuestionResolved::new(question_id.clone(), is_resolved);
        let request = mutation.request().clone();
        let gateway = Arc::clone(&self.gateway);
        let question_id = question_id.clone();
        self.collection
            .execute(mutation, async move {
                let question_id = require_confirmed(&question_id, "Question")?;
                gateway.mark_resolved(question_id, &request).await
            })
            .await
    }

    pub fn records(&self) -> Vec<Question> {
        self.collection.records()
    }

    pub fn find(&self, id: &RecordId) -> Option<Question> {
        self.collection.find(id)
    }

    pub fn summary(&self) -> QuestionStats {
        self.collection.summary()
    }

    pub fn pagination(&self) -> Pagination {
        self.collection.pagination()
    }

    pub fn is_pending(&self, question_id: &RecordId) -> bool {
        self.collection.is_pending(&OperationKey::from(question_id))
    }

    pub fn metrics(&self) -> MutationMetricsSnapshot {
        self.collection.metrics()
    }

    pub fn collection(&self) -> &OptimisticCollection<Question, QuestionStats> {
        &self.collection
    }
}

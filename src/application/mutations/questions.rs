use super::{require, require_confirmed};
use crate::application::coordinator::{Mutation, MutationKind, OptimisticChange};
use crate::application::ports::{AnswerDraft, AnswerPatch, ResolveRequest};
use crate::domain::entities::{Answer, Question};
use crate::domain::value_objects::RecordId;
use crate::shared::validation::normalize_content;
use crate::shared::{AppError, ValidationFailureKind};
use chrono::{DateTime, Utc};

fn attached_answer<'a>(question: &'a Question, answer_id: &RecordId) -> Result<&'a Answer, AppError> {
    question
        .my_answer
        .as_ref()
        .filter(|answer| &answer.id == answer_id)
        .ok_or_else(|| {
            AppError::validation(
                ValidationFailureKind::NothingAttached,
                format!("Answer {answer_id} is not attached to question {}", question.id),
            )
        })
}

/// 質問への回答。確定までは一時 ID の回答を添付しておく。
#[derive(Debug, Clone)]
pub struct AnswerQuestion {
    question_id: RecordId,
    answer_id: RecordId,
    draft: AnswerDraft,
}

impl AnswerQuestion {
    pub fn new(question_id: RecordId, content: &str, mark_resolved: bool) -> Self {
        let (answer_id, _) = RecordId::pending();
        Self {
            question_id,
            answer_id,
            draft: AnswerDraft {
                content: content.trim().to_string(),
                mark_resolved,
            },
        }
    }

    pub fn answer_id(&self) -> &RecordId {
        &self.answer_id
    }

    pub fn draft(&self) -> &AnswerDraft {
        &self.draft
    }
}

impl Mutation<Question> for AnswerQuestion {
    type Confirmed = Answer;

    fn kind(&self) -> MutationKind {
        MutationKind::AnswerQuestion
    }

    fn target(&self) -> &RecordId {
        &self.question_id
    }

    fn prepare(
        &self,
        current: Option<&Question>,
        now: DateTime<Utc>,
    ) -> Result<OptimisticChange<Question>, AppError> {
        let question = require(current, "Question", &self.question_id)?;
        let content = normalize_content(&self.draft.content)?;
        if question.has_my_answer || question.my_answer.is_some() {
            return Err(AppError::validation(
                ValidationFailureKind::AlreadyAttached,
                "You have already answered this question",
            ));
        }

        let mut next = question.clone();
        next.my_answer = Some(Answer {
            id: self.answer_id.clone(),
            content,
            is_accepted: false,
            created_at: now,
            updated_at: now,
        });
        next.has_my_answer = true;
        next.total_answers += 1;
        if self.draft.mark_resolved {
            next.is_resolved = true;
        }
        Ok(OptimisticChange::Update(next))
    }

    fn reconcile(&self, current: &Question, confirmed: Answer) -> Option<Question> {
        attached_answer(current, &self.answer_id).ok()?;
        let mut next = current.clone();
        next.updated_at = confirmed.updated_at;
        next.my_answer = Some(confirmed);
        Some(next)
    }
}

/// 添付済み回答の部分更新
#[derive(Debug, Clone)]
pub struct UpdateAnswer {
    question_id: RecordId,
    answer_id: RecordId,
    patch: AnswerPatch,
}

impl UpdateAnswer {
    pub fn new(question_id: RecordId, answer_id: RecordId, mut patch: AnswerPatch) -> Self {
        if let Some(content) = patch.content.as_mut() {
            *content = content.trim().to_string();
        }
        Self {
            question_id,
            answer_id,
            patch,
        }
    }

    pub fn answer_id(&self) -> &RecordId {
        &self.answer_id
    }

    pub fn patch(&self) -> &AnswerPatch {
        &self.patch
    }
}

impl Mutation<Question> for UpdateAnswer {
    type Confirmed = Answer;

    fn kind(&self) -> MutationKind {
        MutationKind::UpdateAnswer
    }

    fn target(&self) -> &RecordId {
        &self.question_id
    }

    fn prepare(
        &self,
        current: Option<&Question>,
        now: DateTime<Utc>,
    ) -> Result<OptimisticChange<Question>, AppError> {
        require_confirmed(&self.answer_id, "Answer")?;
        if self.patch.is_empty() {
            return Err(AppError::validation(
                ValidationFailureKind::EmptyPatch,
                "Nothing to update",
            ));
        }
        let question = require(current, "Question", &self.question_id)?;
        let mut answer = attached_answer(question, &self.answer_id)?.clone();

        if let Some(content) = &self.patch.content {
            answer.content = normalize_content(content)?;
        }
        if let Some(is_accepted) = self.patch.is_accepted {
            answer.is_accepted = is_accepted;
        }
        answer.updated_at = now;

        let mut next = question.clone();
        next.my_answer = Some(answer);
        Ok(OptimisticChange::Update(next))
    }

    fn reconcile(&self, current: &Question, confirmed: Answer) -> Option<Question> {
        attached_answer(current, &self.answer_id).ok()?;
        let mut next = current.clone();
        next.updated_at = confirmed.updated_at;
        next.my_answer = Some(confirmed);
        Some(next)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteAnswer {
    question_id: RecordId,
    answer_id: RecordId,
}

impl DeleteAnswer {
    pub fn new(question_id: RecordId, answer_id: RecordId) -> Self {
        Self {
            question_id,
            answer_id,
        }
    }

    pub fn answer_id(&self) -> &RecordId {
        &self.answer_id
    }
}

impl Mutation<Question> for DeleteAnswer {
    type Confirmed = ();

    fn kind(&self) -> MutationKind {
        MutationKind::DeleteAnswer
    }

    fn target(&self) -> &RecordId {
        &self.question_id
    }

    fn prepare(
        &self,
        current: Option<&Question>,
        _now: DateTime<Utc>,
    ) -> Result<OptimisticChange<Question>, AppError> {
        require_confirmed(&self.answer_id, "Answer")?;
        let question = require(current, "Question", &self.question_id)?;
        attached_answer(question, &self.answer_id)?;

        let mut next = question.clone();
        next.my_answer = None;
        next.has_my_answer = false;
        next.total_answers = next.total_answers.saturating_sub(1);
        Ok(OptimisticChange::Update(next))
    }

    fn reconcile(&self, _current: &Question, _confirmed: ()) -> Option<Question> {
        None
    }
}

/// 解決済みフラグの切り替え（件数は変わらない）
#[derive(Debug, Clone)]
pub struct MarkQuestionResolved {
    question_id: RecordId,
    request: ResolveRequest,
}

impl MarkQuestionResolved {
    pub fn new(question_id: RecordId, is_resolved: bool) -> Self {
        Self {
            question_id,
            request: ResolveRequest { is_resolved },
        }
    }

    pub fn request(&self) -> &ResolveRequest {
        &self.request
    }
}

impl Mutation<Question> for MarkQuestionResolved {
    type Confirmed = Question;

    fn kind(&self) -> MutationKind {
        MutationKind::MarkQuestionResolved
    }

    fn target(&self) -> &RecordId {
        &self.question_id
    }

    fn prepare(
        &self,
        current: Option<&Question>,
        _now: DateTime<Utc>,
    ) -> Result<OptimisticChange<Question>, AppError> {
        let question = require(current, "Question", &self.question_id)?;
        if question.is_resolved == self.request.is_resolved {
            return Err(AppError::validation(
                ValidationFailureKind::InvalidState,
                if question.is_resolved {
                    "Question is already resolved"
                } else {
                    "Question is already open"
                },
            ));
        }

        let mut next = question.clone();
        next.is_resolved = self.request.is_resolved;
        Ok(OptimisticChange::Update(next))
    }

    // レスポンスの質問には回答が含まれないため、フラグと更新時刻だけ取り込む
    fn reconcile(&self, current: &Question, confirmed: Question) -> Option<Question> {
        let mut next = current.clone();
        next.is_resolved = confirmed.is_resolved;
        next.updated_at = confirmed.updated_at;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn question() -> Question {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Question {
            id: "q1".into(),
            title: "Borrow checker".to_string(),
            content: "Why does this not compile?".to_string(),
            course_id: Some("c1".to_string()),
            has_my_answer: false,
            total_answers: 2,
            is_resolved: false,
            my_answer: None,
            created_at: at,
            updated_at: at,
        }
    }

    fn updated(change: OptimisticChange<Question>) -> Question {
        match change {
            OptimisticChange::Update(next) => next,
            other => panic!("unexpected change: {other:?}"),
        }
    }

    fn answered(answer_id: &str) -> Question {
        let mut q = question();
        q.has_my_answer = true;
        q.total_answers = 3;
        q.my_answer = Some(Answer {
            id: answer_id.into(),
            content: "Lifetimes".to_string(),
            is_accepted: false,
            created_at: q.created_at,
            updated_at: q.created_at,
        });
        q
    }

    #[test]
    fn test_answer_attaches_pending_answer() {
        let answer = AnswerQuestion::new("q1".into(), "  Use a clone  ", true);
        let next = updated(answer.prepare(Some(&question()), Utc::now()).unwrap());

        let attached = next.my_answer.as_ref().unwrap();
        assert!(attached.id.is_pending());
        assert_eq!(&attached.id, answer.answer_id());
        assert_eq!(attached.content, "Use a clone");
        assert!(next.has_my_answer);
        assert_eq!(next.total_answers, 3);
        assert!(next.is_resolved);
    }

    #[test]
    fn test_answer_rejects_second_answer_and_blank_content() {
        let err = AnswerQuestion::new("q1".into(), "again", false)
            .prepare(Some(&answered("a1")), Utc::now())
            .unwrap_err();
        assert_eq!(
            err.validation_kind(),
            Some(ValidationFailureKind::AlreadyAttached)
        );

        let err = AnswerQuestion::new("q1".into(), "  ", false)
            .prepare(Some(&question()), Utc::now())
            .unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationFailureKind::EmptyContent));
    }

    #[test]
    fn test_answer_reconcile_swaps_pending_answer() {
        let answer = AnswerQuestion::new("q1".into(), "Use a clone", false);
        let optimistic = updated(answer.prepare(Some(&question()), Utc::now()).unwrap());
        let confirmed = Answer {
            id: "a1".into(),
            content: "Use a clone".to_string(),
            is_accepted: false,
            created_at: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
        };

        let next = answer.reconcile(&optimistic, confirmed.clone()).unwrap();
        assert_eq!(next.my_answer, Some(confirmed.clone()));
        assert_eq!(next.total_answers, optimistic.total_answers);
        assert_eq!(next.updated_at, confirmed.updated_at);

        // 既に別の回答に置き換わっていれば何もしない
        assert_eq!(answer.reconcile(&answered("a9"), confirmed), None);
    }

    #[test]
    fn test_update_answer_merges_patch() {
        let update = UpdateAnswer::new("q1".into(), "a1".into(), AnswerPatch::content(" Edited "));
        let next = updated(update.prepare(Some(&answered("a1")), Utc::now()).unwrap());
        let answer = next.my_answer.unwrap();
        assert_eq!(answer.content, "Edited");
        assert!(!answer.is_accepted);
        assert_eq!(next.total_answers, 3);
    }

    #[test]
    fn test_update_answer_validation() {
        let empty = UpdateAnswer::new("q1".into(), "a1".into(), AnswerPatch::default());
        assert_eq!(
            empty
                .prepare(Some(&answered("a1")), Utc::now())
                .unwrap_err()
                .validation_kind(),
            Some(ValidationFailureKind::EmptyPatch)
        );

        let (pending, _) = RecordId::pending();
        let unsaved = UpdateAnswer::new("q1".into(), pending, AnswerPatch::content("x"));
        assert_eq!(
            unsaved
                .prepare(Some(&answered("a1")), Utc::now())
                .unwrap_err()
                .validation_kind(),
            Some(ValidationFailureKind::PendingRecord)
        );

        let wrong = UpdateAnswer::new("q1".into(), "a2".into(), AnswerPatch::content("x"));
        assert_eq!(
            wrong
                .prepare(Some(&answered("a1")), Utc::now())
                .unwrap_err()
                .validation_kind(),
            Some(ValidationFailureKind::NothingAttached)
        );
    }

    #[test]
    fn test_delete_answer_detaches() {
        let delete = DeleteAnswer::new("q1".into(), "a1".into());
        let next = updated(delete.prepare(Some(&answered("a1")), Utc::now()).unwrap());
        assert_eq!(next.my_answer, None);
        assert!(!next.has_my_answer);
        assert_eq!(next.total_answers, 2);
    }

    #[test]
    fn test_mark_resolved_rejects_noop_and_merges_flag() {
        let resolve = MarkQuestionResolved::new("q1".into(), true);
        let next = updated(resolve.prepare(Some(&question()), Utc::now()).unwrap());
        assert!(next.is_resolved);
        assert_eq!(next.total_answers, 2);

        assert_eq!(
            resolve
                .prepare(Some(&next), Utc::now())
                .unwrap_err()
                .validation_kind(),
            Some(ValidationFailureKind::InvalidState)
        );

        let mut server = question();
        server.is_resolved = true;
        server.updated_at = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let merged = resolve.reconcile(&answered("a1"), server.clone()).unwrap();
        assert!(merged.is_resolved);
        assert_eq!(merged.updated_at, server.updated_at);
        assert!(merged.my_answer.is_some());
    }
}

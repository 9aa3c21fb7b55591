use super::{require, require_confirmed};
use crate::application::coordinator::{Mutation, MutationKind, OptimisticChange};
use crate::application::ports::ReplyDraft;
use crate::domain::entities::{Review, ReviewReply};
use crate::domain::value_objects::RecordId;
use crate::shared::validation::normalize_content;
use crate::shared::{AppError, ValidationFailureKind};
use chrono::{DateTime, Utc};

fn attached_reply<'a>(review: &'a Review, reply_id: &RecordId) -> Result<&'a ReviewReply, AppError> {
    review
        .reply
        .as_ref()
        .filter(|reply| &reply.id == reply_id)
        .ok_or_else(|| {
            AppError::validation(
                ValidationFailureKind::NothingAttached,
                format!("Reply {reply_id} is not attached to review {}", review.id),
            )
        })
}

fn draft(content: &str) -> ReplyDraft {
    ReplyDraft {
        content: content.trim().to_string(),
    }
}

/// レビューへの返信
#[derive(Debug, Clone)]
pub struct ReplyToReview {
    review_id: RecordId,
    reply_id: RecordId,
    draft: ReplyDraft,
}

impl ReplyToReview {
    pub fn new(review_id: RecordId, content: &str) -> Self {
        let (reply_id, _) = RecordId::pending();
        Self {
            review_id,
            reply_id,
            draft: draft(content),
        }
    }

    pub fn reply_id(&self) -> &RecordId {
        &self.reply_id
    }

    pub fn draft(&self) -> &ReplyDraft {
        &self.draft
    }
}

impl Mutation<Review> for ReplyToReview {
    type Confirmed = ReviewReply;

    fn kind(&self) -> MutationKind {
        MutationKind::ReplyToReview
    }

    fn target(&self) -> &RecordId {
        &self.review_id
    }

    fn prepare(
        &self,
        current: Option<&Review>,
        now: DateTime<Utc>,
    ) -> Result<OptimisticChange<Review>, AppError> {
        let review = require(current, "Review", &self.review_id)?;
        let content = normalize_content(&self.draft.content)?;
        if review.has_reply || review.reply.is_some() {
            return Err(AppError::validation(
                ValidationFailureKind::AlreadyAttached,
                "This review already has a reply",
            ));
        }

        let mut next = review.clone();
        next.reply = Some(ReviewReply {
            id: self.reply_id.clone(),
            content,
            created_at: now,
            updated_at: now,
        });
        next.has_reply = true;
        Ok(OptimisticChange::Update(next))
    }

    fn reconcile(&self, current: &Review, confirmed: ReviewReply) -> Option<Review> {
        attached_reply(current, &self.reply_id).ok()?;
        let mut next = current.clone();
        next.updated_at = confirmed.updated_at;
        next.reply = Some(confirmed);
        Some(next)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateReply {
    review_id: RecordId,
    reply_id: RecordId,
    draft: ReplyDraft,
}

impl UpdateReply {
    pub fn new(review_id: RecordId, reply_id: RecordId, content: &str) -> Self {
        Self {
            review_id,
            reply_id,
            draft: draft(content),
        }
    }

    pub fn reply_id(&self) -> &RecordId {
        &self.reply_id
    }

    pub fn draft(&self) -> &ReplyDraft {
        &self.draft
    }
}

impl Mutation<Review> for UpdateReply {
    type Confirmed = ReviewReply;

    fn kind(&self) -> MutationKind {
        MutationKind::UpdateReply
    }

    fn target(&self) -> &RecordId {
        &self.review_id
    }

    fn prepare(
        &self,
        current: Option<&Review>,
        now: DateTime<Utc>,
    ) -> Result<OptimisticChange<Review>, AppError> {
        require_confirmed(&self.reply_id, "Reply")?;
        let content = normalize_content(&self.draft.content)?;
        let review = require(current, "Review", &self.review_id)?;
        let mut reply = attached_reply(review, &self.reply_id)?.clone();
        reply.content = content;
        reply.updated_at = now;

        let mut next = review.clone();
        next.reply = Some(reply);
        Ok(OptimisticChange::Update(next))
    }

    fn reconcile(&self, current: &Review, confirmed: ReviewReply) -> Option<Review> {
        attached_reply(current, &self.reply_id).ok()?;
        let mut next = current.clone();
        next.updated_at = confirmed.updated_at;
        next.reply = Some(confirmed);
        Some(next)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteReply {
    review_id: RecordId,
    reply_id: RecordId,
}

impl DeleteReply {
    pub fn new(review_id: RecordId, reply_id: RecordId) -> Self {
        Self {
            review_id,
            reply_id,
        }
    }

    pub fn reply_id(&self) -> &RecordId {
        &self.reply_id
    }
}

impl Mutation<Review> for DeleteReply {
    type Confirmed = ();

    fn kind(&self) -> MutationKind {
        MutationKind::DeleteReply
    }

    fn target(&self) -> &RecordId {
        &self.review_id
    }

    fn prepare(
        &self,
        current: Option<&Review>,
        _now: DateTime<Utc>,
    ) -> Result<OptimisticChange<Review>, AppError> {
        require_confirmed(&self.reply_id, "Reply")?;
        let review = require(current, "Review", &self.review_id)?;
        attached_reply(review, &self.reply_id)?;

        let mut next = review.clone();
        next.reply = None;
        next.has_reply = false;
        Ok(OptimisticChange::Update(next))
    }

    fn reconcile(&self, _current: &Review, _confirmed: ()) -> Option<Review> {
        None
    }
}

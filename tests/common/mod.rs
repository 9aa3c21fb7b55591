#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use educademy_lib::application::ports::{
    AnswerDraft, AnswerPatch, CouponDraft, CouponGateway, CouponPatch, PayoutGateway,
    ProcessPayoutRequest, QuestionGateway, RefundRequest, ReplyDraft, ResolveRequest,
    ReviewGateway, TransactionGateway,
};
use educademy_lib::domain::entities::{
    Answer, Coupon, DiscountType, ListPage, ListQuery, Payout, Question, Review, ReviewReply,
    Transaction,
};
use educademy_lib::domain::value_objects::{PayoutStatus, RecordId, TransactionStatus};
use educademy_lib::AppError;
use rust_decimal::Decimal;
use std::collections::VecDeque;
use tokio::sync::{oneshot, Mutex};

pub type Reply<T> = oneshot::Sender<Result<T, AppError>>;

/// テスト側が応答タイミングを制御するリモート呼び出し
pub struct Scripted<T> {
    queue: Mutex<VecDeque<oneshot::Receiver<Result<T, AppError>>>>,
}

impl<T> Default for Scripted<T> {
    fn default() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
        }
    }
}

impl<T> Scripted<T> {
    /// 次の呼び出しを保留させ、応答用の送信側を返す
    pub async fn hold(&self) -> Reply<T> {
        let (tx, rx) = oneshot::channel();
        self.queue.lock().await.push_back(rx);
        tx
    }

    /// 次の呼び出しに即座に応答する
    pub async fn respond(&self, result: Result<T, AppError>) {
        let tx = self.hold().await;
        let _ = tx.send(result);
    }

    pub async fn next(&self) -> Result<T, AppError> {
        let rx = self.queue.lock().await.pop_front();
        match rx {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(AppError::Network("request aborted".to_string()))),
            None => Err(AppError::Internal("unexpected remote call".to_string())),
        }
    }
}

/// 条件が満たされるまで他タスクに実行を譲る
pub async fn settle_until(mut check: impl FnMut() -> bool) {
    for _ in 0..200 {
        if check() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition was not reached");
}

pub fn remote_failure(message: &str) -> AppError {
    AppError::Remote(message.to_string())
}

pub fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
}

pub fn transaction(id: &str, amount: i64, refunded: i64, status: TransactionStatus) -> Transaction {
    Transaction {
        id: id.into(),
        amount: Decimal::from(amount),
        currency: "INR".to_string(),
        refund_amount: Decimal::from(refunded),
        status,
        refund_reason: None,
        refunded_at: None,
        created_at: at(1),
        updated_at: at(1),
    }
}

pub fn payout(id: &str, amount: i64, status: PayoutStatus) -> Payout {
    Payout {
        id: id.into(),
        instructor_id: "instructor-1".to_string(),
        amount: Decimal::from(amount),
        status,
        processed_at: None,
        gateway_id: None,
        created_at: at(1),
        updated_at: at(1),
    }
}

pub fn question(id: &str, answered: bool, total_answers: u32) -> Question {
    Question {
        id: id.into(),
        title: format!("Question {id}"),
        content: "How do lifetimes work?".to_string(),
        course_id: Some("course-1".to_string()),
        has_my_answer: answered,
        total_answers,
        is_resolved: false,
        my_answer: answered.then(|| answer(&format!("{id}-answer"), "Existing answer")),
        created_at: at(1),
        updated_at: at(1),
    }
}

pub fn answer(id: &str, content: &str) -> Answer {
    Answer {
        id: id.into(),
        content: content.to_string(),
        is_accepted: false,
        created_at: at(2),
        updated_at: at(2),
    }
}

pub fn review(id: &str, rating: u8, reply: Option<&str>) -> Review {
    Review {
        id: id.into(),
        course_id: Some("course-1".to_string()),
        rating,
        comment: Some("Clear explanations".to_string()),
        has_reply: reply.is_some(),
        reply: reply.map(|reply_id| review_reply(reply_id, "Thanks for the feedback")),
        created_at: at(1),
        updated_at: at(1),
    }
}

pub fn review_reply(id: &str, content: &str) -> ReviewReply {
    ReviewReply {
        id: id.into(),
        content: content.to_string(),
        created_at: at(2),
        updated_at: at(2),
    }
}

pub fn coupon(id: &str, code: &str, active: bool) -> Coupon {
    Coupon {
        id: id.into(),
        code: code.to_string(),
        discount_type: DiscountType::Percentage,
        discount_value: Decimal::from(15),
        is_active: active,
        usage_limit: Some(100),
        used_count: 0,
        expires_at: None,
        created_at: at(1),
        updated_at: at(1),
    }
}

pub fn confirmed(id: &RecordId) -> &str {
    id.as_confirmed().expect("confirmed id")
}

#[derive(Default)]
pub struct FakeTransactionGateway {
    pub listing: Scripted<ListPage<Transaction>>,
    pub refunds: Scripted<Transaction>,
    pub refund_requests: Mutex<Vec<(String, RefundRequest)>>,
}

#[async_trait]
impl TransactionGateway for FakeTransactionGateway {
    async fn list(&self, _query: &ListQuery) -> Result<ListPage<Transaction>, AppError> {
        self.listing.next().await
    }

    async fn refund(&self, id: &str, request: &RefundRequest) -> Result<Transaction, AppError> {
        self.refund_requests
            .lock()
            .await
            .push((id.to_string(), request.clone()));
        self.refunds.next().await
    }
}

#[derive(Default)]
pub struct FakePayoutGateway {
    pub listing: Scripted<ListPage<Payout>>,
    pub processed: Scripted<Payout>,
}

#[async_trait]
impl PayoutGateway for FakePayoutGateway {
    async fn list(&self, _query: &ListQuery) -> Result<ListPage<Payout>, AppError> {
        self.listing.next().await
    }

    async fn process(&self, _id: &str, _request: &ProcessPayoutRequest) -> Result<Payout, AppError> {
        self.processed.next().await
    }
}

#[derive(Default)]
pub struct FakeQuestionGateway {
    pub listing: Scripted<ListPage<Question>>,
    pub answers: Scripted<Answer>,
    pub answer_updates: Scripted<Answer>,
    pub answer_deletes: Scripted<()>,
    pub resolutions: Scripted<Question>,
    pub drafts: Mutex<Vec<(String, AnswerDraft)>>,
}

#[async_trait]
impl QuestionGateway for FakeQuestionGateway {
    async fn list(&self, _query: &ListQuery) -> Result<ListPage<Question>, AppError> {
        self.listing.next().await
    }

    async fn answer(&self, question_id: &str, draft: &AnswerDraft) -> Result<Answer, AppError> {
        self.drafts
            .lock()
            .await
            .push((question_id.to_string(), draft.clone()));
        self.answers.next().await
    }

    async fn update_answer(&self, _answer_id: &str, _patch: &AnswerPatch) -> Result<Answer, AppError> {
        self.answer_updates.next().await
    }

    async fn delete_answer(&self, _answer_id: &str) -> Result<(), AppError> {
        self.answer_deletes.next().await
    }

    async fn mark_resolved(
        &self,
        _question_id: &str,
        _request: &ResolveRequest,
    ) -> Result<Question, AppError> {
        self.resolutions.next().await
    }
}

#[derive(Default)]
pub struct FakeReviewGateway {
    pub listing: Scripted<ListPage<Review>>,
    pub replies: Scripted<ReviewReply>,
    pub reply_updates: Scripted<ReviewReply>,
    pub reply_deletes: Scripted<()>,
}

#[async_trait]
impl ReviewGateway for FakeReviewGateway {
    async fn list(&self, _query: &ListQuery) -> Result<ListPage<Review>, AppError> {
        self.listing.next().await
    }

    async fn reply(&self, _review_id: &str, _draft: &ReplyDraft) -> Result<ReviewReply, AppError> {
        self.replies.next().await
    }

    async fn update_reply(&self, _reply_id: &str, _draft: &ReplyDraft) -> Result<ReviewReply, AppError> {
        self.reply_updates.next().await
    }

    async fn delete_reply(&self, _reply_id: &str) -> Result<(), AppError> {
        self.reply_deletes.next().await
    }
}

#[derive(Default)]
pub struct FakeCouponGateway {
    pub listing: Scripted<ListPage<Coupon>>,
    pub created: Scripted<Coupon>,
    pub updated: Scripted<Coupon>,
    pub deleted: Scripted<()>,
    pub drafts: Mutex<Vec<CouponDraft>>,
    pub patches: Mutex<Vec<(String, CouponPatch)>>,
}

#[async_trait]
impl CouponGateway for FakeCouponGateway {
    async fn list(&self, _query: &ListQuery) -> Result<ListPage<Coupon>, AppError> {
        self.listing.next().await
    }

    async fn create(&self, draft: &CouponDraft) -> Result<Coupon, AppError> {
        self.drafts.lock().await.push(draft.clone());
        self.created.next().await
    }

    async fn update(&self, id: &str, patch: &CouponPatch) -> Result<Coupon, AppError> {
        self.patches
            .lock()
            .await
            .push((id.to_string(), patch.clone()));
        self.updated.next().await
    }

    async fn delete(&self, _id: &str) -> Result<(), AppError> {
        self.deleted.next().await
    }
}

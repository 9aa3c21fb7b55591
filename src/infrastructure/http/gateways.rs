//! REST API を各ゲートウェイポートに接続するアダプター

use super::client::ApiClient;
use crate::application::ports::{
    AnswerDraft, AnswerPatch, CouponDraft, CouponGateway, CouponPatch, PayoutGateway,
    ProcessPayoutRequest, QuestionGateway, RefundRequest, ReplyDraft, ResolveRequest,
    ReviewGateway, TransactionGateway,
};
use crate::domain::entities::{
    Answer, Coupon, ListPage, ListQuery, Payout, Question, Review, ReviewReply, Transaction,
};
use crate::shared::AppError;
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;

pub struct HttpTransactionGateway {
    client: Arc<ApiClient>,
}

impl HttpTransactionGateway {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TransactionGateway for HttpTransactionGateway {
    async fn list(&self, query: &ListQuery) -> Result<ListPage<Transaction>, AppError> {
        self.client.get_list(&["admin", "transactions"], query).await
    }

    async fn refund(&self, id: &str, request: &RefundRequest) -> Result<Transaction, AppError> {
        self.client
            .send_json(
                Method::POST,
                &["admin", "transactions", id, "refund"],
                Some(request),
                "transaction",
            )
            .await
    }
}

pub struct HttpPayoutGateway {
    client: Arc<ApiClient>,
}

impl HttpPayoutGateway {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PayoutGateway for HttpPayoutGateway {
    async fn list(&self, query: &ListQuery) -> Result<ListPage<Payout>, AppError> {
        self.client.get_list(&["admin", "payouts"], query).await
    }

    async fn process(&self, id: &str, request: &ProcessPayoutRequest) -> Result<Payout, AppError> {
        self.client
            .send_json(
                Method::POST,
                &["admin", "payouts", id, "process"],
                Some(request),
                "payout",
            )
            .await
    }
}

pub struct HttpQuestionGateway {
    client: Arc<ApiClient>,
}

impl HttpQuestionGateway {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QuestionGateway for HttpQuestionGateway {
    async fn list(&self, query: &ListQuery) -> Result<ListPage<Question>, AppError> {
        self.client
            .get_list(&["instructor", "community", "questions"], query)
            .await
    }

    async fn answer(&self, question_id: &str, draft: &AnswerDraft) -> Result<Answer, AppError> {
        self.client
            .send_json(
                Method::POST,
                &["instructor", "community", "questions", question_id, "answers"],
                Some(draft),
                "answer",
            )
            .await
    }

    async fn update_answer(
        &self,
        answer_id: &str,
        patch: &AnswerPatch,
    ) -> Result<Answer, AppError> {
        self.client
            .send_json(
                Method::PUT,
                &["instructor", "community", "answers", answer_id],
                Some(patch),
                "answer",
            )
            .await
    }

    async fn delete_answer(&self, answer_id: &str) -> Result<(), AppError> {
        self.client
            .delete(&["instructor", "community", "answers", answer_id])
            .await
    }

    async fn mark_resolved(
        &self,
        question_id: &str,
        request: &ResolveRequest,
    ) -> Result<Question, AppError> {
        self.client
            .send_json(
                Method::PATCH,
                &["instructor", "community", "questions", question_id, "resolve"],
                Some(request),
                "question",
            )
            .await
    }
}

pub struct HttpReviewGateway {
    client: Arc<ApiClient>,
}

impl HttpReviewGateway {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReviewGateway for HttpReviewGateway {
    async fn list(&self, query: &ListQuery) -> Result<ListPage<Review>, AppError> {
        self.client
            .get_list(&["instructor", "community", "reviews"], query)
            .await
    }

    async fn reply(&self, review_id: &str, draft: &ReplyDraft) -> Result<ReviewReply, AppError> {
        self.client
            .send_json(
                Method::POST,
                &["instructor", "community", "reviews", review_id, "reply"],
                Some(draft),
                "reply",
            )
            .await
    }

    async fn update_reply(
        &self,
        reply_id: &str,
        draft: &ReplyDraft,
    ) -> Result<ReviewReply, AppError> {
        self.client
            .send_json(
                Method::PUT,
                &["instructor", "community", "replies", reply_id],
                Some(draft),
                "reply",
            )
            .await
    }

    async fn delete_reply(&self, reply_id: &str) -> Result<(), AppError> {
        self.client
            .delete(&["instructor", "community", "replies", reply_id])
            .await
    }
}

pub struct HttpCouponGateway {
    client: Arc<ApiClient>,
}

impl HttpCouponGateway {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CouponGateway for HttpCouponGateway {
    async fn list(&self, query: &ListQuery) -> Result<ListPage<Coupon>, AppError> {
        self.client.get_list(&["instructor", "coupons"], query).await
    }

    async fn create(&self, draft: &CouponDraft) -> Result<Coupon, AppError> {
        self.client
            .send_json(Method::POST, &["instructor", "coupons"], Some(draft), "coupon")
            .await
    }

    async fn update(&self, id: &str, patch: &CouponPatch) -> Result<Coupon, AppError> {
        self.client
            .send_json(
                Method::PUT,
                &["instructor", "coupons", id],
                Some(patch),
                "coupon",
            )
            .await
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.client
            .delete(&["instructor", "coupons", id])
            .await
    }
}

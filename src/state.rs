use crate::application::services::{
    CouponStore, PayoutStore, QuestionStore, ReviewStore, TransactionStore,
};
use crate::infrastructure::http::{
    ApiClient, HttpCouponGateway, HttpPayoutGateway, HttpQuestionGateway, HttpReviewGateway,
    HttpTransactionGateway,
};
use crate::shared::{AppConfig, AppError};
use std::sync::Arc;

/// コレクションごとのストアをまとめた状態。ストア同士は状態を共有しない。
#[derive(Clone)]
pub struct AppState {
    pub transactions: Arc<TransactionStore>,
    pub payouts: Arc<PayoutStore>,
    pub questions: Arc<QuestionStore>,
    pub reviews: Arc<ReviewStore>,
    pub coupons: Arc<CouponStore>,
}

impl AppState {
    /// REST API に接続するストア一式を組み立てる
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        config.validate().map_err(AppError::ConfigurationError)?;
        let client = Arc::new(ApiClient::new(&config.api, &config.store)?);

        Ok(Self {
            transactions: Arc::new(TransactionStore::new(Arc::new(
                HttpTransactionGateway::new(Arc::clone(&client)),
            ))),
            payouts: Arc::new(PayoutStore::new(Arc::new(HttpPayoutGateway::new(
                Arc::clone(&client),
            )))),
            questions: Arc::new(QuestionStore::new(Arc::new(HttpQuestionGateway::new(
                Arc::clone(&client),
            )))),
            reviews: Arc::new(ReviewStore::new(Arc::new(HttpReviewGateway::new(
                Arc::clone(&client),
            )))),
            coupons: Arc::new(CouponStore::new(Arc::new(HttpCouponGateway::new(client)))),
        })
    }
}

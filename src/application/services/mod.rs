pub mod coupon_store;
pub mod payout_store;
pub mod question_store;
pub mod review_store;
pub mod transaction_store;

pub use coupon_store::CouponStore;
pub use payout_store::PayoutStore;
pub use question_store::QuestionStore;
pub use review_store::ReviewStore;
pub use transaction_store::TransactionStore;

pub mod coupon_gateway;
pub mod payout_gateway;
pub mod question_gateway;
pub mod review_gateway;
pub mod transaction_gateway;

pub use coupon_gateway::{CouponDraft, CouponGateway, CouponPatch};
pub use payout_gateway::{PayoutGateway, ProcessPayoutRequest};
pub use question_gateway::{AnswerDraft, AnswerPatch, QuestionGateway, ResolveRequest};
pub use review_gateway::{ReplyDraft, ReviewGateway};
pub use transaction_gateway::{RefundRequest, TransactionGateway};

pub mod coupon;
pub mod pagination;
pub mod payout;
pub mod question;
pub mod record;
pub mod review;
pub mod transaction;

pub use coupon::{Coupon, DiscountType};
pub use pagination::{ListPage, ListQuery, Pagination};
pub use payout::Payout;
pub use question::{Answer, Question};
pub use record::Record;
pub use review::{Review, ReviewReply};
pub use transaction::Transaction;

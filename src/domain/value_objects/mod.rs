pub mod operation_key;
pub mod payout_status;
pub mod record_id;
pub mod transaction_status;

pub use operation_key::OperationKey;
pub use payout_status::PayoutStatus;
pub use record_id::{LocalToken, RecordId};
pub use transaction_status::TransactionStatus;

pub mod collection_state;
pub mod ledger;
pub mod record_store;

pub use collection_state::{CollectionState, LedgerEntry};
pub use ledger::PendingLedger;
pub use record_store::{RecordSnapshot, RecordStore};

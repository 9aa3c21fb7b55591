pub mod client;
pub mod envelope;
pub mod gateways;

pub use client::ApiClient;
pub use envelope::{decode_empty, decode_envelope, decode_list, decode_resource, ApiEnvelope};
pub use gateways::{
    HttpCouponGateway, HttpPayoutGateway, HttpQuestionGateway, HttpReviewGateway,
    HttpTransactionGateway,
};

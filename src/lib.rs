//! Educademy クライアントのコレクション状態管理。
//!
//! 取引・支払い・Q&A・レビュー・クーポンの一覧をキャッシュし、楽観的な
//! 変更をリモート API の結果に応じて確定または取り消す。

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;
pub mod state;

pub use application::coordinator::{
    Mutation, MutationFailure, MutationKind, OptimisticChange, OptimisticCollection,
};
pub use application::services::{
    CouponStore, PayoutStore, QuestionStore, ReviewStore, TransactionStore,
};
pub use shared::config::LoggingConfig;
pub use shared::{AppConfig, AppError, Result};
pub use state::AppState;

/// tracing の購読者を登録する。`RUST_LOG` があれば設定値より優先する。
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let (json, plain) = if config.json {
        (Some(fmt::layer().json()), None)
    } else {
        (None, Some(fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(plain)
        .try_init()
        .map_err(|err| AppError::ConfigurationError(format!("Logging: {err}")))
}

use crate::domain::value_objects::RecordId;
use chrono::{DateTime, Utc};
use std::fmt;

/// コレクションに格納される識別可能なドメインレコード
pub trait Record: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    fn record_id(&self) -> &RecordId;

    /// 楽観的適用時に `updated_at` を現在時刻へ進める
    fn touch(&mut self, now: DateTime<Utc>);
}

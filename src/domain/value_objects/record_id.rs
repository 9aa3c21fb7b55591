use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const PENDING_PREFIX: &str = "temp_";

/// 楽観的作成時にクライアントが払い出す一時トークン
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalToken(Uuid);

impl LocalToken {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// `Display` 形式（`temp_` + 32 桁の16進）を読み戻す
    pub fn parse(value: &str) -> Option<Self> {
        value
            .strip_prefix(PENDING_PREFIX)
            .filter(|hex| hex.len() == 32)
            .and_then(|hex| Uuid::try_parse(hex).ok())
            .map(Self)
    }
}

impl Default for LocalToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LocalToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", PENDING_PREFIX, self.0.simple())
    }
}

/// レコード ID。サーバー確定済みか、確定待ちの一時 ID のどちらか。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordId {
    Confirmed(String),
    Pending(LocalToken),
}

impl RecordId {
    pub fn confirmed(value: impl Into<String>) -> Self {
        RecordId::Confirmed(value.into())
    }

    pub fn pending() -> (Self, LocalToken) {
        let token = LocalToken::new();
        (RecordId::Pending(token), token)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, RecordId::Pending(_))
    }

    /// サーバー確定済みの ID 文字列
    pub fn as_confirmed(&self) -> Option<&str> {
        match self {
            RecordId::Confirmed(value) => Some(value.as_str()),
            RecordId::Pending(_) => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Confirmed(value) => f.write_str(value),
            RecordId::Pending(token) => write!(f, "{token}"),
        }
    }
}

// 一時 ID の書式だけを Pending として読み戻し、それ以外は確定済みとみなす
impl From<String> for RecordId {
    fn from(value: String) -> Self {
        match LocalToken::parse(&value) {
            Some(token) => RecordId::Pending(token),
            None => RecordId::Confirmed(value),
        }
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::from(value.to_string())
    }
}

impl From<LocalToken> for RecordId {
    fn from(token: LocalToken) -> Self {
        RecordId::Pending(token)
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.to_string()
    }
}

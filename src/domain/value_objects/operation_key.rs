use crate::domain::value_objects::RecordId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 保留中ミューテーションの台帳キー
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationKey(String);

impl OperationKey {
    pub fn new(value: String) -> Result<Self, String> {
        Self::validate(&value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(value: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            return Err("Operation key cannot be empty".to_string());
        }
        Ok(())
    }
}

impl fmt::Display for OperationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&RecordId> for OperationKey {
    fn from(id: &RecordId) -> Self {
        Self(id.to_string())
    }
}

impl From<OperationKey> for String {
    fn from(value: OperationKey) -> Self {
        value.0
    }
}

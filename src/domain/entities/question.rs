use crate::domain::entities::Record;
use crate::domain::value_objects::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 受講者からの質問（講師コミュニティの Q&A）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: RecordId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default)]
    pub has_my_answer: bool,
    #[serde(default)]
    pub total_answers: u32,
    #[serde(default)]
    pub is_resolved: bool,
    #[serde(default)]
    pub my_answer: Option<Answer>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 講師自身の回答
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: RecordId,
    pub content: String,
    #[serde(default)]
    pub is_accepted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Question {
    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

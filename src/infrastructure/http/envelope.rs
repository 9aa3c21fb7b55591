//! `{ success, message, data }` 形式のレスポンス復号

use crate::domain::entities::{ListPage, Pagination};
use crate::shared::AppError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

/// 一覧レスポンスの `data`
#[derive(Debug, Clone, Deserialize)]
pub struct ListPayload<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
    /// サーバー集計。クライアントはレコードから再計算するため参照しない。
    #[serde(default)]
    pub stats: Option<Value>,
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn remote_error(status: u16, message: Option<String>) -> AppError {
    let message = message
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| format!("Request failed with status {status}"));
    AppError::Remote(message)
}

/// 成功判定を済ませて `data` を取り出す
fn open(status: u16, body: &str) -> Result<Option<Value>, AppError> {
    let envelope: ApiEnvelope<Value> = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(_) if !is_success(status) => return Err(remote_error(status, None)),
        Err(err) => return Err(err.into()),
    };
    if !envelope.success || !is_success(status) {
        return Err(remote_error(status, envelope.message));
    }
    Ok(envelope.data)
}

pub fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, AppError> {
    let data = open(status, body)?
        .ok_or_else(|| AppError::DeserializationError("Response has no data".to_string()))?;
    Ok(serde_json::from_value(data)?)
}

/// `data.<key>` に入った単一リソースを取り出す
pub fn decode_resource<T: DeserializeOwned>(
    status: u16,
    body: &str,
    key: &str,
) -> Result<T, AppError> {
    let mut data: serde_json::Map<String, Value> = decode_envelope(status, body)?;
    let value = data.remove(key).ok_or_else(|| {
        AppError::DeserializationError(format!("Response data has no `{key}` field"))
    })?;
    Ok(serde_json::from_value(value)?)
}

pub fn decode_list<T: DeserializeOwned>(status: u16, body: &str) -> Result<ListPage<T>, AppError> {
    let payload: ListPayload<T> = decode_envelope(status, body)?;
    Ok(match payload.pagination {
        Some(pagination) => ListPage::new(payload.items, pagination),
        None => ListPage::single(payload.items),
    })
}

/// 本文を使わない成功レスポンス（削除など）。204 の空ボディも成功とする。
pub fn decode_empty(status: u16, body: &str) -> Result<(), AppError> {
    if body.trim().is_empty() {
        return if is_success(status) {
            Ok(())
        } else {
            Err(remote_error(status, None))
        };
    }
    open(status, body).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Answer;

    #[test]
    fn test_decode_resource_reads_keyed_payload() {
        let body = r#"{
            "success": true,
            "message": "Answer posted",
            "data": { "answer": {
                "id": "a1", "content": "Use a clone", "isAccepted": false,
                "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-01T00:00:00Z"
            } }
        }"#;
        let answer: Answer = decode_resource(201, body, "answer").unwrap();
        assert_eq!(answer.id, "a1".into());

        let err = decode_resource::<Answer>(201, body, "reply").unwrap_err();
        assert!(matches!(err, AppError::DeserializationError(_)));
    }

    #[test]
    fn test_failure_envelope_becomes_remote_error() {
        let body = r#"{ "success": false, "message": "Refund amount exceeds balance" }"#;
        let err = decode_envelope::<Value>(400, body).unwrap_err();
        assert_eq!(err, AppError::Remote("Refund amount exceeds balance".to_string()));

        // 2xx でも success=false なら失敗
        let err = decode_empty(200, body).unwrap_err();
        assert_eq!(err.user_message(), "Refund amount exceeds balance");
    }

    #[test]
    fn test_non_json_error_body_uses_status() {
        let err = decode_empty(502, "<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(err, AppError::Remote("Request failed with status 502".to_string()));
        assert_eq!(decode_empty(204, ""), Ok(()));
    }

    #[test]
    fn test_decode_list_defaults_pagination() {
        let body = r#"{ "success": true, "message": "", "data": {
            "items": [], "stats": { "totalQuestions": 0 }
        } }"#;
        let page: ListPage<Answer> = decode_list(200, body).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total, 0);
    }
}

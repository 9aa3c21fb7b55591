use super::envelope::{decode_empty, decode_list, decode_resource};
use crate::domain::entities::{ListPage, ListQuery};
use crate::shared::config::{ApiConfig, StoreConfig};
use crate::shared::AppError;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Educademy REST API の薄いクライアント
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    auth_token: Option<String>,
    default_page_size: u32,
    max_page_size: u32,
}

impl ApiClient {
    pub fn new(api: &ApiConfig, store: &StoreConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()
            .map_err(|err| AppError::ConfigurationError(format!("HTTP client: {err}")))?;
        let base_url = Url::parse(api.base_url.trim_end_matches('/'))
            .map_err(|err| AppError::ConfigurationError(format!("API base URL: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::ConfigurationError(format!(
                "API base URL cannot carry a path: {base_url}"
            )));
        }
        Ok(Self {
            http,
            base_url,
            auth_token: api.auth_token.clone(),
            default_page_size: store.default_page_size,
            max_page_size: store.max_page_size,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// ベース URL にパスセグメントを連結する。各セグメントはエスケープされる。
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base は new で弾いている
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// 件数未指定なら既定値、上限超過なら上限に揃える
    pub fn effective_query(&self, query: &ListQuery) -> ListQuery {
        let mut query = query.clone();
        let limit = query.limit.unwrap_or(self.default_page_size);
        query.limit = Some(limit.clamp(1, self.max_page_size));
        query.page = Some(query.page.unwrap_or(1).max(1));
        query
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let builder = self.http.request(method, self.url(segments));
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<(u16, String), AppError> {
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok((status, body))
    }

    pub async fn get_list<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &ListQuery,
    ) -> Result<ListPage<T>, AppError> {
        let query = self.effective_query(query);
        debug!(path = ?segments, page = ?query.page, limit = ?query.limit, "fetching list");
        let (status, body) = self
            .send(self.request(Method::GET, segments).query(&query.to_pairs()))
            .await?;
        decode_list(status, &body)
    }

    /// JSON ボディ付きで送信し、`data.<key>` のリソースを返す
    pub async fn send_json<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
        key: &str,
    ) -> Result<T, AppError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        debug!(method = %method, path = ?segments, "sending mutation");
        let mut builder = self.request(method, segments);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let (status, body) = self.send(builder).await?;
        decode_resource(status, &body, key)
    }

    pub async fn delete(&self, segments: &[&str]) -> Result<(), AppError> {
        debug!(path = ?segments, "sending delete");
        let (status, body) = self.send(self.request(Method::DELETE, segments)).await?;
        decode_empty(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::AppConfig;

    fn client() -> ApiClient {
        let mut config = AppConfig::default();
        config.api.base_url = "https://api.example.com/api/".to_string();
        ApiClient::new(&config.api, &config.store).unwrap()
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = client();
        assert_eq!(client.base_url(), "https://api.example.com/api");
        assert_eq!(
            client.url(&["admin", "transactions"]).as_str(),
            "https://api.example.com/api/admin/transactions"
        );
    }

    #[test]
    fn test_url_escapes_ids_inside_segments() {
        let client = client();
        assert_eq!(
            client.url(&["admin", "transactions", "t/1?x#y", "refund"]).as_str(),
            "https://api.example.com/api/admin/transactions/t%2F1%3Fx%23y/refund"
        );
    }

    #[test]
    fn test_url_on_host_root() {
        let mut config = AppConfig::default();
        config.api.base_url = "https://api.example.com/".to_string();
        let client = ApiClient::new(&config.api, &config.store).unwrap();
        assert_eq!(
            client.url(&["instructor", "coupons", "c 1"]).as_str(),
            "https://api.example.com/instructor/coupons/c%201"
        );
    }

    #[test]
    fn test_effective_query_applies_page_size_bounds() {
        let client = client();
        let defaulted = client.effective_query(&ListQuery::default());
        assert_eq!(defaulted.page, Some(1));
        assert_eq!(defaulted.limit, Some(20));

        let clamped = client.effective_query(&ListQuery::page(0, 500));
        assert_eq!(clamped.page, Some(1));
        assert_eq!(clamped.limit, Some(100));
    }
}

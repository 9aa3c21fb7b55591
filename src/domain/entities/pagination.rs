use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            total: 0,
            total_pages: 0,
        }
    }
}

/// 一覧取得のクエリ（ページ番号・件数・フィルター）
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub filters: BTreeMap<String, String>,
}

impl ListQuery {
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            filters: BTreeMap::new(),
        }
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// クエリ文字列用のペア
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.filters.len() + 2);
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        for (key, value) in &self.filters {
            pairs.push((key.clone(), value.clone()));
        }
        pairs
    }
}

/// 一覧取得の結果
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<R> {
    pub items: Vec<R>,
    pub pagination: Pagination,
}

impl<R> ListPage<R> {
    pub fn new(items: Vec<R>, pagination: Pagination) -> Self {
        Self { items, pagination }
    }

    /// 単一ページとして扱う
    pub fn single(items: Vec<R>) -> Self {
        let total = items.len() as u64;
        let limit = (items.len() as u32).max(1);
        Self {
            items,
            pagination: Pagination {
                page: 1,
                limit,
                total,
                total_pages: if total == 0 { 0 } else { 1 },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_are_ordered() {
        let query = ListQuery::page(2, 10)
            .with_filter("status", "COMPLETED")
            .with_filter("courseId", "c1");
        assert_eq!(
            query.to_pairs(),
            vec![
                ("page".to_string(), "2".to_string()),
                ("limit".to_string(), "10".to_string()),
                ("courseId".to_string(), "c1".to_string()),
                ("status".to_string(), "COMPLETED".to_string()),
            ]
        );
    }

    #[test]
    fn test_pagination_deserializes_camel_case() {
        let pagination: Pagination =
            serde_json::from_str(r#"{"page":1,"limit":20,"total":41,"totalPages":3}"#).unwrap();
        assert_eq!(pagination.total_pages, 3);
    }
}

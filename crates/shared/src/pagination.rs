//! Offset pagination utilities.

use serde::{Deserialize, Serialize};

/// Default page size when the caller does not specify one.
pub const DEFAULT_LIMIT: i64 = 50;

/// Upper bound on page size to keep list queries cheap.
pub const MAX_LIMIT: i64 = 200;

/// Limit/offset parameters parsed from a list query string.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

impl PageParams {
    /// Effective limit, clamped to `[1, MAX_LIMIT]`.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Effective offset, never negative.
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            limit: None,
            offset: None,
        }
    }
}

/// Pagination metadata returned alongside list payloads.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

impl PageMeta {
    /// Builds metadata for a page of `total` matching rows.
    pub fn new(total: i64, limit: i64, offset: i64) -> Self {
        Self {
            total,
            limit,
            offset,
            has_more: offset + limit < total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_defaults() {
        let params = PageParams::default();
        assert_eq!(params.limit(), DEFAULT_LIMIT);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_limit_clamped_to_max() {
        let params = PageParams {
            limit: Some(10_000),
            offset: None,
        };
        assert_eq!(params.limit(), MAX_LIMIT);
    }

    #[test]
    fn test_limit_clamped_to_min() {
        let params = PageParams {
            limit: Some(0),
            offset: None,
        };
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn test_negative_offset_clamped() {
        let params = PageParams {
            limit: None,
            offset: Some(-5),
        };
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_page_meta_has_more() {
        let meta = PageMeta::new(100, 50, 0);
        assert!(meta.has_more);
        assert_eq!(meta.total, 100);
    }

    #[test]
    fn test_page_meta_last_page() {
        let meta = PageMeta::new(100, 50, 50);
        assert!(!meta.has_more);
    }

    #[test]
    fn test_page_meta_empty() {
        let meta = PageMeta::new(0, 50, 0);
        assert!(!meta.has_more);
    }

    #[test]
    fn test_page_meta_serializes_camel_case() {
        let meta = PageMeta::new(10, 5, 0);
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("\"hasMore\":true"));
        assert!(json.contains("\"total\":10"));
    }

    #[test]
    fn test_page_params_deserialize_from_query_shape() {
        let params: PageParams = serde_json::from_str(r#"{"limit": 25, "offset": 75}"#).unwrap();
        assert_eq!(params.limit(), 25);
        assert_eq!(params.offset(), 75);
    }
}

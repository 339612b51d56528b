//! Page/limit query parsing and pagination metadata.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_LIMIT: u64 = 20;
const MAX_LIMIT: u64 = 100;

fn default_page() -> u64 {
    DEFAULT_PAGE
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

/// Query parameters for paginated list endpoints.
///
/// Out-of-range values are normalized rather than rejected: `page` is
/// floored at 1 and `limit` is clamped to 1..=100.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page (max 100)
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageQuery {
    /// Normalized page number (at least 1).
    pub fn page(&self) -> u64 {
        self.page.max(1)
    }

    /// Normalized page size, clamped to 1..=100.
    pub fn limit(&self) -> u64 {
        self.limit.clamp(1, MAX_LIMIT)
    }

    /// Number of items to skip for this page. Saturates instead of
    /// overflowing on absurd page numbers.
    pub fn skip(&self) -> u64 {
        (self.page() - 1).saturating_mul(self.limit())
    }
}

/// Pagination metadata returned alongside list results.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// Builds pagination metadata from a normalized query and total count.
    pub fn build(query: &PageQuery, total: u64) -> Self {
        let page = query.page();
        let limit = query.limit();
        let total_pages = total.div_ceil(limit);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query = PageQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 20);
        assert_eq!(query.skip(), 0);
    }

    #[test]
    fn test_limit_clamped_to_max() {
        let query = PageQuery {
            page: 1,
            limit: 500,
        };
        assert_eq!(query.limit(), 100);
    }

    #[test]
    fn test_zero_values_normalized() {
        let query = PageQuery { page: 0, limit: 0 };
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 1);
        assert_eq!(query.skip(), 0);
    }

    #[test]
    fn test_skip_advances_with_page() {
        let query = PageQuery { page: 3, limit: 20 };
        assert_eq!(query.skip(), 40);
    }

    #[test]
    fn test_skip_saturates_on_huge_page() {
        let query = PageQuery {
            page: u64::MAX,
            limit: 100,
        };
        assert_eq!(query.skip(), u64::MAX);
    }

    #[test]
    fn test_pagination_metadata() {
        let query = PageQuery { page: 2, limit: 10 };
        let pagination = Pagination::build(&query, 35);

        assert_eq!(pagination.total_pages, 4);
        assert!(pagination.has_next);
        assert!(pagination.has_prev);
    }

    #[test]
    fn test_pagination_last_page() {
        let query = PageQuery { page: 4, limit: 10 };
        let pagination = Pagination::build(&query, 35);

        assert!(!pagination.has_next);
        assert!(pagination.has_prev);
    }

    #[test]
    fn test_pagination_empty_results() {
        let query = PageQuery::default();
        let pagination = Pagination::build(&query, 0);

        assert_eq!(pagination.total_pages, 0);
        assert!(!pagination.has_next);
        assert!(!pagination.has_prev);
    }
}

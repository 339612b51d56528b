use axum_helpers::Pagination;
use std::sync::Arc;
use uuid::Uuid;

use crate::cache::{SearchCache, DEFAULT_TTL};
use crate::error::{SearchError, SearchResult};
use crate::executor::SearchExecutor;
use crate::models::{BaseFilter, SearchCacheKey, SearchParams, SearchResponse};
use crate::query::QueryBuilder;
use crate::repository::SearchRepository;

/// Orchestrates a search request: cache lookup, plan construction,
/// execution, response assembly, cache fill.
pub struct SearchService<R: SearchRepository> {
    builder: QueryBuilder<R>,
    executor: SearchExecutor<R>,
    cache: SearchCache,
}

impl<R: SearchRepository> SearchService<R> {
    /// `supports_text_search` is resolved once at startup via
    /// [`SearchRepository::has_text_index`].
    pub fn new(repository: Arc<R>, cache: SearchCache, supports_text_search: bool) -> Self {
        Self {
            builder: QueryBuilder::new(repository.clone(), supports_text_search),
            executor: SearchExecutor::new(repository),
            cache,
        }
    }

    pub async fn search(&self, params: SearchParams) -> SearchResult<SearchResponse> {
        let term = params.q.as_deref().unwrap_or("").trim().to_string();
        if term.is_empty() {
            return Err(SearchError::Validation(
                "Search query cannot be empty".to_string(),
            ));
        }

        let page_query = params.page_query();
        let base = BaseFilter {
            // Malformed ids are ignored rather than rejected.
            category_id: params.category.as_deref().and_then(|v| Uuid::parse_str(v).ok()),
            brand_id: params.brand.as_deref().and_then(|v| Uuid::parse_str(v).ok()),
            min_price: params.min_price,
            max_price: params.max_price,
        };

        let key = SearchCacheKey {
            term: &term,
            page: page_query.page(),
            limit: page_query.limit(),
            category: base.category_id,
            brand: base.brand_id,
            min_price: base.min_price,
            max_price: base.max_price,
            sort: params.sort,
        }
        .key();

        if let Some(payload) = self.cache.get(&key).await {
            match serde_json::from_str::<SearchResponse>(&payload) {
                Ok(mut response) => {
                    response.cached = true;
                    return Ok(response);
                }
                Err(e) => {
                    tracing::warn!(key, error = %e, "Discarding undecodable cache payload");
                    self.cache.delete(&key).await;
                }
            }
        }

        let plan = self.builder.build(&term, base, params.sort).await?;
        let page = self
            .executor
            .execute(&plan, page_query.skip(), page_query.limit())
            .await?;

        let response = SearchResponse {
            success: true,
            cached: false,
            products: page.items,
            query: term,
            pagination: Pagination::build(&page_query, page.total),
        };

        match serde_json::to_string(&response) {
            Ok(payload) => self.cache.set(&key, &payload, DEFAULT_TTL).await,
            Err(e) => tracing::warn!(key, error = %e, "Failed to serialize search payload"),
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{IndexedProduct, InMemorySearchRepository};

    async fn seeded_repo() -> Arc<InMemorySearchRepository> {
        let repo = Arc::new(InMemorySearchRepository::new());
        repo.add_product(IndexedProduct::new(
            "Wireless keyboard",
            "Low profile keys",
            79.0,
        ))
        .await;
        repo.add_product(IndexedProduct::new("Wired keyboard", "Full size", 29.0))
            .await;
        repo
    }

    fn params(q: &str) -> SearchParams {
        SearchParams {
            q: Some(q.to_string()),
            ..SearchParams::default()
        }
    }

    fn service(repo: Arc<InMemorySearchRepository>) -> SearchService<InMemorySearchRepository> {
        SearchService::new(repo, SearchCache::default(), true)
    }

    #[tokio::test]
    async fn test_blank_query_rejected() {
        let service = service(seeded_repo().await);
        for q in ["", "   "] {
            let result = service.search(params(q)).await;
            assert!(matches!(result, Err(SearchError::Validation(_))));
        }

        let result = service.search(SearchParams::default()).await;
        assert!(matches!(result, Err(SearchError::Validation(_))));
    }

    #[tokio::test]
    async fn test_search_returns_matching_products() {
        let service = service(seeded_repo().await);
        let response = service.search(params("keyboard")).await.unwrap();

        assert!(response.success);
        assert!(!response.cached);
        assert_eq!(response.products.len(), 2);
        assert_eq!(response.query, "keyboard");
        assert_eq!(response.pagination.total, 2);
    }

    #[tokio::test]
    async fn test_repeat_search_served_from_cache() {
        let service = service(seeded_repo().await);

        let first = service.search(params("keyboard")).await.unwrap();
        assert!(!first.cached);

        let second = service.search(params("keyboard")).await.unwrap();
        assert!(second.cached);
        assert_eq!(second.products, first.products);
        assert_eq!(second.pagination.total, first.pagination.total);
    }

    #[tokio::test]
    async fn test_different_pages_do_not_share_cache() {
        let service = service(seeded_repo().await);

        service.search(params("keyboard")).await.unwrap();

        let mut page_two = params("keyboard");
        page_two.page = Some(2);
        let response = service.search(page_two).await.unwrap();

        assert!(!response.cached);
        assert!(response.products.is_empty());
        assert_eq!(response.pagination.total, 2);
    }

    #[tokio::test]
    async fn test_malformed_reference_ids_ignored() {
        let service = service(seeded_repo().await);

        let mut query = params("keyboard");
        query.category = Some("not-a-uuid".to_string());
        query.brand = Some("also-bad".to_string());

        let response = service.search(query).await.unwrap();
        assert_eq!(response.products.len(), 2);
    }

    #[tokio::test]
    async fn test_price_filter_applies() {
        let service = service(seeded_repo().await);

        let mut query = params("keyboard");
        query.min_price = Some(50.0);

        let response = service.search(query).await.unwrap();
        assert_eq!(response.products.len(), 1);
        assert_eq!(response.products[0].title, "Wireless keyboard");
    }

    #[tokio::test]
    async fn test_refused_full_text_still_answers() {
        let repo = seeded_repo().await;
        repo.refuse_full_text(true);
        let service = service(repo);

        let response = service.search(params("keyboard")).await.unwrap();
        assert_eq!(response.products.len(), 2);
    }
}

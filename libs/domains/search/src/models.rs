use axum_helpers::{PageQuery, Pagination};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use strum::Display;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Explicit sort requested by the client, overriding the computed sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SortOrder {
    Newest,
    PriceAsc,
    PriceDesc,
    Rating,
}

/// Query parameters for the search endpoint
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Search term (required, non-blank)
    pub q: Option<String>,
    /// Category id filter; non-UUID values are ignored
    pub category: Option<String>,
    /// Brand id filter; non-UUID values are ignored
    pub brand: Option<String>,
    #[serde(rename = "minPrice")]
    pub min_price: Option<f64>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<f64>,
    pub sort: Option<SortOrder>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl SearchParams {
    pub fn page_query(&self) -> PageQuery {
        let defaults = PageQuery::default();
        PageQuery {
            page: self.page.unwrap_or(defaults.page),
            limit: self.limit.unwrap_or(defaults.limit),
        }
    }
}

/// Filters applied to every search regardless of strategy. Only visible
/// products (approved, active, available) are ever searched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseFilter {
    pub category_id: Option<Uuid>,
    pub brand_id: Option<Uuid>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

/// All inputs that make two search requests logically identical.
///
/// Field order is fixed so the serialized form, and therefore the derived
/// cache key, is canonical.
#[derive(Debug, Serialize)]
pub struct SearchCacheKey<'a> {
    pub term: &'a str,
    pub page: u64,
    pub limit: u64,
    pub category: Option<Uuid>,
    pub brand: Option<Uuid>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: Option<SortOrder>,
}

impl SearchCacheKey<'_> {
    /// Hash the canonical form so equal logical requests share a key.
    pub fn key(&self) -> String {
        let canonical = serde_json::to_string(self).unwrap_or_default();
        let digest = Sha256::digest(canonical.as_bytes());
        format!("search:{}", hex::encode(digest))
    }
}

/// A product as returned by search, joined with its category, brand and
/// seller verification flag
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductHit {
    pub id: Uuid,
    pub title: String,
    pub price: f64,
    pub discounted_price: Option<f64>,
    pub images: Vec<String>,
    pub ratings_average: f64,
    pub ratings_quantity: i32,
    pub created_at: DateTime<Utc>,
    pub category_name: Option<String>,
    pub brand_name: Option<String>,
    pub seller_verified: bool,
}

/// One page of search results plus the total match count
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub total: u64,
    pub items: Vec<ProductHit>,
}

/// Body of a search response. Cached payloads are replayed with
/// `cached: true`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub success: bool,
    pub cached: bool,
    pub products: Vec<ProductHit>,
    pub query: String,
    pub pagination: Pagination,
}

impl PartialEq for ProductHit {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key<'a>(term: &'a str, page: u64) -> SearchCacheKey<'a> {
        SearchCacheKey {
            term,
            page,
            limit: 20,
            category: None,
            brand: None,
            min_price: None,
            max_price: None,
            sort: None,
        }
    }

    #[test]
    fn test_equal_requests_share_a_key() {
        assert_eq!(key("laptop", 1).key(), key("laptop", 1).key());
    }

    #[test]
    fn test_key_varies_with_inputs() {
        assert_ne!(key("laptop", 1).key(), key("laptop", 2).key());
        assert_ne!(key("laptop", 1).key(), key("phone", 1).key());

        let mut sorted = key("laptop", 1);
        sorted.sort = Some(SortOrder::PriceAsc);
        assert_ne!(key("laptop", 1).key(), sorted.key());
    }

    #[test]
    fn test_key_is_prefixed_and_hex() {
        let key = key("laptop", 1).key();
        assert!(key.starts_with("search:"));
        assert_eq!(key.len(), "search:".len() + 64);
    }

    #[test]
    fn test_sort_order_wire_names() {
        assert_eq!(SortOrder::PriceAsc.to_string(), "priceAsc");
        assert_eq!(
            serde_json::from_str::<SortOrder>("\"priceDesc\"").unwrap(),
            SortOrder::PriceDesc
        );
    }
}

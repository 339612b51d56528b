//! Handler tests for the search endpoint
//!
//! These tests verify that the HTTP surface works correctly:
//! - Query string deserialization (camelCase params, optional fields)
//! - Response serialization (SearchResponse JSON shape)
//! - HTTP status codes
//! - Error responses
//!
//! Unlike E2E tests, these test ONLY the search handler over the in-memory
//! repository, not the full application with routing, auth middleware, etc.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_search::{
    search_router, IndexedProduct, InMemorySearchRepository, SearchCache, SearchResponse,
    SearchService,
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn seeded_app() -> axum::Router {
    let repo = InMemorySearchRepository::new();
    repo.add_product(IndexedProduct::new(
        "Leather Wallet",
        "Hand stitched leather wallet",
        49.0,
    ))
    .await;
    repo.add_product(IndexedProduct::new(
        "Canvas Backpack",
        "Water resistant backpack",
        89.0,
    ))
    .await;

    let service = SearchService::new(Arc::new(repo), SearchCache::new(None), true);
    search_router(service)
}

#[tokio::test]
async fn test_search_returns_200_with_matches() {
    let app = seeded_app().await;

    let request = Request::builder()
        .method("GET")
        .uri("/?q=wallet")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body: SearchResponse = json_body(response.into_body()).await;
    assert!(body.success);
    assert!(!body.cached);
    assert_eq!(body.query, "wallet");
    assert_eq!(body.products.len(), 1);
    assert_eq!(body.products[0].title, "Leather Wallet");
    assert_eq!(body.pagination.total, 1);
}

#[tokio::test]
async fn test_search_missing_q_returns_400() {
    let app = seeded_app().await;

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_blank_q_returns_400() {
    let app = seeded_app().await;

    let request = Request::builder()
        .method("GET")
        .uri("/?q=%20%20")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_repeat_search_is_served_from_cache() {
    let app = seeded_app().await;

    let request = Request::builder()
        .method("GET")
        .uri("/?q=backpack")
        .body(Body::empty())
        .unwrap();
    let first: SearchResponse = json_body(
        app.clone()
            .oneshot(request)
            .await
            .unwrap()
            .into_body(),
    )
    .await;
    assert!(!first.cached);

    let request = Request::builder()
        .method("GET")
        .uri("/?q=backpack")
        .body(Body::empty())
        .unwrap();
    let second: SearchResponse = json_body(app.oneshot(request).await.unwrap().into_body()).await;

    assert!(second.cached);
    assert_eq!(second.products, first.products);
}

#[tokio::test]
async fn test_camel_case_price_filters_and_sort() {
    let app = seeded_app().await;

    // Both products mention "water" or "wallet"; constrain by price instead.
    let request = Request::builder()
        .method("GET")
        .uri("/?q=a&minPrice=40&maxPrice=60&sort=priceAsc")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body: SearchResponse = json_body(response.into_body()).await;
    assert!(body.products.iter().all(|p| (40.0..=60.0).contains(&p.price)));
}

#[tokio::test]
async fn test_non_numeric_price_returns_400() {
    let app = seeded_app().await;

    let request = Request::builder()
        .method("GET")
        .uri("/?q=wallet&minPrice=cheap")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pagination_metadata_is_consistent() {
    let repo = InMemorySearchRepository::new();
    for i in 0..5 {
        repo.add_product(IndexedProduct::new(
            &format!("Gadget {}", i),
            "A useful gadget",
            10.0 + i as f64,
        ))
        .await;
    }
    let service = SearchService::new(Arc::new(repo), SearchCache::new(None), true);
    let app = search_router(service);

    let request = Request::builder()
        .method("GET")
        .uri("/?q=gadget&page=2&limit=2")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body: SearchResponse = json_body(response.into_body()).await;
    assert_eq!(body.pagination.total, 5);
    assert_eq!(body.pagination.page, 2);
    assert_eq!(body.pagination.total_pages, 3);
    assert!(body.pagination.has_next);
    assert!(body.pagination.has_prev);
    assert_eq!(body.products.len(), 2);
}

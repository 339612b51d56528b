//! Postgres-backed search tests. Each test runs against a disposable
//! container with the workspace migrations applied.

use std::sync::Arc;

use domain_catalog::repository::ProductRepository;
use domain_catalog::{CreateProduct, PgProductRepository};
use domain_search::{
    PgSearchRepository, SearchCache, SearchParams, SearchRepository, SearchService, SortOrder,
};
use sea_orm::ConnectionTrait;
use test_utils::{TestDataBuilder, TestDatabase};
use uuid::Uuid;

async fn seed_product(
    products: &PgProductRepository,
    seller_id: Uuid,
    title: &str,
    description: &str,
    price: f64,
    brand_id: Option<Uuid>,
) -> Uuid {
    let product = products
        .create(
            CreateProduct {
                title: title.to_string(),
                description: description.to_string(),
                price,
                discounted_price: None,
                images: vec![],
                category_id: None,
                brand_id,
            },
            seller_id,
        )
        .await
        .unwrap();
    products.set_approved(product.id, true).await.unwrap();
    product.id
}

#[tokio::test]
async fn test_full_text_search_against_real_index() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("full_text_search");
    let seller = db.create_test_user(builder.user_id(), true).await;

    let products = PgProductRepository::new(db.connection());
    seed_product(
        &products,
        seller,
        "Wireless mechanical keyboard",
        "Hot swappable switches",
        120.0,
        None,
    )
    .await;
    seed_product(&products, seller, "Desk mat", "Extra large", 20.0, None).await;

    let repo = Arc::new(PgSearchRepository::new(db.connection()));
    assert!(repo.has_text_index().await);

    let service = SearchService::new(repo, SearchCache::default(), true);
    let response = service
        .search(SearchParams {
            q: Some("keyboard".to_string()),
            ..SearchParams::default()
        })
        .await
        .unwrap();

    assert_eq!(response.products.len(), 1);
    assert_eq!(response.products[0].title, "Wireless mechanical keyboard");
    assert!(response.products[0].seller_verified);
}

#[tokio::test]
async fn test_pattern_search_widens_to_brand_names() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("pattern_brand_search");
    let seller = db.create_test_user(builder.user_id(), false).await;

    let brand_id = Uuid::now_v7();
    db.connection()
        .execute_unprepared(&format!(
            "INSERT INTO brands (id, name, status) VALUES ('{}', 'Acme', 'active')",
            brand_id
        ))
        .await
        .unwrap();

    let products = PgProductRepository::new(db.connection());
    seed_product(
        &products,
        seller,
        "Steel flask",
        "Vacuum insulated",
        35.0,
        Some(brand_id),
    )
    .await;

    // Force the pattern path, the only one that widens to brand names.
    let repo = Arc::new(PgSearchRepository::new(db.connection()));
    let service = SearchService::new(repo, SearchCache::default(), false);

    let response = service
        .search(SearchParams {
            q: Some("acme".to_string()),
            ..SearchParams::default()
        })
        .await
        .unwrap();

    assert_eq!(response.products.len(), 1);
    assert_eq!(response.products[0].title, "Steel flask");
    assert_eq!(response.products[0].brand_name.as_deref(), Some("Acme"));
}

#[tokio::test]
async fn test_rtl_term_and_sort_override() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("rtl_sort_search");
    let seller = db.create_test_user(builder.user_id(), false).await;

    let products = PgProductRepository::new(db.connection());
    seed_product(&products, seller, "شنطة جلد", "شنطة يد نسائية", 80.0, None).await;
    seed_product(&products, seller, "شنطة سفر", "شنطة كبيرة", 50.0, None).await;

    // RTL terms go through the pattern path even with the index present.
    let repo = Arc::new(PgSearchRepository::new(db.connection()));
    let service = SearchService::new(repo, SearchCache::default(), true);

    let response = service
        .search(SearchParams {
            q: Some("شنطة".to_string()),
            sort: Some(SortOrder::PriceAsc),
            ..SearchParams::default()
        })
        .await
        .unwrap();

    let prices: Vec<f64> = response.products.iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![50.0, 80.0]);
}

#[tokio::test]
async fn test_unapproved_products_invisible_to_search() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("visibility_search");
    let seller = db.create_test_user(builder.user_id(), false).await;

    let products = PgProductRepository::new(db.connection());
    // Created but never approved.
    products
        .create(
            CreateProduct {
                title: "Unreviewed keyboard".to_string(),
                description: "Pending approval".to_string(),
                price: 60.0,
                discounted_price: None,
                images: vec![],
                category_id: None,
                brand_id: None,
            },
            seller,
        )
        .await
        .unwrap();

    let repo = Arc::new(PgSearchRepository::new(db.connection()));
    let service = SearchService::new(repo, SearchCache::default(), true);

    let response = service
        .search(SearchParams {
            q: Some("keyboard".to_string()),
            ..SearchParams::default()
        })
        .await
        .unwrap();

    assert!(response.products.is_empty());
    assert_eq!(response.pagination.total, 0);
}

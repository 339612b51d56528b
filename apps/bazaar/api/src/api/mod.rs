use axum::Router;
use std::sync::Arc;

use domain_catalog::{
    handlers as catalog_handlers, BrandService, CategoryService, PgBrandRepository,
    PgCategoryRepository, PgProductRepository, ProductService,
};
use domain_complaints::{complaints_router, ComplaintService, PgComplaintRepository};
use domain_notifications::{
    handlers as notification_handlers, NotificationService, NotificationSink,
    PgNotificationRepository,
};
use domain_orders::{orders_router, OrderService, PgOrderRepository};
use domain_search::{
    search_router, PgSearchRepository, RedisBackend, SearchCache, SearchService,
};

pub mod health;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix is added by the `create_router` helper.
///
/// Each domain router holds its own Arc-wrapped service; only connection
/// clones flow in here.
pub fn routes(state: &crate::state::AppState) -> Router {
    let verifier = state.verifier.clone();

    // One notification service backs both the REST routes and the sink the
    // order/complaint flows publish through.
    let notifications = NotificationService::new(PgNotificationRepository::new(state.db.clone()));
    let sink: Arc<dyn NotificationSink> = Arc::new(notifications.clone());

    let products = ProductService::new(PgProductRepository::new(state.db.clone()));
    let brands = BrandService::new(PgBrandRepository::new(state.db.clone()));
    let categories = CategoryService::new(PgCategoryRepository::new(state.db.clone()));

    let orders = OrderService::new(
        PgOrderRepository::new(state.db.clone()),
        Arc::new(PgProductRepository::new(state.db.clone())),
        sink.clone(),
    );

    let complaints = ComplaintService::new(PgComplaintRepository::new(state.db.clone()), sink);

    let search_repository = Arc::new(PgSearchRepository::new(state.db.clone()));
    let search_cache = SearchCache::new(
        state
            .redis
            .clone()
            .map(|conn| Arc::new(RedisBackend::new(conn)) as _),
    );
    let search = SearchService::new(search_repository, search_cache, state.supports_text_search);

    Router::new()
        .nest(
            "/products",
            catalog_handlers::products_router(products, verifier.clone()),
        )
        .nest(
            "/brands",
            catalog_handlers::brands_router(brands, verifier.clone()),
        )
        .nest(
            "/categories",
            catalog_handlers::categories_router(categories, verifier.clone()),
        )
        .nest("/orders", orders_router(orders, verifier.clone()))
        .nest(
            "/notifications",
            notification_handlers::router(notifications, verifier.clone()),
        )
        .nest("/complaints", complaints_router(complaints, verifier))
        .nest("/search", search_router(search))
}

/// Creates a router with the /ready endpoint that performs real dependency
/// checks. Merged with the stateless app router from `create_router`.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

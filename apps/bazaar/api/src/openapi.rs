use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Bazaar API",
        version = "0.1.0",
        description = "Multi-tenant marketplace backend: catalog, orders, complaints, notifications and product search"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/products", api = domain_catalog::ProductsApiDoc),
        (path = "/brands", api = domain_catalog::BrandsApiDoc),
        (path = "/categories", api = domain_catalog::CategoriesApiDoc),
        (path = "/orders", api = domain_orders::ApiDoc),
        (path = "/notifications", api = domain_notifications::ApiDoc),
        (path = "/complaints", api = domain_complaints::ApiDoc),
        (path = "/search", api = domain_search::ApiDoc)
    )
)]
pub struct ApiDoc;

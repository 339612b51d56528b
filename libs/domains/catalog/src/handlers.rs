use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_helpers::{
    authenticate, authenticate_optional,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    AppError, AuthUser, JwtVerifier, PageQuery, Pagination, UuidPath, ValidatedJson,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::models::{
    Brand, Category, CreateBrand, CreateCategory, CreateProduct, Product, ProductFilter,
    UpdateBrand, UpdateCategory, UpdateProduct,
};
use crate::repository::{BrandRepository, CategoryRepository, ProductRepository};
use crate::service::{BrandService, CategoryService, ProductService};

/// OpenAPI documentation for the product endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        approve_product,
    ),
    components(
        schemas(
            Product,
            CreateProduct,
            UpdateProduct,
            ProductFilter,
            ProductPage,
            ApproveProduct,
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = "products", description = "Product listing endpoints"))
)]
pub struct ProductsApiDoc;

/// OpenAPI documentation for the brand endpoints
#[derive(OpenApi)]
#[openapi(
    paths(list_brands, create_brand, get_brand, update_brand, delete_brand),
    components(
        schemas(Brand, CreateBrand, UpdateBrand),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = "brands", description = "Brand management endpoints"))
)]
pub struct BrandsApiDoc;

/// OpenAPI documentation for the category endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        list_categories,
        create_category,
        get_category,
        update_category,
        delete_category,
    ),
    components(
        schemas(Category, CreateCategory, UpdateCategory),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = "categories", description = "Category management endpoints"))
)]
pub struct CategoriesApiDoc;

/// Paginated product listing response
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

/// Admin approval toggle
#[derive(Debug, Deserialize, ToSchema)]
pub struct ApproveProduct {
    #[serde(default = "default_approved")]
    pub approved: bool,
}

fn default_approved() -> bool {
    true
}

/// Create the products router with all HTTP endpoints
pub fn products_router<R: ProductRepository + 'static>(
    service: ProductService<R>,
    verifier: JwtVerifier,
) -> Router {
    let shared_service = Arc::new(service);

    let public = Router::new()
        .route("/", get(list_products))
        .route("/{id}", get(get_product))
        .layer(middleware::from_fn_with_state(
            verifier.clone(),
            authenticate_optional,
        ));

    let protected = Router::new()
        .route("/", post(create_product))
        .route("/{id}", axum::routing::put(update_product).delete(delete_product))
        .route("/{id}/approve", post(approve_product))
        .layer(middleware::from_fn_with_state(verifier, authenticate));

    public.merge(protected).with_state(shared_service)
}

/// Create the brands router
pub fn brands_router<R: BrandRepository + 'static>(
    service: BrandService<R>,
    verifier: JwtVerifier,
) -> Router {
    let shared_service = Arc::new(service);

    let public = Router::new()
        .route("/", get(list_brands))
        .route("/{id}", get(get_brand))
        .layer(middleware::from_fn_with_state(
            verifier.clone(),
            authenticate_optional,
        ));

    let protected = Router::new()
        .route("/", post(create_brand))
        .route("/{id}", axum::routing::put(update_brand).delete(delete_brand))
        .layer(middleware::from_fn_with_state(verifier, authenticate));

    public.merge(protected).with_state(shared_service)
}

/// Create the categories router
pub fn categories_router<R: CategoryRepository + 'static>(
    service: CategoryService<R>,
    verifier: JwtVerifier,
) -> Router {
    let shared_service = Arc::new(service);

    let public = Router::new()
        .route("/", get(list_categories))
        .route("/{id}", get(get_category))
        .layer(middleware::from_fn_with_state(
            verifier.clone(),
            authenticate_optional,
        ));

    let protected = Router::new()
        .route("/", post(create_category))
        .route(
            "/{id}",
            axum::routing::put(update_category).delete(delete_category),
        )
        .layer(middleware::from_fn_with_state(verifier, authenticate));

    public.merge(protected).with_state(shared_service)
}

/// List products with optional filters
#[utoipa::path(
    get,
    path = "",
    tag = "products",
    params(ProductFilter),
    responses(
        (status = 200, description = "Paginated list of products", body = ProductPage),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    caller: Option<AuthUser>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<ProductPage>, AppError> {
    let page_query = PageQuery {
        page: filter.page,
        limit: filter.limit,
    };
    let (products, total) = service.list_products(filter, caller.as_ref()).await?;

    Ok(Json(ProductPage {
        products,
        pagination: Pagination::build(&page_query, total),
    }))
}

/// Create a new product listing (seller only)
#[utoipa::path(
    post,
    path = "",
    tag = "products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    caller: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> Result<impl IntoResponse, AppError> {
    let product = service.create_product(input, &caller).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "products",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    caller: Option<AuthUser>,
    UuidPath(id): UuidPath,
) -> Result<Json<Product>, AppError> {
    let product = service.get_product(id, caller.as_ref()).await?;
    Ok(Json(product))
}

/// Update a product (owning seller only)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "products",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    caller: AuthUser,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> Result<Json<Product>, AppError> {
    let product = service.update_product(id, input, &caller).await?;
    Ok(Json(product))
}

/// Delete a product (owning seller or admin)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "products",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    caller: AuthUser,
    UuidPath(id): UuidPath,
) -> Result<impl IntoResponse, AppError> {
    service.delete_product(id, &caller).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Approve or revoke a product listing (admin only)
#[utoipa::path(
    post,
    path = "/{id}/approve",
    tag = "products",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = ApproveProduct,
    responses(
        (status = 200, description = "Approval updated", body = Product),
        (status = 400, response = BadRequestUuidResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn approve_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    caller: AuthUser,
    UuidPath(id): UuidPath,
    Json(input): Json<ApproveProduct>,
) -> Result<Json<Product>, AppError> {
    let product = service.approve_product(id, input.approved, &caller).await?;
    Ok(Json(product))
}

/// List brands (active only for non-admin callers)
#[utoipa::path(
    get,
    path = "",
    tag = "brands",
    responses(
        (status = 200, description = "List of brands", body = Vec<Brand>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_brands<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
    caller: Option<AuthUser>,
) -> Result<Json<Vec<Brand>>, AppError> {
    let brands = service.list_brands(caller.as_ref()).await?;
    Ok(Json(brands))
}

/// Create a brand (admin only)
#[utoipa::path(
    post,
    path = "",
    tag = "brands",
    request_body = CreateBrand,
    responses(
        (status = 201, description = "Brand created successfully", body = Brand),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn create_brand<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
    caller: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateBrand>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_admin()?;
    let brand = service.create_brand(input).await?;
    Ok((StatusCode::CREATED, Json(brand)))
}

/// Get a brand by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "brands",
    params(("id" = Uuid, Path, description = "Brand ID")),
    responses(
        (status = 200, description = "Brand found", body = Brand),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_brand<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
    UuidPath(id): UuidPath,
) -> Result<Json<Brand>, AppError> {
    let brand = service.get_brand(id).await?;
    Ok(Json(brand))
}

/// Update a brand (admin only)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "brands",
    params(("id" = Uuid, Path, description = "Brand ID")),
    request_body = UpdateBrand,
    responses(
        (status = 200, description = "Brand updated successfully", body = Brand),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn update_brand<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
    caller: AuthUser,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateBrand>,
) -> Result<Json<Brand>, AppError> {
    caller.require_admin()?;
    let brand = service.update_brand(id, input).await?;
    Ok(Json(brand))
}

/// Delete a brand (admin only)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "brands",
    params(("id" = Uuid, Path, description = "Brand ID")),
    responses(
        (status = 204, description = "Brand deleted successfully"),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn delete_brand<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
    caller: AuthUser,
    UuidPath(id): UuidPath,
) -> Result<impl IntoResponse, AppError> {
    caller.require_admin()?;
    service.delete_brand(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List categories (active only for non-admin callers)
#[utoipa::path(
    get,
    path = "",
    tag = "categories",
    responses(
        (status = 200, description = "List of categories", body = Vec<Category>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    caller: Option<AuthUser>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = service.list_categories(caller.as_ref()).await?;
    Ok(Json(categories))
}

/// Create a category (admin only)
#[utoipa::path(
    post,
    path = "",
    tag = "categories",
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created successfully", body = Category),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn create_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    caller: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_admin()?;
    let category = service.create_category(input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "categories",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    UuidPath(id): UuidPath,
) -> Result<Json<Category>, AppError> {
    let category = service.get_category(id).await?;
    Ok(Json(category))
}

/// Update a category (admin only)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "categories",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated successfully", body = Category),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn update_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    caller: AuthUser,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateCategory>,
) -> Result<Json<Category>, AppError> {
    caller.require_admin()?;
    let category = service.update_category(id, input).await?;
    Ok(Json(category))
}

/// Delete a category (admin only)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "categories",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted successfully"),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn delete_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    caller: AuthUser,
    UuidPath(id): UuidPath,
) -> Result<impl IntoResponse, AppError> {
    caller.require_admin()?;
    service.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

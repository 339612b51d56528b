use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use axum_helpers::{
    authenticate,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    AppError, AuthUser, JwtVerifier, PageQuery, Pagination, UuidPath, ValidatedJson,
};
use domain_catalog::repository::ProductRepository;
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::models::{CreateOrder, Order, OrderItem, UpdateOrderStatus};
use crate::repository::OrderRepository;
use crate::service::OrderService;

/// OpenAPI documentation for the orders API
#[derive(OpenApi)]
#[openapi(
    paths(create_order, list_orders, get_order, update_order_status, cancel_order),
    components(
        schemas(Order, OrderItem, CreateOrder, UpdateOrderStatus, OrderPage),
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
    tags(
        (name = "orders", description = "Order placement and lifecycle endpoints")
    )
)]
pub struct ApiDoc;

/// Paginated order listing response
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub pagination: Pagination,
}

/// Create the orders router. Every route requires authentication.
pub fn orders_router<R, P>(service: OrderService<R, P>, verifier: JwtVerifier) -> Router
where
    R: OrderRepository + 'static,
    P: ProductRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", post(create_order).get(list_orders))
        .route("/{id}", get(get_order))
        .route("/{id}/status", put(update_order_status))
        .route("/{id}/cancel", post(cancel_order))
        .layer(middleware::from_fn_with_state(verifier, authenticate))
        .with_state(shared_service)
}

/// Place a new order
#[utoipa::path(
    post,
    path = "",
    tag = "orders",
    request_body = CreateOrder,
    responses(
        (status = 201, description = "Order placed successfully", body = Order),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn create_order<R: OrderRepository, P: ProductRepository>(
    State(service): State<Arc<OrderService<R, P>>>,
    caller: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateOrder>,
) -> Result<impl IntoResponse, AppError> {
    let order = service.create_order(input, &caller).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// List orders (own orders, or all orders for admins)
#[utoipa::path(
    get,
    path = "",
    tag = "orders",
    params(PageQuery),
    responses(
        (status = 200, description = "Paginated list of orders", body = OrderPage),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn list_orders<R: OrderRepository, P: ProductRepository>(
    State(service): State<Arc<OrderService<R, P>>>,
    caller: AuthUser,
    Query(page): Query<PageQuery>,
) -> Result<Json<OrderPage>, AppError> {
    let (orders, total) = service.list_orders(&caller, &page).await?;

    Ok(Json(OrderPage {
        orders,
        pagination: Pagination::build(&page, total),
    }))
}

/// Get an order by ID (owner or admin)
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "orders",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order found", body = Order),
        (status = 400, response = BadRequestUuidResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn get_order<R: OrderRepository, P: ProductRepository>(
    State(service): State<Arc<OrderService<R, P>>>,
    caller: AuthUser,
    UuidPath(id): UuidPath,
) -> Result<Json<Order>, AppError> {
    let order = service.get_order(id, &caller).await?;
    Ok(Json(order))
}

/// Update the order status (admin only)
#[utoipa::path(
    put,
    path = "/{id}/status",
    tag = "orders",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = UpdateOrderStatus,
    responses(
        (status = 200, description = "Order status updated", body = Order),
        (status = 400, response = BadRequestUuidResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn update_order_status<R: OrderRepository, P: ProductRepository>(
    State(service): State<Arc<OrderService<R, P>>>,
    caller: AuthUser,
    UuidPath(id): UuidPath,
    Json(input): Json<UpdateOrderStatus>,
) -> Result<Json<Order>, AppError> {
    let order = service.update_status(id, input, &caller).await?;
    Ok(Json(order))
}

/// Cancel a pending order (owner only)
#[utoipa::path(
    post,
    path = "/{id}/cancel",
    tag = "orders",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order cancelled", body = Order),
        (status = 400, response = BadRequestUuidResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn cancel_order<R: OrderRepository, P: ProductRepository>(
    State(service): State<Arc<OrderService<R, P>>>,
    caller: AuthUser,
    UuidPath(id): UuidPath,
) -> Result<Json<Order>, AppError> {
    let order = service.cancel_order(id, &caller).await?;
    Ok(Json(order))
}

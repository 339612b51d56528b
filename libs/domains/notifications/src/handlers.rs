use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use axum_helpers::{
    authenticate,
    errors::responses::{
        BadRequestUuidResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
    AppError, AuthUser, JwtVerifier, PageQuery, Pagination, UuidPath,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::models::Notification;
use crate::repository::NotificationRepository;
use crate::service::NotificationService;

/// OpenAPI documentation for the notifications API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_notifications,
        mark_notification_read,
        mark_all_notifications_read,
        delete_notification,
    ),
    components(
        schemas(Notification, NotificationPage, MarkAllReadResponse),
        responses(
            NotFoundResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "notifications", description = "In-app notification endpoints")
    )
)]
pub struct ApiDoc;

/// Paginated notification listing with unread count
#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationPage {
    pub notifications: Vec<Notification>,
    pub unread_count: u64,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MarkAllReadResponse {
    pub marked: u64,
}

/// Create the notifications router. Every route requires authentication.
pub fn router<R: NotificationRepository + 'static>(
    service: NotificationService<R>,
    verifier: JwtVerifier,
) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_notifications))
        .route("/read-all", post(mark_all_notifications_read))
        .route("/{id}/read", post(mark_notification_read))
        .route("/{id}", delete(delete_notification))
        .layer(middleware::from_fn_with_state(verifier, authenticate))
        .with_state(shared_service)
}

/// List the caller's notifications
#[utoipa::path(
    get,
    path = "",
    tag = "notifications",
    params(PageQuery),
    responses(
        (status = 200, description = "Paginated notifications", body = NotificationPage),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn list_notifications<R: NotificationRepository>(
    State(service): State<Arc<NotificationService<R>>>,
    caller: AuthUser,
    Query(page): Query<PageQuery>,
) -> Result<Json<NotificationPage>, AppError> {
    let (notifications, total, unread_count) = service.list_for_user(&caller, &page).await?;

    Ok(Json(NotificationPage {
        notifications,
        unread_count,
        pagination: Pagination::build(&page, total),
    }))
}

/// Mark a notification as read
#[utoipa::path(
    post,
    path = "/{id}/read",
    tag = "notifications",
    params(("id" = Uuid, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification marked as read", body = Notification),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn mark_notification_read<R: NotificationRepository>(
    State(service): State<Arc<NotificationService<R>>>,
    caller: AuthUser,
    UuidPath(id): UuidPath,
) -> Result<Json<Notification>, AppError> {
    let notification = service.mark_read(id, &caller).await?;
    Ok(Json(notification))
}

/// Mark all of the caller's notifications as read
#[utoipa::path(
    post,
    path = "/read-all",
    tag = "notifications",
    responses(
        (status = 200, description = "All notifications marked as read", body = MarkAllReadResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn mark_all_notifications_read<R: NotificationRepository>(
    State(service): State<Arc<NotificationService<R>>>,
    caller: AuthUser,
) -> Result<Json<MarkAllReadResponse>, AppError> {
    let marked = service.mark_all_read(&caller).await?;
    Ok(Json(MarkAllReadResponse { marked }))
}

/// Delete a notification
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "notifications",
    params(("id" = Uuid, Path, description = "Notification ID")),
    responses(
        (status = 204, description = "Notification deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn delete_notification<R: NotificationRepository>(
    State(service): State<Arc<NotificationService<R>>>,
    caller: AuthUser,
    UuidPath(id): UuidPath,
) -> Result<impl IntoResponse, AppError> {
    service.delete(id, &caller).await?;
    Ok(StatusCode::NO_CONTENT)
}

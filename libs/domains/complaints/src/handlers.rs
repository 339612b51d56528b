use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, put},
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
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::models::{Complaint, ComplaintStatus, CreateComplaint, UpdateComplaintStatus};
use crate::repository::ComplaintRepository;
use crate::service::ComplaintService;

/// OpenAPI documentation for the complaints API
#[derive(OpenApi)]
#[openapi(
    paths(create_complaint, list_complaints, get_complaint, update_complaint_status),
    components(
        schemas(Complaint, CreateComplaint, UpdateComplaintStatus, ComplaintPage),
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
        (name = "complaints", description = "Complaint filing and triage endpoints")
    )
)]
pub struct ApiDoc;

/// Paginated complaint listing response
#[derive(Debug, Serialize, ToSchema)]
pub struct ComplaintPage {
    pub complaints: Vec<Complaint>,
    pub pagination: Pagination,
}

/// Listing filters; the status filter applies to admin listings only
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ComplaintQuery {
    pub status: Option<ComplaintStatus>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl ComplaintQuery {
    fn page_query(&self) -> PageQuery {
        let defaults = PageQuery::default();
        PageQuery {
            page: self.page.unwrap_or(defaults.page),
            limit: self.limit.unwrap_or(defaults.limit),
        }
    }
}

/// Create the complaints router. Every route requires authentication.
pub fn complaints_router<R: ComplaintRepository + 'static>(
    service: ComplaintService<R>,
    verifier: JwtVerifier,
) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", axum::routing::post(create_complaint).get(list_complaints))
        .route("/{id}", get(get_complaint))
        .route("/{id}/status", put(update_complaint_status))
        .layer(middleware::from_fn_with_state(verifier, authenticate))
        .with_state(shared_service)
}

/// File a new complaint
#[utoipa::path(
    post,
    path = "",
    tag = "complaints",
    request_body = CreateComplaint,
    responses(
        (status = 201, description = "Complaint filed successfully", body = Complaint),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn create_complaint<R: ComplaintRepository>(
    State(service): State<Arc<ComplaintService<R>>>,
    caller: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateComplaint>,
) -> Result<impl IntoResponse, AppError> {
    let complaint = service.create_complaint(input, &caller).await?;
    Ok((StatusCode::CREATED, Json(complaint)))
}

/// List complaints (own complaints, or all complaints for admins)
#[utoipa::path(
    get,
    path = "",
    tag = "complaints",
    params(ComplaintQuery),
    responses(
        (status = 200, description = "Paginated list of complaints", body = ComplaintPage),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn list_complaints<R: ComplaintRepository>(
    State(service): State<Arc<ComplaintService<R>>>,
    caller: AuthUser,
    Query(query): Query<ComplaintQuery>,
) -> Result<Json<ComplaintPage>, AppError> {
    let page = query.page_query();
    let (complaints, total) = service
        .list_complaints(&caller, query.status, &page)
        .await?;

    Ok(Json(ComplaintPage {
        complaints,
        pagination: Pagination::build(&page, total),
    }))
}

/// Get a complaint by ID (owner or admin)
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "complaints",
    params(("id" = Uuid, Path, description = "Complaint ID")),
    responses(
        (status = 200, description = "Complaint found", body = Complaint),
        (status = 400, response = BadRequestUuidResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn get_complaint<R: ComplaintRepository>(
    State(service): State<Arc<ComplaintService<R>>>,
    caller: AuthUser,
    UuidPath(id): UuidPath,
) -> Result<Json<Complaint>, AppError> {
    let complaint = service.get_complaint(id, &caller).await?;
    Ok(Json(complaint))
}

/// Triage or close a complaint (admin only)
#[utoipa::path(
    put,
    path = "/{id}/status",
    tag = "complaints",
    params(("id" = Uuid, Path, description = "Complaint ID")),
    request_body = UpdateComplaintStatus,
    responses(
        (status = 200, description = "Complaint status updated", body = Complaint),
        (status = 400, response = BadRequestUuidResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn update_complaint_status<R: ComplaintRepository>(
    State(service): State<Arc<ComplaintService<R>>>,
    caller: AuthUser,
    UuidPath(id): UuidPath,
    Json(input): Json<UpdateComplaintStatus>,
) -> Result<Json<Complaint>, AppError> {
    let complaint = service.update_status(id, input, &caller).await?;
    Ok(Json(complaint))
}

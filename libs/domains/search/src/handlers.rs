use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{BadRequestValidationResponse, InternalServerErrorResponse},
    AppError,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{ProductHit, SearchParams, SearchResponse};
use crate::repository::SearchRepository;
use crate::service::SearchService;

/// OpenAPI documentation for the search API
#[derive(OpenApi)]
#[openapi(
    paths(search),
    components(
        schemas(SearchResponse, ProductHit),
        responses(BadRequestValidationResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "search", description = "Product search endpoints")
    )
)]
pub struct ApiDoc;

/// Create the search router (public, no authentication)
pub fn search_router<R: SearchRepository + 'static>(service: SearchService<R>) -> Router {
    Router::new()
        .route("/", get(search))
        .with_state(Arc::new(service))
}

/// Search visible products
#[utoipa::path(
    get,
    path = "",
    tag = "search",
    params(SearchParams),
    responses(
        (status = 200, description = "Search results", body = SearchResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search<R: SearchRepository>(
    State(service): State<Arc<SearchService<R>>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let response = service.search(params).await?;
    Ok(Json(response))
}

// src/presentation/http/controllers/taxonomy.rs
use crate::application::{
    commands::taxonomy::{CreateCategoryCommand, CreateTagCommand},
    dto::{CategoryDto, TagDto},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, http::StatusCode};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTagRequest {
    pub name: String,
    /// `#RRGGBB`; defaults to `#3498db`.
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/tags",
    responses((status = 200, description = "All tags by name.", body = [TagDto])),
    tag = "Taxonomy"
)]
pub async fn list_tags(Extension(state): Extension<HttpState>) -> HttpResult<Json<Vec<TagDto>>> {
    state
        .services
        .taxonomy_queries
        .list_tags()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/tags",
    request_body = CreateTagRequest,
    responses(
        (status = 201, description = "Tag created.", body = TagDto),
        (status = 400, description = "Invalid name or color.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Caller is not staff.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Tag already exists.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Taxonomy"
)]
pub async fn create_tag(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateTagRequest>,
) -> HttpResult<(StatusCode, Json<TagDto>)> {
    let tag = state
        .services
        .taxonomy_commands
        .create_tag(
            Some(&user),
            CreateTagCommand {
                name: payload.name,
                color: payload.color,
            },
        )
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(tag)))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses((status = 200, description = "All categories by name.", body = [CategoryDto])),
    tag = "Taxonomy"
)]
pub async fn list_categories(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<Vec<CategoryDto>>> {
    state
        .services
        .taxonomy_queries
        .list_categories()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created.", body = CategoryDto),
        (status = 403, description = "Caller is not staff.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Category already exists.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Taxonomy"
)]
pub async fn create_category(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateCategoryRequest>,
) -> HttpResult<(StatusCode, Json<CategoryDto>)> {
    let category = state
        .services
        .taxonomy_commands
        .create_category(Some(&user), CreateCategoryCommand { name: payload.name })
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(category)))
}

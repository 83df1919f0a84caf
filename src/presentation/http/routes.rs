// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{articles, comments, taxonomy},
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderName, HeaderValue, Method, header},
    routing::{delete, get, post},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

pub fn build_router(state: HttpState) -> Router {
    let cors = cors_layer(&state.allowed_origins);

    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .route(
            "/api/v1/articles",
            get(articles::list_articles).post(articles::create_article),
        )
        .route(
            "/api/v1/articles/{slug}",
            get(articles::get_article)
                .post(articles::post_article_comment)
                .delete(articles::delete_article),
        )
        .route(
            "/api/v1/articles/{slug}/comments",
            get(comments::list_comments).post(comments::submit_comment),
        )
        .route(
            "/api/v1/comments/moderation",
            post(comments::moderate_comments),
        )
        .route(
            "/api/v1/comments/{id}/delete",
            get(comments::delete_comment_read_only).post(comments::delete_comment),
        )
        .route("/api/v1/comments/{id}", delete(comments::remove_comment))
        .route(
            "/api/v1/tags",
            get(taxonomy::list_tags).post(taxonomy::create_tag),
        )
        .route("/api/v1/tags/{slug}/articles", get(articles::articles_by_tag))
        .route(
            "/api/v1/categories",
            get(taxonomy::list_categories).post(taxonomy::create_category),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}

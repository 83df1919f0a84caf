// src/presentation/http/controllers/articles.rs
use crate::application::{
    commands::articles::{
        ArticleBlockInput, CreateArticleCommand, DeleteArticleCommand, RecordArticleViewCommand,
    },
    dto::{ArticleDetailDto, ArticleDto},
    queries::articles::{ArticlesByTagQuery, ListArticlesQuery},
};
use crate::presentation::http::controllers::comments::{CommentFormPayload, deliver_submission};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, Delivery, MaybeAuthenticated};
use crate::presentation::http::flash::{self, Flash};
use crate::presentation::http::openapi::{ArticleListResponse, StatusResponse};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Form, Json,
    extract::{Path, Query},
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ArticleListParams {
    /// Page number; anything unparseable means the first page.
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct PageParams {
    #[serde(default)]
    pub page: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ArticleBlockRequest {
    pub block_type: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_caption: String,
    #[serde(default)]
    pub order: Option<u32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateArticleRequest {
    pub title: String,
    #[serde(default)]
    pub blocks: Vec<ArticleBlockRequest>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_true")]
    pub publish: bool,
    #[serde(default = "default_true")]
    pub comments_enabled: bool,
}

/// The article page: detail plus the notification left by the last redirect.
#[derive(Debug, Serialize, ToSchema)]
pub struct ArticlePageResponse {
    #[serde(flatten)]
    pub detail: ArticleDetailDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
}

#[utoipa::path(
    get,
    path = "/api/v1/articles",
    params(ArticleListParams),
    responses(
        (status = 200, description = "Published articles, newest first.", body = ArticleListResponse),
        (status = 404, description = "Unknown category.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn list_articles(
    Extension(state): Extension<HttpState>,
    Query(params): Query<ArticleListParams>,
) -> HttpResult<Json<ArticleListResponse>> {
    let query = ListArticlesQuery {
        page: params.page,
        tag: params.tag,
        category: params.category,
    };

    state
        .services
        .article_queries
        .list_articles(query)
        .await
        .into_http()
        .map(|page| Json(page.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/articles",
    request_body = CreateArticleRequest,
    responses(
        (status = 201, description = "Article created.", body = ArticleDto),
        (status = 400, description = "Invalid title, block, tag or category.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Missing or invalid token.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Caller is not staff.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Articles"
)]
pub async fn create_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateArticleRequest>,
) -> HttpResult<(StatusCode, Json<ArticleDto>)> {
    let command = CreateArticleCommand {
        title: payload.title,
        blocks: payload
            .blocks
            .into_iter()
            .map(|block| ArticleBlockInput {
                block_type: block.block_type,
                content: block.content,
                image: block.image,
                image_caption: block.image_caption,
                order: block.order,
            })
            .collect(),
        tags: payload.tags,
        category: payload.category,
        publish: payload.publish,
        comments_enabled: payload.comments_enabled,
    };

    let article = state
        .services
        .article_commands
        .create_article(Some(&user), command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(article)))
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/{slug}",
    params(("slug" = String, Path, description = "Article slug")),
    responses(
        (status = 200, description = "Article page; counts one view.", body = ArticlePageResponse),
        (status = 404, description = "No published article with this slug.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn get_article(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> HttpResult<Response> {
    let article = state
        .services
        .article_commands
        .record_view(RecordArticleViewCommand { slug })
        .await
        .into_http()?;
    let detail = state
        .services
        .article_queries
        .article_detail(article)
        .await
        .into_http()?;

    let flash = Flash::from_headers(&headers);
    let consumed = flash.is_some();
    let body = Json(ArticlePageResponse { detail, flash });

    if consumed {
        Ok((AppendHeaders([(SET_COOKIE, flash::clear_cookie())]), body).into_response())
    } else {
        Ok(body.into_response())
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/articles/{slug}",
    params(("slug" = String, Path, description = "Article slug")),
    request_body(content = CommentFormPayload, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Back to the article page with a notification."),
        (status = 404, description = "No published article with this slug.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Comments"
)]
pub async fn post_article_comment(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Path(slug): Path<String>,
    Form(payload): Form<CommentFormPayload>,
) -> Response {
    deliver_submission(&state, actor.0.as_ref(), Delivery::Page, slug, payload).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/articles/{slug}",
    params(("slug" = String, Path, description = "Article slug")),
    responses(
        (status = 200, description = "Article and its comments removed.", body = StatusResponse),
        (status = 403, description = "Caller is not staff.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Unknown article.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Articles"
)]
pub async fn delete_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(slug): Path<String>,
) -> HttpResult<Json<StatusResponse>> {
    state
        .services
        .article_commands
        .delete_article(Some(&user), DeleteArticleCommand { slug })
        .await
        .into_http()?;

    Ok(Json(StatusResponse {
        status: "deleted".into(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/tags/{slug}/articles",
    params(("slug" = String, Path, description = "Tag slug"), PageParams),
    responses(
        (status = 200, description = "Published articles carrying the tag.", body = ArticleListResponse),
        (status = 404, description = "Unknown tag.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn articles_by_tag(
    Extension(state): Extension<HttpState>,
    Path(tag): Path<String>,
    Query(params): Query<PageParams>,
) -> HttpResult<Json<ArticleListResponse>> {
    state
        .services
        .article_queries
        .articles_by_tag(ArticlesByTagQuery {
            tag,
            page: params.page,
        })
        .await
        .into_http()
        .map(|page| Json(page.into()))
}

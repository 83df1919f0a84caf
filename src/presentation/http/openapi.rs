// src/presentation/http/openapi.rs
use crate::application::dto::{ArticleSummaryDto, Page};
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, env, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
    server::Server,
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_redoc::{Redoc, Servable};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

/// One page of article summaries.
#[derive(Debug, Serialize, ToSchema)]
pub struct ArticleListResponse {
    pub items: Vec<ArticleSummaryDto>,
    pub page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl From<Page<ArticleSummaryDto>> for ArticleListResponse {
    fn from(page: Page<ArticleSummaryDto>) -> Self {
        Self {
            items: page.items,
            page: page.page,
            total_pages: page.total_pages,
            total_items: page.total_items,
            has_next: page.has_next,
            has_previous: page.has_previous,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::articles::list_articles,
        crate::presentation::http::controllers::articles::create_article,
        crate::presentation::http::controllers::articles::get_article,
        crate::presentation::http::controllers::articles::post_article_comment,
        crate::presentation::http::controllers::articles::delete_article,
        crate::presentation::http::controllers::articles::articles_by_tag,
        crate::presentation::http::controllers::comments::list_comments,
        crate::presentation::http::controllers::comments::submit_comment,
        crate::presentation::http::controllers::comments::delete_comment_read_only,
        crate::presentation::http::controllers::comments::delete_comment,
        crate::presentation::http::controllers::comments::remove_comment,
        crate::presentation::http::controllers::comments::moderate_comments,
        crate::presentation::http::controllers::taxonomy::list_tags,
        crate::presentation::http::controllers::taxonomy::create_tag,
        crate::presentation::http::controllers::taxonomy::list_categories,
        crate::presentation::http::controllers::taxonomy::create_category,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            ArticleListResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::flash::Flash,
            crate::presentation::http::flash::FlashLevel,
            crate::presentation::http::controllers::articles::ArticlePageResponse,
            crate::presentation::http::controllers::articles::CreateArticleRequest,
            crate::presentation::http::controllers::articles::ArticleBlockRequest,
            crate::presentation::http::controllers::comments::CommentFormPayload,
            crate::presentation::http::controllers::comments::CommentActionPayload,
            crate::presentation::http::controllers::comments::CommentListResponse,
            crate::presentation::http::controllers::comments::ModerationRequest,
            crate::presentation::http::controllers::taxonomy::CreateTagRequest,
            crate::presentation::http::controllers::taxonomy::CreateCategoryRequest,
            crate::application::dto::ArticleDto,
            crate::application::dto::ArticleBlockDto,
            crate::application::dto::ArticleSummaryDto,
            crate::application::dto::ArticleDetailDto,
            crate::application::dto::CommentDto,
            crate::application::dto::CommentThreadDto,
            crate::application::dto::ModerationResultDto,
            crate::application::dto::TagDto,
            crate::application::dto::CategoryDto
        )
    ),
    tags(
        (name = "Articles", description = "Reading and editing articles"),
        (name = "Comments", description = "Threaded, moderated comments"),
        (name = "Taxonomy", description = "Tags and categories"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    info(
        title = "Gazette API",
        description = "News and blog backend with threaded comments",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("Biscuit".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));

        let servers = openapi.servers.get_or_insert_with(Vec::new);
        servers.clear();

        let mut urls: Vec<String> = env::var("PUBLIC_API_URLS")
            .ok()
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|segment| !segment.is_empty())
                    .map(|segment| segment.trim_end_matches('/').to_string())
                    .collect()
            })
            .unwrap_or_default();

        if urls.is_empty() {
            urls.push("http://localhost:8080".to_string());
        }

        let mut seen = HashSet::new();
        for url in urls {
            if seen.insert(url.clone()) {
                servers.push(Server::new(url));
            }
        }
    }
}

pub async fn serve_openapi() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}

pub fn docs_router() -> Router {
    Router::new()
        .route("/openapi.json", get(serve_openapi))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .route("/", get(|| async { Redirect::permanent("/redoc") }))
}

pub fn write_openapi_snapshot(output_path: &str) -> std::io::Result<()> {
    let spec = ApiDoc::openapi();
    let path = Path::new(output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &spec)?;
    Ok(())
}

// tests/support/helpers.rs
use super::mocks;
use axum::body::{self, Body};
use axum::http::StatusCode;
use axum::response::Response;
use gazette_core::application::{
    commands::{
        articles::CreateArticleCommand,
        comments::{CommentForm, SubmitCommentCommand},
        taxonomy::{CreateCategoryCommand, CreateTagCommand},
    },
    dto::{ArticleDto, AuthenticatedUser, CategoryDto, CommentDto, TagDto},
    ports::{security::TokenManager, time::Clock, util::SlugGenerator},
    services::{ApplicationServices, ServiceSettings},
};
use gazette_core::infrastructure::repositories::InMemoryStore;
use gazette_core::presentation::http::{routes::build_router, state::HttpState};
use serde_json::Value;
use std::sync::Arc;

pub fn build_services(store: Arc<InMemoryStore>, settings: ServiceSettings) -> ApplicationServices {
    let token_manager: Arc<dyn TokenManager> = Arc::new(mocks::DummyTokenManager);
    let clock: Arc<dyn Clock> = Arc::new(mocks::DummyClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(mocks::DummySlug);

    ApplicationServices::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store,
        token_manager,
        clock,
        slugger,
        settings,
    )
}

pub fn build_test_state() -> HttpState {
    build_test_state_with(ServiceSettings::default())
}

pub fn build_test_state_with(settings: ServiceSettings) -> HttpState {
    let store = Arc::new(InMemoryStore::new());
    HttpState {
        services: Arc::new(build_services(store, settings)),
        allowed_origins: vec!["http://localhost:3000".to_string()].into(),
    }
}

pub fn make_test_router(state: &HttpState) -> axum::Router {
    build_router(state.clone())
}

pub async fn seed_tag(state: &HttpState, name: &str) -> TagDto {
    state
        .services
        .taxonomy_commands
        .create_tag(
            Some(&mocks::staff()),
            CreateTagCommand {
                name: name.to_string(),
                color: None,
            },
        )
        .await
        .expect("seed tag")
}

pub async fn seed_category(state: &HttpState, name: &str) -> CategoryDto {
    state
        .services
        .taxonomy_commands
        .create_category(
            Some(&mocks::staff()),
            CreateCategoryCommand {
                name: name.to_string(),
            },
        )
        .await
        .expect("seed category")
}

pub async fn seed_article(state: &HttpState, command: CreateArticleCommand) -> ArticleDto {
    state
        .services
        .article_commands
        .create_article(Some(&mocks::staff()), command)
        .await
        .expect("seed article")
}

/// Published article with one text block and comments enabled.
pub async fn seed_simple_article(state: &HttpState, title: &str) -> ArticleDto {
    let command = CreateArticleCommand::builder()
        .title(title)
        .text("Body text")
        .build()
        .expect("article command");
    seed_article(state, command).await
}

pub async fn seed_comment(
    state: &HttpState,
    actor: &AuthenticatedUser,
    slug: &str,
    content: &str,
    parent: Option<i64>,
) -> CommentDto {
    state
        .services
        .comment_commands
        .submit_comment(
            Some(actor),
            SubmitCommentCommand {
                article_slug: slug.to_string(),
                form: CommentForm {
                    content: content.to_string(),
                    parent: parent.map(|id| id.to_string()),
                },
            },
        )
        .await
        .expect("seed comment")
}

pub async fn read_json(resp: Response) -> Value {
    let body_bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body_bytes).expect("expected a JSON body")
}

/// Assert that a response is an ErrorResponse JSON with the expected status and error string.
pub async fn assert_error_response(resp: Response, expected_status: StatusCode, expected_error: &str) {
    assert_eq!(resp.status(), expected_status);
    let ct = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let json = read_json(resp).await;
    let err_field = json.get("error").and_then(|v| v.as_str()).unwrap_or("");
    let msg_field = json.get("message").and_then(|v| v.as_str()).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {err_field}");
    assert!(!msg_field.is_empty(), "expected non-empty message field in ErrorResponse");
}

pub fn location(resp: &Response) -> &str {
    resp.headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// `name=value` part of the first `Set-Cookie` header.
pub fn set_cookie_pair(resp: &Response) -> Option<String> {
    resp.headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(|raw| raw.split(';').next())
        .map(str::to_string)
}

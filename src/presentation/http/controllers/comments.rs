// src/presentation/http/controllers/comments.rs
use crate::application::{
    commands::comments::{
        CommentForm, DeleteCommentCommand, SetCommentApprovalCommand,
        SubmitCommentCommand,
    },
    dto::{AuthenticatedUser, CommentThreadDto, DeletedCommentDto, ModerationResultDto},
    error::{ApplicationError, FieldErrors},
    queries::comments::ListCommentThreadsQuery,
    ApplicationResult,
};
use crate::presentation::http::controllers::article_url;
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, Delivery, MaybeAuthenticated};
use crate::presentation::http::flash::{Flash, redirect_with};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Form, Json,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const COMMENT_ADDED: &str = "Your comment has been added!";
const COMMENT_DELETED: &str = "Comment deleted.";
const SIGN_IN_TO_COMMENT: &str = "You must be signed in to comment.";
const CHECK_THE_FORM: &str = "Could not add your comment. Check the form.";

/// Fields of the comment form as posted by a browser.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CommentFormPayload {
    #[serde(default)]
    pub content: String,
    /// Id of the comment being answered; blank or unknown means a new thread.
    #[serde(default)]
    pub parent: Option<String>,
}

/// Outcome of a script-driven submission or deletion.
#[derive(Debug, Serialize, ToSchema)]
pub struct CommentActionPayload {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl CommentActionPayload {
    fn ok(comment_id: Option<i64>, message: &str) -> Self {
        Self {
            success: true,
            comment_id,
            message: Some(message.to_string()),
            errors: None,
        }
    }

    fn failed(err: HttpError) -> Self {
        let message = err.message().to_string();
        Self {
            success: false,
            comment_id: None,
            message: Some(message),
            errors: err.into_field_errors(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentListResponse {
    pub comments: Vec<CommentThreadDto>,
    pub count: u64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ModerationRequest {
    pub ids: Vec<i64>,
    pub approved: bool,
}

/// Run a submission and answer it the way the client asked for.
pub(crate) async fn deliver_submission(
    state: &HttpState,
    actor: Option<&AuthenticatedUser>,
    delivery: Delivery,
    slug: String,
    payload: CommentFormPayload,
) -> Response {
    let command = SubmitCommentCommand {
        article_slug: slug.clone(),
        form: CommentForm {
            content: payload.content,
            parent: payload.parent,
        },
    };
    let result = state
        .services
        .comment_commands
        .submit_comment(actor, command)
        .await;

    submission_response(result.map(|comment| comment.id), delivery, &slug)
}

fn submission_response(result: ApplicationResult<i64>, delivery: Delivery, slug: &str) -> Response {
    let err = match result {
        Ok(comment_id) => {
            return match delivery {
                Delivery::Async => {
                    Json(CommentActionPayload::ok(Some(comment_id), COMMENT_ADDED)).into_response()
                }
                Delivery::Page => redirect_with(&article_url(slug), Flash::success(COMMENT_ADDED)),
            };
        }
        Err(err) => HttpError::from_error(err),
    };

    let status = err.status();
    match (delivery, status) {
        (
            Delivery::Async,
            StatusCode::UNAUTHORIZED
            | StatusCode::FORBIDDEN
            | StatusCode::NOT_FOUND
            | StatusCode::UNPROCESSABLE_ENTITY,
        ) => (status, Json(CommentActionPayload::failed(err))).into_response(),
        (Delivery::Page, StatusCode::UNAUTHORIZED) => {
            redirect_with(&article_url(slug), Flash::error(SIGN_IN_TO_COMMENT))
        }
        (Delivery::Page, StatusCode::UNPROCESSABLE_ENTITY) => {
            redirect_with(&article_url(slug), Flash::error(CHECK_THE_FORM))
        }
        (Delivery::Page, StatusCode::FORBIDDEN) => {
            redirect_with(&article_url(slug), Flash::error(err.message()))
        }
        _ => err.into_response(),
    }
}

fn deletion_response(deleted: DeletedCommentDto, delivery: Delivery) -> Response {
    match delivery {
        Delivery::Async => Json(CommentActionPayload::ok(None, COMMENT_DELETED)).into_response(),
        Delivery::Page => {
            let location = deleted
                .article_slug
                .as_deref()
                .map(article_url)
                .unwrap_or_else(|| "/api/v1/articles".to_string());
            redirect_with(&location, Flash::success(COMMENT_DELETED))
        }
    }
}

fn parse_comment_id(raw_id: &str) -> HttpResult<i64> {
    raw_id
        .trim()
        .parse::<i64>()
        .map_err(|_| HttpError::from_error(ApplicationError::not_found("comment not found")))
}

async fn run_delete(
    state: &HttpState,
    user: &AuthenticatedUser,
    raw_id: &str,
) -> HttpResult<DeletedCommentDto> {
    let id = parse_comment_id(raw_id)?;
    state
        .services
        .comment_commands
        .delete_comment(user, DeleteCommentCommand { id })
        .await
        .into_http()
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/{slug}/comments",
    params(("slug" = String, Path, description = "Article slug")),
    responses(
        (status = 200, description = "Approved comment threads; does not count a view.", body = CommentListResponse),
        (status = 404, description = "No published article with this slug.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Comments"
)]
pub async fn list_comments(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
) -> HttpResult<Json<CommentListResponse>> {
    let queries = &state.services.comment_queries;
    let comments = queries
        .list_threads(ListCommentThreadsQuery {
            article_slug: slug.clone(),
        })
        .await
        .into_http()?;
    let count = queries.count_comments(&slug).await.into_http()?;

    Ok(Json(CommentListResponse { comments, count }))
}

#[utoipa::path(
    post,
    path = "/api/v1/articles/{slug}/comments",
    params(
        ("slug" = String, Path, description = "Article slug"),
        ("X-Requested-With" = Option<String>, Header, description = "`XMLHttpRequest` selects a JSON answer")
    ),
    request_body(content = CommentFormPayload, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Comment stored (script mode).", body = CommentActionPayload),
        (status = 303, description = "Back to the article page with a notification (page mode)."),
        (status = 401, description = "Anonymous caller (script mode).", body = CommentActionPayload),
        (status = 403, description = "Comments are disabled (script mode).", body = CommentActionPayload),
        (status = 404, description = "No published article with this slug.", body = CommentActionPayload),
        (status = 422, description = "Invalid form (script mode).", body = CommentActionPayload)
    ),
    tag = "Comments"
)]
pub async fn submit_comment(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    delivery: Delivery,
    Path(slug): Path<String>,
    Form(payload): Form<CommentFormPayload>,
) -> Response {
    deliver_submission(&state, actor.0.as_ref(), delivery, slug, payload).await
}

#[utoipa::path(
    get,
    path = "/api/v1/comments/{id}/delete",
    params(("id" = i64, Path, description = "Comment id")),
    responses(
        (status = 403, description = "Caller may not delete this comment.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Unknown comment.", body = crate::presentation::http::error::ErrorResponse),
        (status = 405, description = "Deletion needs a state-changing request.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Comments"
)]
pub async fn delete_comment_read_only(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<String>,
) -> HttpError {
    match parse_comment_id(&id) {
        Ok(id) => HttpError::from_error(
            state
                .services
                .comment_commands
                .refuse_read_only_delete(&user, id)
                .await,
        ),
        Err(err) => err,
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/comments/{id}/delete",
    params(("id" = i64, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment and its replies removed (script mode).", body = CommentActionPayload),
        (status = 303, description = "Back to the article page with a notification (page mode)."),
        (status = 403, description = "Caller may not delete this comment.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Unknown comment.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Comments"
)]
pub async fn delete_comment(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    delivery: Delivery,
    Path(id): Path<String>,
) -> HttpResult<Response> {
    let deleted = run_delete(&state, &user, &id).await?;
    Ok(deletion_response(deleted, delivery))
}

#[utoipa::path(
    delete,
    path = "/api/v1/comments/{id}",
    params(("id" = i64, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment and its replies removed.", body = CommentActionPayload),
        (status = 403, description = "Caller may not delete this comment.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Unknown comment.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Comments"
)]
pub async fn remove_comment(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<String>,
) -> HttpResult<Response> {
    let deleted = run_delete(&state, &user, &id).await?;
    Ok(deletion_response(deleted, Delivery::Async))
}

#[utoipa::path(
    post,
    path = "/api/v1/comments/moderation",
    request_body = ModerationRequest,
    responses(
        (status = 200, description = "Approval flag updated.", body = ModerationResultDto),
        (status = 400, description = "No comment ids given.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Caller is not staff.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Comments"
)]
pub async fn moderate_comments(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<ModerationRequest>,
) -> HttpResult<Json<ModerationResultDto>> {
    state
        .services
        .comment_commands
        .set_comment_approval(
            Some(&user),
            SetCommentApprovalCommand {
                ids: payload.ids,
                approved: payload.approved,
            },
        )
        .await
        .into_http()
        .map(Json)
}

use crate::domain::comment::{Comment, CommentThread};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommentDto {
    pub id: i64,
    pub article_id: i64,
    pub author_id: i64,
    pub author: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
    pub content: String,
    /// Content cut to 50 characters for moderation listings.
    pub preview: String,
    pub is_approved: bool,
    pub is_reply: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        let is_reply = comment.is_reply();
        Self {
            id: comment.id.into(),
            article_id: comment.article_id.into(),
            author_id: comment.author_id.into(),
            author: comment.author_name.into_inner(),
            parent_id: comment.parent_id.map(Into::into),
            preview: comment.content.preview(),
            content: comment.content.into_inner(),
            is_approved: comment.is_approved,
            is_reply,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

/// A root comment with its approved direct replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommentThreadDto {
    #[serde(flatten)]
    pub comment: CommentDto,
    pub replies: Vec<CommentDto>,
}

impl From<CommentThread> for CommentThreadDto {
    fn from(thread: CommentThread) -> Self {
        Self {
            comment: thread.root.into(),
            replies: thread.replies.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModerationResultDto {
    pub approved: bool,
    pub updated: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletedCommentDto {
    pub comment_id: i64,
    pub article_id: i64,
    #[serde(default)]
    pub article_slug: Option<String>,
}

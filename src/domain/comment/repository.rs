// src/domain/comment/repository.rs
use crate::domain::article::ArticleId;
use crate::domain::comment::entity::{Comment, NewComment};
use crate::domain::comment::value_objects::CommentId;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert(&self, comment: NewComment) -> DomainResult<Comment>;
    async fn find_by_id(&self, id: CommentId) -> DomainResult<Option<Comment>>;
    /// Resolves `id` only when the comment belongs to `article_id`.
    async fn find_in_article(
        &self,
        id: CommentId,
        article_id: ArticleId,
    ) -> DomainResult<Option<Comment>>;
    /// Approved comments of an article at any depth, oldest first.
    async fn list_approved_by_article(&self, article_id: ArticleId) -> DomainResult<Vec<Comment>>;
    async fn count_approved(&self, article_id: ArticleId) -> DomainResult<u64>;
    /// Deletes the comment and every descendant reply.
    async fn delete(&self, id: CommentId) -> DomainResult<()>;
    /// Flips the approval flag on the given comments, returning how many rows changed.
    async fn set_approval(
        &self,
        ids: &[CommentId],
        approved: bool,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<u64>;
}

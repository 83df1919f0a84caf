// src/infrastructure/repositories/postgres_comment.rs
use super::map_sqlx;
use crate::domain::article::ArticleId;
use crate::domain::comment::{Comment, CommentContent, CommentId, CommentRepository, NewComment};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::{UserId, Username};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

const COMMENT_COLUMNS: &str =
    "id, article_id, author_id, author_name, parent_id, content, is_approved, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CommentRow {
    id: i64,
    article_id: i64,
    author_id: i64,
    author_name: String,
    parent_id: Option<i64>,
    content: String,
    is_approved: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CommentRow> for Comment {
    type Error = DomainError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(Comment {
            id: CommentId::new(row.id)?,
            article_id: ArticleId::new(row.article_id)?,
            author_id: UserId::new(row.author_id)?,
            author_name: Username::new(row.author_name)?,
            parent_id: row.parent_id.map(CommentId::new).transpose()?,
            content: CommentContent::new(row.content)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            is_approved: row.is_approved,
        })
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn insert(&self, comment: NewComment) -> DomainResult<Comment> {
        let row = sqlx::query_as::<_, CommentRow>(&format!(
            "INSERT INTO comments
                (article_id, author_id, author_name, parent_id, content, is_approved, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(i64::from(comment.article_id))
        .bind(i64::from(comment.author_id))
        .bind(comment.author_name.as_str())
        .bind(comment.parent_id.map(i64::from))
        .bind(comment.content.as_str())
        .bind(comment.is_approved)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Comment::try_from(row)
    }

    async fn find_by_id(&self, id: CommentId) -> DomainResult<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Comment::try_from).transpose()
    }

    async fn find_in_article(
        &self,
        id: CommentId,
        article_id: ArticleId,
    ) -> DomainResult<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1 AND article_id = $2"
        ))
        .bind(i64::from(id))
        .bind(i64::from(article_id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Comment::try_from).transpose()
    }

    async fn list_approved_by_article(&self, article_id: ArticleId) -> DomainResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments
             WHERE article_id = $1 AND is_approved = TRUE
             ORDER BY created_at, id"
        ))
        .bind(i64::from(article_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Comment::try_from).collect()
    }

    async fn count_approved(&self, article_id: ArticleId) -> DomainResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM comments WHERE article_id = $1 AND is_approved = TRUE",
        )
        .bind(i64::from(article_id))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn delete(&self, id: CommentId) -> DomainResult<()> {
        // replies go with their parent through the self-referencing cascade
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("comment not found".into()));
        }
        Ok(())
    }

    async fn set_approval(
        &self,
        ids: &[CommentId],
        approved: bool,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let ids: Vec<i64> = ids.iter().copied().map(i64::from).collect();

        let result = sqlx::query(
            "UPDATE comments SET is_approved = $1, updated_at = $2 WHERE id = ANY($3)",
        )
        .bind(approved)
        .bind(updated_at)
        .bind(&ids)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(result.rows_affected())
    }
}

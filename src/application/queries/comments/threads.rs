use super::CommentQueryService;
use crate::{
    application::{
        dto::CommentThreadDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{ArticleId, ArticleSlug},
        comment::{CommentRepository, assemble_threads},
    },
};

pub struct ListCommentThreadsQuery {
    pub article_slug: String,
}

/// Approved root comments of an article with their approved direct replies.
pub(crate) async fn load_threads(
    repo: &dyn CommentRepository,
    article_id: ArticleId,
) -> ApplicationResult<Vec<CommentThreadDto>> {
    let approved = repo.list_approved_by_article(article_id).await?;
    Ok(assemble_threads(approved)
        .into_iter()
        .map(Into::into)
        .collect())
}

impl CommentQueryService {
    pub async fn list_threads(
        &self,
        query: ListCommentThreadsQuery,
    ) -> ApplicationResult<Vec<CommentThreadDto>> {
        let article_id = self.published_article_id(&query.article_slug).await?;
        load_threads(self.comment_repo.as_ref(), article_id).await
    }

    /// Approved comments on the article at any depth.
    pub async fn count_comments(&self, article_slug: &str) -> ApplicationResult<u64> {
        let article_id = self.published_article_id(article_slug).await?;
        Ok(self.comment_repo.count_approved(article_id).await?)
    }

    async fn published_article_id(&self, slug: &str) -> ApplicationResult<ArticleId> {
        let slug = ArticleSlug::new(slug)
            .map_err(|_| ApplicationError::not_found("article not found"))?;
        self.article_repo
            .find_by_slug(&slug)
            .await?
            .filter(|article| article.published)
            .map(|article| article.id)
            .ok_or_else(|| ApplicationError::not_found("article not found"))
    }
}

// src/application/commands/articles/view.rs
use super::ArticleCommandService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::ArticleSlug,
};

pub struct RecordArticleViewCommand {
    pub slug: String,
}

impl ArticleCommandService {
    /// Open a published article for reading, counting exactly one view.
    pub async fn record_view(
        &self,
        command: RecordArticleViewCommand,
    ) -> ApplicationResult<ArticleDto> {
        let slug = ArticleSlug::new(command.slug)
            .map_err(|_| ApplicationError::not_found("article not found"))?;
        let mut article = self
            .read_repo
            .find_by_slug(&slug)
            .await?
            .filter(|article| article.published)
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        article.views = self.write_repo.increment_views(article.id).await?;
        tracing::debug!(article_id = %article.id, views = article.views, "article viewed");

        Ok(article.into())
    }
}

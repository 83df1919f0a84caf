// src/application/commands/articles/delete.rs
use super::ArticleCommandService;
use crate::{
    application::{
        commands::capability::{ensure_capability, require_actor},
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::ArticleSlug,
};

pub struct DeleteArticleCommand {
    pub slug: String,
}

impl ArticleCommandService {
    /// Remove an article; its comments go with it.
    pub async fn delete_article(
        &self,
        actor: Option<&AuthenticatedUser>,
        command: DeleteArticleCommand,
    ) -> ApplicationResult<()> {
        let actor = require_actor(actor)?;
        ensure_capability(actor, "articles", "delete")?;

        let slug = ArticleSlug::new(command.slug)
            .map_err(|_| ApplicationError::not_found("article not found"))?;
        let article = self
            .read_repo
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        self.write_repo.delete(article.id).await?;
        tracing::info!(article_id = %article.id, user_id = %actor.id, "article deleted");
        Ok(())
    }
}

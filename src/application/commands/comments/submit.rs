// src/application/commands/comments/submit.rs
use super::{
    CommentCommandService,
    form::{CommentForm, validate_comment_form},
};
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, CommentDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{Article, ArticleSlug},
        comment::{CommentId, NewComment},
    },
};

pub struct SubmitCommentCommand {
    pub article_slug: String,
    pub form: CommentForm,
}

impl CommentCommandService {
    /// Validate and store a new comment on a published article.
    ///
    /// Checks run in this order: the article must be published, must accept
    /// comments, the caller must be signed in and hold `comments:create`, and
    /// the form must validate.
    /// A parent that cannot be resolved within the same article is dropped and
    /// the comment is stored as a root.
    pub async fn submit_comment(
        &self,
        actor: Option<&AuthenticatedUser>,
        command: SubmitCommentCommand,
    ) -> ApplicationResult<CommentDto> {
        let article = self.find_published(&command.article_slug).await?;

        if !article.comments_enabled {
            tracing::info!(article_id = %article.id, "comment rejected: comments disabled");
            return Err(ApplicationError::forbidden(
                "comments are disabled for this article",
            ));
        }

        let actor = actor.ok_or_else(|| {
            ApplicationError::unauthorized("you must be signed in to comment")
        })?;
        ensure_capability(actor, "comments", "create")?;

        let validated = validate_comment_form(&command.form, self.policy.max_length)
            .map_err(ApplicationError::InvalidForm)?;

        let parent_id = self.resolve_parent(&article, validated.parent).await?;
        let now = self.clock.now();

        let created = self
            .comment_repo
            .insert(NewComment {
                article_id: article.id,
                author_id: actor.id,
                author_name: actor.username.clone(),
                parent_id,
                content: validated.content,
                is_approved: true,
                created_at: now,
                updated_at: now,
            })
            .await?;

        tracing::info!(
            article_id = %article.id,
            comment_id = %created.id,
            user_id = %actor.id,
            reply = created.is_reply(),
            "comment stored"
        );

        Ok(created.into())
    }

    pub(super) async fn find_published(&self, slug: &str) -> ApplicationResult<Article> {
        let slug = ArticleSlug::new(slug)
            .map_err(|_| ApplicationError::not_found("article not found"))?;
        self.article_repo
            .find_by_slug(&slug)
            .await?
            .filter(|article| article.published)
            .ok_or_else(|| ApplicationError::not_found("article not found"))
    }

    async fn resolve_parent(
        &self,
        article: &Article,
        requested: Option<CommentId>,
    ) -> ApplicationResult<Option<CommentId>> {
        let Some(parent_id) = requested else {
            return Ok(None);
        };

        let parent = self
            .comment_repo
            .find_in_article(parent_id, article.id)
            .await?;

        if parent.is_none() {
            tracing::debug!(
                article_id = %article.id,
                parent_id = %parent_id,
                "parent not found in article; storing as root comment"
            );
        }

        Ok(parent.map(|comment| comment.id))
    }
}

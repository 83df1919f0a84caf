// src/application/commands/comments/delete.rs
use super::CommentCommandService;
use crate::{
    application::{
        dto::{AuthenticatedUser, DeletedCommentDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::comment::{Comment, CommentId, specifications::CanDeleteCommentSpec},
};

pub struct DeleteCommentCommand {
    pub id: i64,
}

impl CommentCommandService {
    /// Delete a comment and its replies.
    pub async fn delete_comment(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteCommentCommand,
    ) -> ApplicationResult<DeletedCommentDto> {
        let comment = self.deletable_comment(actor, command.id).await?;
        let id = comment.id;

        let article_slug = self
            .article_repo
            .find_by_id(comment.article_id)
            .await?
            .map(|article| article.slug.into_inner());

        self.comment_repo.delete(id).await?;
        tracing::info!(
            comment_id = %id,
            article_id = %comment.article_id,
            user_id = %actor.id,
            "comment deleted"
        );

        Ok(DeletedCommentDto {
            comment_id: id.into(),
            article_id: comment.article_id.into(),
            article_slug,
        })
    }

    /// Error for a delete attempted through a read-only request.
    ///
    /// Resolution and authorization still run first, so a stranger gets
    /// `Forbidden` and only the author or a moderator gets `MethodNotAllowed`.
    pub async fn refuse_read_only_delete(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationError {
        match self.deletable_comment(actor, id).await {
            Ok(_) => ApplicationError::method_not_allowed(
                "comments can only be deleted with a state-changing request",
            ),
            Err(err) => err,
        }
    }

    async fn deletable_comment(
        &self,
        actor: &AuthenticatedUser,
        raw_id: i64,
    ) -> ApplicationResult<Comment> {
        let id =
            CommentId::new(raw_id).map_err(|_| ApplicationError::not_found("comment not found"))?;
        let comment = self
            .comment_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("comment not found"))?;

        let delete_spec = CanDeleteCommentSpec::new(&actor.capabilities, &comment, actor.id);
        if !delete_spec.is_satisfied() {
            tracing::warn!(comment_id = %id, user_id = %actor.id, "comment deletion refused");
            return Err(ApplicationError::forbidden(
                "you do not have permission to delete this comment",
            ));
        }
        Ok(comment)
    }
}

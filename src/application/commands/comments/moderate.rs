// src/application/commands/comments/moderate.rs
use super::CommentCommandService;
use crate::{
    application::{
        commands::capability::{ensure_capability, require_actor},
        dto::{AuthenticatedUser, ModerationResultDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::comment::CommentId,
};

/// Bulk approve or unapprove comments.
pub struct SetCommentApprovalCommand {
    pub ids: Vec<i64>,
    pub approved: bool,
}

impl CommentCommandService {
    pub async fn set_comment_approval(
        &self,
        actor: Option<&AuthenticatedUser>,
        command: SetCommentApprovalCommand,
    ) -> ApplicationResult<ModerationResultDto> {
        let actor = require_actor(actor)?;
        ensure_capability(actor, "comments", "moderate")?;

        if command.ids.is_empty() {
            return Err(ApplicationError::validation(
                "at least one comment id is required",
            ));
        }

        let mut ids = command
            .ids
            .into_iter()
            .map(CommentId::new)
            .collect::<Result<Vec<_>, _>>()?;
        ids.sort();
        ids.dedup();

        let updated = self
            .comment_repo
            .set_approval(&ids, command.approved, self.clock.now())
            .await?;

        tracing::info!(
            user_id = %actor.id,
            approved = command.approved,
            requested = ids.len(),
            updated,
            "comment approval changed"
        );

        Ok(ModerationResultDto {
            approved: command.approved,
            updated,
        })
    }
}

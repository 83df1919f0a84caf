// src/domain/comment/specifications.rs
use std::collections::HashSet;

use crate::domain::comment::entity::Comment;
use crate::domain::user::value_objects::{Capability, UserId};

/// A comment may be removed by its author or by anyone holding `comments:delete:any`.
pub struct CanDeleteCommentSpec<'a> {
    capabilities: &'a HashSet<Capability>,
    comment: &'a Comment,
    user_id: UserId,
}

impl<'a> CanDeleteCommentSpec<'a> {
    pub fn new(
        capabilities: &'a HashSet<Capability>,
        comment: &'a Comment,
        user_id: UserId,
    ) -> Self {
        Self {
            capabilities,
            comment,
            user_id,
        }
    }

    pub fn is_satisfied(&self) -> bool {
        self.comment.author_id == self.user_id || self.has_capability("comments", "delete:any")
    }

    fn has_capability(&self, resource: &str, action: &str) -> bool {
        self.capabilities
            .iter()
            .any(|cap| cap.matches(resource, action))
    }
}

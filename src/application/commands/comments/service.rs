// src/application/commands/comments/service.rs
use std::sync::Arc;

use crate::{
    application::ports::time::Clock,
    domain::{article::ArticleReadRepository, comment::CommentRepository},
};

/// Tunables for comment submission.
#[derive(Debug, Clone, Copy)]
pub struct CommentPolicy {
    pub max_length: usize,
}

impl Default for CommentPolicy {
    fn default() -> Self {
        Self { max_length: 5000 }
    }
}

pub struct CommentCommandService {
    pub(super) article_repo: Arc<dyn ArticleReadRepository>,
    pub(super) comment_repo: Arc<dyn CommentRepository>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) policy: CommentPolicy,
}

impl CommentCommandService {
    pub fn new(
        article_repo: Arc<dyn ArticleReadRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        clock: Arc<dyn Clock>,
        policy: CommentPolicy,
    ) -> Self {
        Self {
            article_repo,
            comment_repo,
            clock,
            policy,
        }
    }
}

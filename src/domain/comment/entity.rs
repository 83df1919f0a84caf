// src/domain/comment/entity.rs
use std::collections::BTreeMap;

use crate::domain::article::ArticleId;
use crate::domain::comment::value_objects::{CommentContent, CommentId};
use crate::domain::user::{UserId, Username};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub article_id: ArticleId,
    pub author_id: UserId,
    pub author_name: Username,
    pub parent_id: Option<CommentId>,
    pub content: CommentContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_approved: bool,
}

impl Comment {
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub article_id: ArticleId,
    pub author_id: UserId,
    pub author_name: Username,
    pub parent_id: Option<CommentId>,
    pub content: CommentContent,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A root comment and its direct replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentThread {
    pub root: Comment,
    pub replies: Vec<Comment>,
}

/// Groups approved comments into display threads.
///
/// Only roots and their direct replies surface. A reply to a reply stays in
/// storage but is not part of any thread, and replies under a hidden root are
/// hidden with it. Roots and replies are ordered by creation time, then id.
pub fn assemble_threads(mut comments: Vec<Comment>) -> Vec<CommentThread> {
    comments.sort_by_key(|c| (c.created_at, c.id));

    let mut threads: BTreeMap<CommentId, usize> = BTreeMap::new();
    let mut ordered: Vec<CommentThread> = Vec::new();
    let mut replies: Vec<Comment> = Vec::new();

    for comment in comments {
        if comment.is_root() {
            threads.insert(comment.id, ordered.len());
            ordered.push(CommentThread {
                root: comment,
                replies: Vec::new(),
            });
        } else {
            replies.push(comment);
        }
    }

    for reply in replies {
        let slot = reply.parent_id.and_then(|parent| threads.get(&parent)).copied();
        if let Some(index) = slot {
            ordered[index].replies.push(reply);
        }
    }

    ordered
}

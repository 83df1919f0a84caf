// src/application/queries/comments/mod.rs
mod service;
mod threads;

pub use service::CommentQueryService;
pub use threads::ListCommentThreadsQuery;
pub(crate) use threads::load_threads;

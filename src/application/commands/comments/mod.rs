// src/application/commands/comments/mod.rs
mod delete;
mod form;
mod moderate;
mod service;
mod submit;

pub use delete::DeleteCommentCommand;
pub use form::{CommentForm, ValidatedComment, validate_comment_form};
pub use moderate::SetCommentApprovalCommand;
pub use service::{CommentCommandService, CommentPolicy};
pub use submit::SubmitCommentCommand;

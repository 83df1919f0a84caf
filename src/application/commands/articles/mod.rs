// src/application/commands/articles/mod.rs
mod create;
mod delete;
mod service;
mod view;

pub use create::{ArticleBlockInput, CreateArticleCommand, CreateArticleCommandBuilder};
pub use delete::DeleteArticleCommand;
pub use service::ArticleCommandService;
pub use view::RecordArticleViewCommand;

// src/infrastructure/repositories/mod.rs
mod error;
mod memory;
mod postgres_article;
mod postgres_comment;
mod postgres_taxonomy;

pub use error::map_sqlx;
pub use memory::InMemoryStore;
pub use postgres_article::{PostgresArticleReadRepository, PostgresArticleWriteRepository};
pub use postgres_comment::PostgresCommentRepository;
pub use postgres_taxonomy::{PostgresCategoryRepository, PostgresTagRepository};

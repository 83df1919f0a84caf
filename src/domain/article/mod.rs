// src/domain/article/mod.rs
pub mod entity;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use entity::{Article, ArticleBlock, ArticleFilter, NewArticle};
pub use repository::{ArticleReadRepository, ArticleWriteRepository};
pub use value_objects::{ArticleId, ArticleSlug, ArticleTitle, BlockKind};

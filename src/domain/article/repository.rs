// src/domain/article/repository.rs
use crate::domain::article::entity::{Article, ArticleFilter, NewArticle};
use crate::domain::article::value_objects::{ArticleId, ArticleSlug};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait ArticleWriteRepository: Send + Sync {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article>;
    /// Atomically bumps the view counter and returns the new value.
    async fn increment_views(&self, id: ArticleId) -> DomainResult<u64>;
    /// Removes the article together with its blocks, tag links and comments.
    async fn delete(&self, id: ArticleId) -> DomainResult<()>;
}

#[async_trait]
pub trait ArticleReadRepository: Send + Sync {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>>;
    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>>;
    /// Number of published articles matching `filter`.
    async fn count_published(&self, filter: ArticleFilter) -> DomainResult<u64>;
    /// Published articles matching `filter`, newest first.
    async fn list_published(
        &self,
        filter: ArticleFilter,
        limit: u32,
        offset: u64,
    ) -> DomainResult<Vec<Article>>;
    /// Published articles ordered by views descending, skipping `exclude`.
    async fn list_popular(&self, exclude: ArticleId, limit: u32) -> DomainResult<Vec<Article>>;
}

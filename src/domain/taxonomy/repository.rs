// src/domain/taxonomy/repository.rs
use crate::domain::errors::DomainResult;
use crate::domain::taxonomy::entity::{Category, NewCategory, NewTag, Tag};
use crate::domain::taxonomy::value_objects::TaxonomySlug;
use async_trait::async_trait;

#[async_trait]
pub trait TagRepository: Send + Sync {
    /// All tags ordered by name.
    async fn list_all(&self) -> DomainResult<Vec<Tag>>;
    async fn find_by_slug(&self, slug: &TaxonomySlug) -> DomainResult<Option<Tag>>;
    async fn insert(&self, tag: NewTag) -> DomainResult<Tag>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by name.
    async fn list_all(&self) -> DomainResult<Vec<Category>>;
    async fn find_by_slug(&self, slug: &TaxonomySlug) -> DomainResult<Option<Category>>;
    async fn insert(&self, category: NewCategory) -> DomainResult<Category>;
}

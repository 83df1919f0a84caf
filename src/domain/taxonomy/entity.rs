// src/domain/taxonomy/entity.rs
use crate::domain::taxonomy::value_objects::{
    CategoryId, CategoryName, TagColor, TagId, TagName, TaxonomySlug,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub name: TagName,
    pub slug: TaxonomySlug,
    pub color: TagColor,
}

#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: TagName,
    pub slug: TaxonomySlug,
    pub color: TagColor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub slug: TaxonomySlug,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: CategoryName,
    pub slug: TaxonomySlug,
}

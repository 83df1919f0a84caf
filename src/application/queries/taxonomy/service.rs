use std::sync::Arc;

use crate::{
    application::{
        dto::{CategoryDto, TagDto},
        error::ApplicationResult,
    },
    domain::taxonomy::{CategoryRepository, TagRepository},
};

pub struct TaxonomyQueryService {
    tag_repo: Arc<dyn TagRepository>,
    category_repo: Arc<dyn CategoryRepository>,
}

impl TaxonomyQueryService {
    pub fn new(
        tag_repo: Arc<dyn TagRepository>,
        category_repo: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            tag_repo,
            category_repo,
        }
    }

    pub async fn list_tags(&self) -> ApplicationResult<Vec<TagDto>> {
        let tags = self.tag_repo.list_all().await?;
        Ok(tags.into_iter().map(Into::into).collect())
    }

    pub async fn list_categories(&self) -> ApplicationResult<Vec<CategoryDto>> {
        let categories = self.category_repo.list_all().await?;
        Ok(categories.into_iter().map(Into::into).collect())
    }
}

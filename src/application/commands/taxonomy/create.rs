// src/application/commands/taxonomy/create.rs
use super::TaxonomyCommandService;
use crate::{
    application::{
        commands::capability::{ensure_capability, require_actor},
        dto::{AuthenticatedUser, CategoryDto, TagDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        slug::clip_slug,
        taxonomy::{CategoryName, NewCategory, NewTag, TagColor, TagName, TaxonomySlug},
    },
};

pub struct CreateTagCommand {
    pub name: String,
    pub color: Option<String>,
}

pub struct CreateCategoryCommand {
    pub name: String,
}

impl TaxonomyCommandService {
    pub async fn create_tag(
        &self,
        actor: Option<&AuthenticatedUser>,
        command: CreateTagCommand,
    ) -> ApplicationResult<TagDto> {
        let actor = require_actor(actor)?;
        ensure_capability(actor, "tags", "create")?;

        let name = TagName::new(command.name)?;
        let color = match command.color.filter(|value| !value.trim().is_empty()) {
            Some(value) => TagColor::new(value)?,
            None => TagColor::default(),
        };
        let slug = self.slug_for(name.as_str())?;

        if self.tag_repo.find_by_slug(&slug).await?.is_some() {
            return Err(ApplicationError::conflict(format!(
                "tag '{slug}' already exists"
            )));
        }

        let tag = self.tag_repo.insert(NewTag { name, slug, color }).await?;
        tracing::info!(tag = %tag.slug, user_id = %actor.id, "tag created");
        Ok(tag.into())
    }

    pub async fn create_category(
        &self,
        actor: Option<&AuthenticatedUser>,
        command: CreateCategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        let actor = require_actor(actor)?;
        ensure_capability(actor, "categories", "create")?;

        let name = CategoryName::new(command.name)?;
        let slug = self.slug_for(name.as_str())?;

        if self.category_repo.find_by_slug(&slug).await?.is_some() {
            return Err(ApplicationError::conflict(format!(
                "category '{slug}' already exists"
            )));
        }

        let category = self
            .category_repo
            .insert(NewCategory { name, slug })
            .await?;
        tracing::info!(category = %category.slug, user_id = %actor.id, "category created");
        Ok(category.into())
    }

    fn slug_for(&self, name: &str) -> ApplicationResult<TaxonomySlug> {
        let slug = self.slugger.slugify(name);
        let slug = clip_slug(&slug, TaxonomySlug::MAX_LEN);
        if slug.is_empty() {
            return Err(ApplicationError::validation(format!(
                "'{name}' does not produce a usable slug"
            )));
        }
        Ok(TaxonomySlug::new(slug)?)
    }
}

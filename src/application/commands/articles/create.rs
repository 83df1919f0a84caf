// src/application/commands/articles/create.rs
use super::ArticleCommandService;
use crate::{
    application::{
        commands::capability::{ensure_capability, require_actor},
        dto::{ArticleDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{ArticleBlock, ArticleTitle, BlockKind, NewArticle, entity::sort_blocks},
        taxonomy::{Category, Tag, TaxonomySlug},
    },
};

#[derive(Debug, Clone)]
pub struct ArticleBlockInput {
    pub block_type: String,
    pub content: String,
    pub image: Option<String>,
    pub image_caption: String,
    /// Position within the body; defaults to the input index.
    pub order: Option<u32>,
}

impl ArticleBlockInput {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            block_type: BlockKind::Text.as_str().to_string(),
            content: content.into(),
            image: None,
            image_caption: String::new(),
            order: None,
        }
    }
}

pub struct CreateArticleCommand {
    pub title: String,
    pub blocks: Vec<ArticleBlockInput>,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub publish: bool,
    pub comments_enabled: bool,
}

impl CreateArticleCommand {
    pub fn builder() -> CreateArticleCommandBuilder {
        CreateArticleCommandBuilder::default()
    }
}

pub struct CreateArticleCommandBuilder {
    title: Option<String>,
    blocks: Vec<ArticleBlockInput>,
    tags: Vec<String>,
    category: Option<String>,
    publish: bool,
    comments_enabled: bool,
}

impl Default for CreateArticleCommandBuilder {
    fn default() -> Self {
        Self {
            title: None,
            blocks: Vec::new(),
            tags: Vec::new(),
            category: None,
            publish: true,
            comments_enabled: true,
        }
    }
}

impl CreateArticleCommandBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn block(mut self, block: ArticleBlockInput) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn text(self, content: impl Into<String>) -> Self {
        self.block(ArticleBlockInput::text(content))
    }

    pub fn tag(mut self, slug: impl Into<String>) -> Self {
        self.tags.push(slug.into());
        self
    }

    pub fn category(mut self, slug: impl Into<String>) -> Self {
        self.category = Some(slug.into());
        self
    }

    pub fn publish(mut self, publish: bool) -> Self {
        self.publish = publish;
        self
    }

    pub fn comments_enabled(mut self, enabled: bool) -> Self {
        self.comments_enabled = enabled;
        self
    }

    pub fn build(self) -> Result<CreateArticleCommand, &'static str> {
        Ok(CreateArticleCommand {
            title: self.title.ok_or("title is required")?,
            blocks: self.blocks,
            tags: self.tags,
            category: self.category,
            publish: self.publish,
            comments_enabled: self.comments_enabled,
        })
    }
}

impl ArticleCommandService {
    pub async fn create_article(
        &self,
        actor: Option<&AuthenticatedUser>,
        command: CreateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let actor = require_actor(actor)?;
        ensure_capability(actor, "articles", "create")?;

        let title = ArticleTitle::new(command.title)?;
        let blocks = build_blocks(command.blocks)?;
        let tags = self.resolve_tags(&command.tags).await?;
        let category = self.resolve_category(command.category.as_deref()).await?;
        let now = self.clock.now();

        let slug = self.slug_service.generate_unique_slug(&title, now).await?;

        let new_article = NewArticle {
            title,
            slug,
            blocks,
            published: command.publish,
            comments_enabled: command.comments_enabled,
            author_id: actor.id,
            author_name: actor.username.clone(),
            category,
            tags,
            created_at: now,
            updated_at: now,
        };

        let created = self.write_repo.insert(new_article).await?;
        tracing::info!(article_id = %created.id, slug = %created.slug, "article created");
        Ok(created.into())
    }

    async fn resolve_tags(&self, slugs: &[String]) -> ApplicationResult<Vec<Tag>> {
        let mut tags: Vec<Tag> = Vec::with_capacity(slugs.len());
        for raw in slugs {
            let slug = TaxonomySlug::new(raw.as_str())?;
            let tag = self
                .tag_repo
                .find_by_slug(&slug)
                .await?
                .ok_or_else(|| ApplicationError::validation(format!("unknown tag '{raw}'")))?;
            if !tags.iter().any(|existing| existing.id == tag.id) {
                tags.push(tag);
            }
        }
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn resolve_category(&self, raw: Option<&str>) -> ApplicationResult<Option<Category>> {
        let Some(raw) = raw.filter(|value| !value.trim().is_empty()) else {
            return Ok(None);
        };
        let slug = TaxonomySlug::new(raw)?;
        let category = self
            .category_repo
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| ApplicationError::validation(format!("unknown category '{raw}'")))?;
        Ok(Some(category))
    }
}

fn build_blocks(inputs: Vec<ArticleBlockInput>) -> ApplicationResult<Vec<ArticleBlock>> {
    let mut blocks = inputs
        .into_iter()
        .enumerate()
        .map(|(index, input)| {
            let kind: BlockKind = input.block_type.parse()?;
            let order = input
                .order
                .unwrap_or_else(|| u32::try_from(index).unwrap_or(u32::MAX));
            ArticleBlock::new(kind, input.content, input.image, input.image_caption, order)
        })
        .collect::<Result<Vec<_>, _>>()?;
    sort_blocks(&mut blocks);
    Ok(blocks)
}

use crate::application::dto::{CategoryDto, CommentThreadDto, TagDto};
use crate::domain::article::{Article, ArticleBlock};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArticleBlockDto {
    pub block_type: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub image_caption: String,
    pub order: u32,
}

impl From<ArticleBlock> for ArticleBlockDto {
    fn from(block: ArticleBlock) -> Self {
        Self {
            block_type: block.kind.as_str().to_string(),
            content: block.content,
            image: block.image,
            image_caption: block.image_caption,
            order: block.order,
        }
    }
}

/// Listing representation without the body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleSummaryDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub author_id: i64,
    pub author: String,
    pub views: u64,
    pub comments_enabled: bool,
    pub comments_count: u64,
    #[serde(default)]
    pub category: Option<CategoryDto>,
    pub tags: Vec<TagDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ArticleSummaryDto {
    pub fn from_article(article: Article, comments_count: u64) -> Self {
        Self {
            id: article.id.into(),
            title: article.title.into_inner(),
            slug: article.slug.into_inner(),
            author_id: article.author_id.into(),
            author: article.author_name.into_inner(),
            views: article.views,
            comments_enabled: article.comments_enabled,
            comments_count,
            category: article.category.map(Into::into),
            tags: article.tags.into_iter().map(Into::into).collect(),
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub blocks: Vec<ArticleBlockDto>,
    pub published: bool,
    pub views: u64,
    pub comments_enabled: bool,
    pub author_id: i64,
    pub author: String,
    #[serde(default)]
    pub category: Option<CategoryDto>,
    pub tags: Vec<TagDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Article> for ArticleDto {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.into(),
            title: article.title.into_inner(),
            slug: article.slug.into_inner(),
            blocks: article.blocks.into_iter().map(Into::into).collect(),
            published: article.published,
            views: article.views,
            comments_enabled: article.comments_enabled,
            author_id: article.author_id.into(),
            author: article.author_name.into_inner(),
            category: article.category.map(Into::into),
            tags: article.tags.into_iter().map(Into::into).collect(),
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

/// Everything the article page shows.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleDetailDto {
    pub article: ArticleDto,
    pub popular_articles: Vec<ArticleSummaryDto>,
    pub comments: Vec<CommentThreadDto>,
    pub comments_count: u64,
}

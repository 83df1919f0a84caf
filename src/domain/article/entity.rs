// src/domain/article/entity.rs
use crate::domain::article::value_objects::{ArticleId, ArticleSlug, ArticleTitle, BlockKind};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::taxonomy::{Category, CategoryId, Tag, TagId};
use crate::domain::user::{UserId, Username};
use chrono::{DateTime, Utc};

const CAPTION_MAX: usize = 300;

/// One ordered piece of an article body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleBlock {
    pub kind: BlockKind,
    pub content: String,
    pub image: Option<String>,
    pub image_caption: String,
    pub order: u32,
}

impl ArticleBlock {
    pub fn new(
        kind: BlockKind,
        content: impl Into<String>,
        image: Option<String>,
        image_caption: impl Into<String>,
        order: u32,
    ) -> DomainResult<Self> {
        let content = content.into();
        let image_caption = image_caption.into();
        let image = image.filter(|path| !path.trim().is_empty());

        if image_caption.chars().count() > CAPTION_MAX {
            return Err(DomainError::Validation(format!(
                "image caption must be at most {CAPTION_MAX} characters long"
            )));
        }
        if kind == BlockKind::Image && image.is_none() {
            return Err(DomainError::Validation(
                "image blocks require an image path".into(),
            ));
        }

        Ok(Self {
            kind,
            content,
            image,
            image_caption,
            order,
        })
    }

    pub fn text(content: impl Into<String>, order: u32) -> DomainResult<Self> {
        Self::new(BlockKind::Text, content, None, "", order)
    }
}

/// Stable sort by order key so equal keys keep their insertion order.
pub fn sort_blocks(blocks: &mut [ArticleBlock]) {
    blocks.sort_by_key(|block| block.order);
}

#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub blocks: Vec<ArticleBlock>,
    pub published: bool,
    pub views: u64,
    pub comments_enabled: bool,
    pub author_id: UserId,
    pub author_name: Username,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub fn has_tag(&self, tag: TagId) -> bool {
        self.tags.iter().any(|t| t.id == tag)
    }

    pub fn in_category(&self, category: CategoryId) -> bool {
        self.category.as_ref().is_some_and(|c| c.id == category)
    }

    pub fn matches(&self, filter: &ArticleFilter) -> bool {
        filter.tag.is_none_or(|tag| self.has_tag(tag))
            && filter.category.is_none_or(|category| self.in_category(category))
    }
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub blocks: Vec<ArticleBlock>,
    pub published: bool,
    pub comments_enabled: bool,
    pub author_id: UserId,
    pub author_name: Username,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    pub tag: Option<TagId>,
    pub category: Option<CategoryId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::taxonomy::{CategoryName, TagColor, TagName, TaxonomySlug};

    fn tag(id: i64, name: &str) -> Tag {
        Tag {
            id: TagId::new(id).unwrap(),
            name: TagName::new(name).unwrap(),
            slug: TaxonomySlug::new(name).unwrap(),
            color: TagColor::default(),
        }
    }

    fn sample_article() -> Article {
        Article {
            id: ArticleId::new(1).unwrap(),
            title: ArticleTitle::new("title").unwrap(),
            slug: ArticleSlug::new("title").unwrap(),
            blocks: vec![],
            published: true,
            views: 0,
            comments_enabled: true,
            author_id: UserId::new(1).unwrap(),
            author_name: Username::new("editor").unwrap(),
            category: Some(Category {
                id: CategoryId::new(4).unwrap(),
                name: CategoryName::new("Reviews").unwrap(),
                slug: TaxonomySlug::new("reviews").unwrap(),
            }),
            tags: vec![tag(1, "rpg"), tag(2, "indie")],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn image_block_requires_path() {
        assert!(ArticleBlock::new(BlockKind::Image, "", None, "caption", 0).is_err());
        assert!(ArticleBlock::new(BlockKind::Image, "", Some("  ".into()), "", 0).is_err());
        let block =
            ArticleBlock::new(BlockKind::Image, "", Some("a/b.png".into()), "caption", 1).unwrap();
        assert_eq!(block.image.as_deref(), Some("a/b.png"));
    }

    #[test]
    fn caption_is_bounded() {
        let long = "c".repeat(301);
        assert!(ArticleBlock::new(BlockKind::Text, "body", None, long, 0).is_err());
    }

    #[test]
    fn sort_blocks_is_stable_on_order_key() {
        let mut blocks = vec![
            ArticleBlock::text("second", 2).unwrap(),
            ArticleBlock::text("first-a", 1).unwrap(),
            ArticleBlock::text("first-b", 1).unwrap(),
        ];
        sort_blocks(&mut blocks);
        let contents: Vec<_> = blocks.iter().map(|b| b.content.as_str()).collect();
        assert_eq!(contents, ["first-a", "first-b", "second"]);
    }

    #[test]
    fn filter_matches_tag_and_category() {
        let article = sample_article();
        assert!(article.matches(&ArticleFilter::default()));
        assert!(article.matches(&ArticleFilter {
            tag: Some(TagId(2)),
            category: Some(CategoryId(4)),
        }));
        assert!(!article.matches(&ArticleFilter {
            tag: Some(TagId(3)),
            category: None,
        }));
        assert!(!article.matches(&ArticleFilter {
            tag: None,
            category: Some(CategoryId(5)),
        }));
    }
}

// src/infrastructure/repositories/memory.rs
//! Process-local storage backend. Data lives as long as the store does.
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::article::{
    Article, ArticleFilter, ArticleId, ArticleReadRepository, ArticleSlug, ArticleWriteRepository,
    NewArticle,
};
use crate::domain::comment::{Comment, CommentId, CommentRepository, NewComment};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::taxonomy::{
    Category, CategoryId, CategoryRepository, NewCategory, NewTag, Tag, TagId, TagRepository,
    TaxonomySlug,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Default)]
struct Tables {
    articles: BTreeMap<i64, Article>,
    comments: BTreeMap<i64, Comment>,
    tags: BTreeMap<i64, Tag>,
    categories: BTreeMap<i64, Category>,
    next_article: i64,
    next_comment: i64,
    next_tag: i64,
    next_category: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

impl Tables {
    /// Ids of `root` and every comment that descends from it.
    fn comment_subtree(&self, root: i64) -> Vec<i64> {
        let mut doomed = vec![root];
        let mut cursor = 0;
        while cursor < doomed.len() {
            let parent = doomed[cursor];
            doomed.extend(
                self.comments
                    .values()
                    .filter(|c| c.parent_id.map(i64::from) == Some(parent))
                    .map(|c| i64::from(c.id)),
            );
            cursor += 1;
        }
        doomed
    }
}

/// Implements every repository port over shared maps keyed by id.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> DomainResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| DomainError::Persistence("in-memory store poisoned".into()))
    }
}

fn newest_first(a: &Article, b: &Article) -> std::cmp::Ordering {
    (b.created_at, b.id).cmp(&(a.created_at, a.id))
}

#[async_trait]
impl ArticleWriteRepository for InMemoryStore {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let mut tables = self.tables()?;
        if tables
            .articles
            .values()
            .any(|existing| existing.slug == article.slug)
        {
            return Err(DomainError::Conflict("slug already exists".into()));
        }

        let id = next_id(&mut tables.next_article);
        let stored = Article {
            id: ArticleId(id),
            title: article.title,
            slug: article.slug,
            blocks: article.blocks,
            published: article.published,
            views: 0,
            comments_enabled: article.comments_enabled,
            author_id: article.author_id,
            author_name: article.author_name,
            category: article.category,
            tags: article.tags,
            created_at: article.created_at,
            updated_at: article.updated_at,
        };
        tables.articles.insert(id, stored.clone());
        Ok(stored)
    }

    async fn increment_views(&self, id: ArticleId) -> DomainResult<u64> {
        let mut tables = self.tables()?;
        let article = tables
            .articles
            .get_mut(&i64::from(id))
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        article.views += 1;
        Ok(article.views)
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let mut tables = self.tables()?;
        if tables.articles.remove(&i64::from(id)).is_none() {
            return Err(DomainError::NotFound("article not found".into()));
        }
        tables.comments.retain(|_, comment| comment.article_id != id);
        Ok(())
    }
}

#[async_trait]
impl ArticleReadRepository for InMemoryStore {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        Ok(self.tables()?.articles.get(&i64::from(id)).cloned())
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        Ok(self
            .tables()?
            .articles
            .values()
            .find(|article| &article.slug == slug)
            .cloned())
    }

    async fn count_published(&self, filter: ArticleFilter) -> DomainResult<u64> {
        let tables = self.tables()?;
        let total = tables
            .articles
            .values()
            .filter(|article| article.published && article.matches(&filter))
            .count();
        Ok(total as u64)
    }

    async fn list_published(
        &self,
        filter: ArticleFilter,
        limit: u32,
        offset: u64,
    ) -> DomainResult<Vec<Article>> {
        let tables = self.tables()?;
        let mut matching: Vec<&Article> = tables
            .articles
            .values()
            .filter(|article| article.published && article.matches(&filter))
            .collect();
        matching.sort_by(|a, b| newest_first(a, b));

        Ok(matching
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn list_popular(&self, exclude: ArticleId, limit: u32) -> DomainResult<Vec<Article>> {
        let tables = self.tables()?;
        let mut candidates: Vec<&Article> = tables
            .articles
            .values()
            .filter(|article| article.published && article.id != exclude)
            .collect();
        candidates.sort_by(|a, b| b.views.cmp(&a.views).then_with(|| newest_first(a, b)));
        Ok(candidates
            .into_iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn insert(&self, comment: NewComment) -> DomainResult<Comment> {
        let mut tables = self.tables()?;
        if !tables
            .articles
            .contains_key(&i64::from(comment.article_id))
        {
            return Err(DomainError::NotFound("article not found".into()));
        }
        if let Some(parent) = comment.parent_id {
            if !tables.comments.contains_key(&i64::from(parent)) {
                return Err(DomainError::NotFound("parent comment not found".into()));
            }
        }

        let id = next_id(&mut tables.next_comment);
        let stored = Comment {
            id: CommentId(id),
            article_id: comment.article_id,
            author_id: comment.author_id,
            author_name: comment.author_name,
            parent_id: comment.parent_id,
            content: comment.content,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            is_approved: comment.is_approved,
        };
        tables.comments.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: CommentId) -> DomainResult<Option<Comment>> {
        Ok(self.tables()?.comments.get(&i64::from(id)).cloned())
    }

    async fn find_in_article(
        &self,
        id: CommentId,
        article_id: ArticleId,
    ) -> DomainResult<Option<Comment>> {
        Ok(self
            .tables()?
            .comments
            .get(&i64::from(id))
            .filter(|comment| comment.article_id == article_id)
            .cloned())
    }

    async fn list_approved_by_article(&self, article_id: ArticleId) -> DomainResult<Vec<Comment>> {
        let tables = self.tables()?;
        let mut approved: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.article_id == article_id && c.is_approved)
            .cloned()
            .collect();
        approved.sort_by_key(|c| (c.created_at, c.id));
        Ok(approved)
    }

    async fn count_approved(&self, article_id: ArticleId) -> DomainResult<u64> {
        let tables = self.tables()?;
        Ok(tables
            .comments
            .values()
            .filter(|c| c.article_id == article_id && c.is_approved)
            .count() as u64)
    }

    async fn delete(&self, id: CommentId) -> DomainResult<()> {
        let mut tables = self.tables()?;
        let root = i64::from(id);
        if !tables.comments.contains_key(&root) {
            return Err(DomainError::NotFound("comment not found".into()));
        }
        for doomed in tables.comment_subtree(root) {
            tables.comments.remove(&doomed);
        }
        Ok(())
    }

    async fn set_approval(
        &self,
        ids: &[CommentId],
        approved: bool,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<u64> {
        let mut tables = self.tables()?;
        let mut changed = 0;
        for id in ids {
            if let Some(comment) = tables.comments.get_mut(&i64::from(*id)) {
                comment.is_approved = approved;
                comment.updated_at = updated_at;
                changed += 1;
            }
        }
        Ok(changed)
    }
}

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn list_all(&self) -> DomainResult<Vec<Tag>> {
        let mut tags: Vec<Tag> = self.tables()?.tags.values().cloned().collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn find_by_slug(&self, slug: &TaxonomySlug) -> DomainResult<Option<Tag>> {
        Ok(self
            .tables()?
            .tags
            .values()
            .find(|tag| &tag.slug == slug)
            .cloned())
    }

    async fn insert(&self, tag: NewTag) -> DomainResult<Tag> {
        let mut tables = self.tables()?;
        if tables
            .tags
            .values()
            .any(|existing| existing.slug == tag.slug || existing.name == tag.name)
        {
            return Err(DomainError::Conflict("tag already exists".into()));
        }
        let id = next_id(&mut tables.next_tag);
        let stored = Tag {
            id: TagId(id),
            name: tag.name,
            slug: tag.slug,
            color: tag.color,
        };
        tables.tags.insert(id, stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn list_all(&self) -> DomainResult<Vec<Category>> {
        let mut categories: Vec<Category> =
            self.tables()?.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn find_by_slug(&self, slug: &TaxonomySlug) -> DomainResult<Option<Category>> {
        Ok(self
            .tables()?
            .categories
            .values()
            .find(|category| &category.slug == slug)
            .cloned())
    }

    async fn insert(&self, category: NewCategory) -> DomainResult<Category> {
        let mut tables = self.tables()?;
        if tables
            .categories
            .values()
            .any(|existing| existing.slug == category.slug || existing.name == category.name)
        {
            return Err(DomainError::Conflict("category already exists".into()));
        }
        let id = next_id(&mut tables.next_category);
        let stored = Category {
            id: CategoryId(id),
            name: category.name,
            slug: category.slug,
        };
        tables.categories.insert(id, stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::comment::CommentContent;
    use crate::domain::user::{UserId, Username};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    async fn seed_article(store: &InMemoryStore, slug: &str) -> Article {
        ArticleWriteRepository::insert(
            store,
            NewArticle {
                title: crate::domain::article::ArticleTitle::new(slug).unwrap(),
                slug: ArticleSlug::new(slug).unwrap(),
                blocks: Vec::new(),
                published: true,
                comments_enabled: true,
                author_id: UserId(1),
                author_name: Username::new("editor").unwrap(),
                category: None,
                tags: Vec::new(),
                created_at: now(),
                updated_at: now(),
            },
        )
        .await
        .unwrap()
    }

    async fn seed_comment(
        store: &InMemoryStore,
        article: ArticleId,
        parent: Option<CommentId>,
    ) -> Comment {
        CommentRepository::insert(
            store,
            NewComment {
                article_id: article,
                author_id: UserId(2),
                author_name: Username::new("reader").unwrap(),
                parent_id: parent,
                content: CommentContent::new("hi").unwrap(),
                is_approved: true,
                created_at: now(),
                updated_at: now(),
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn deleting_a_comment_removes_its_whole_subtree() {
        let store = InMemoryStore::new();
        let article = seed_article(&store, "post").await;
        let root = seed_comment(&store, article.id, None).await;
        let reply = seed_comment(&store, article.id, Some(root.id)).await;
        let nested = seed_comment(&store, article.id, Some(reply.id)).await;
        let other = seed_comment(&store, article.id, None).await;

        CommentRepository::delete(&store, root.id).await.unwrap();

        for gone in [root.id, reply.id, nested.id] {
            assert!(CommentRepository::find_by_id(&store, gone).await.unwrap().is_none());
        }
        assert!(CommentRepository::find_by_id(&store, other.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn deleting_an_article_drops_its_comments() {
        let store = InMemoryStore::new();
        let article = seed_article(&store, "post").await;
        let comment = seed_comment(&store, article.id, None).await;

        ArticleWriteRepository::delete(&store, article.id).await.unwrap();

        assert!(CommentRepository::find_by_id(&store, comment.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_article_slug_conflicts() {
        let store = InMemoryStore::new();
        seed_article(&store, "same").await;
        let err = ArticleWriteRepository::insert(
            &store,
            NewArticle {
                title: crate::domain::article::ArticleTitle::new("Same").unwrap(),
                slug: ArticleSlug::new("same").unwrap(),
                blocks: Vec::new(),
                published: true,
                comments_enabled: true,
                author_id: UserId(1),
                author_name: Username::new("editor").unwrap(),
                category: None,
                tags: Vec::new(),
                created_at: now(),
                updated_at: now(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn view_counter_only_grows() {
        let store = InMemoryStore::new();
        let article = seed_article(&store, "post").await;
        assert_eq!(store.increment_views(article.id).await.unwrap(), 1);
        assert_eq!(store.increment_views(article.id).await.unwrap(), 2);
    }
}

// src/infrastructure/repositories/postgres_article.rs
use std::collections::HashMap;

use super::map_sqlx;
use super::postgres_taxonomy::TagRow;
use crate::domain::article::{
    Article, ArticleBlock, ArticleFilter, ArticleId, ArticleReadRepository, ArticleSlug,
    ArticleTitle, ArticleWriteRepository, BlockKind, NewArticle,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::taxonomy::{Category, CategoryId, CategoryName, Tag, TaxonomySlug};
use crate::domain::user::{UserId, Username};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const ARTICLE_COLUMNS: &str = "SELECT a.id, a.title, a.slug, a.published, a.views, a.comments_enabled, \
     a.author_id, a.author_name, a.created_at, a.updated_at, \
     c.id AS category_id, c.name AS category_name, c.slug AS category_slug \
     FROM articles a LEFT JOIN categories c ON c.id = a.category_id";

#[derive(Clone)]
pub struct PostgresArticleWriteRepository {
    pool: PgPool,
}

impl PostgresArticleWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresArticleReadRepository {
    pool: PgPool,
}

impl PostgresArticleReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    slug: String,
    published: bool,
    views: i64,
    comments_enabled: bool,
    author_id: i64,
    author_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    category_id: Option<i64>,
    category_name: Option<String>,
    category_slug: Option<String>,
}

#[derive(Debug, FromRow)]
struct BlockRow {
    article_id: i64,
    block_type: String,
    content: String,
    image: Option<String>,
    image_caption: String,
    position: i64,
}

#[derive(Debug, FromRow)]
struct ArticleTagRow {
    article_id: i64,
    #[sqlx(flatten)]
    tag: TagRow,
}

impl TryFrom<BlockRow> for ArticleBlock {
    type Error = DomainError;

    fn try_from(row: BlockRow) -> Result<Self, Self::Error> {
        let order = u32::try_from(row.position)
            .map_err(|_| DomainError::Persistence("block position out of range".into()))?;
        ArticleBlock::new(
            row.block_type.parse::<BlockKind>()?,
            row.content,
            row.image,
            row.image_caption,
            order,
        )
    }
}

impl ArticleRow {
    fn into_article(self, blocks: Vec<ArticleBlock>, tags: Vec<Tag>) -> DomainResult<Article> {
        let category = match (self.category_id, self.category_name, self.category_slug) {
            (Some(id), Some(name), Some(slug)) => Some(Category {
                id: CategoryId::new(id)?,
                name: CategoryName::new(name)?,
                slug: TaxonomySlug::new(slug)?,
            }),
            _ => None,
        };
        let views = u64::try_from(self.views)
            .map_err(|_| DomainError::Persistence("negative view count".into()))?;

        Ok(Article {
            id: ArticleId::new(self.id)?,
            title: ArticleTitle::new(self.title)?,
            slug: ArticleSlug::new(self.slug)?,
            blocks,
            published: self.published,
            views,
            comments_enabled: self.comments_enabled,
            author_id: UserId::new(self.author_id)?,
            author_name: Username::new(self.author_name)?,
            category,
            tags,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Attach blocks and tags to article rows with one query each.
async fn hydrate(pool: &PgPool, rows: Vec<ArticleRow>) -> DomainResult<Vec<Article>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();

    let block_rows = sqlx::query_as::<_, BlockRow>(
        "SELECT article_id, block_type, content, image, image_caption, position
         FROM article_blocks WHERE article_id = ANY($1)
         ORDER BY article_id, position, id",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await
    .map_err(map_sqlx)?;

    let tag_rows = sqlx::query_as::<_, ArticleTagRow>(
        "SELECT at.article_id, t.id, t.name, t.slug, t.color
         FROM article_tags at JOIN tags t ON t.id = at.tag_id
         WHERE at.article_id = ANY($1)
         ORDER BY t.name, t.id",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await
    .map_err(map_sqlx)?;

    let mut blocks: HashMap<i64, Vec<ArticleBlock>> = HashMap::new();
    for row in block_rows {
        let article_id = row.article_id;
        blocks
            .entry(article_id)
            .or_default()
            .push(ArticleBlock::try_from(row)?);
    }

    let mut tags: HashMap<i64, Vec<Tag>> = HashMap::new();
    for row in tag_rows {
        tags.entry(row.article_id)
            .or_default()
            .push(Tag::try_from(row.tag)?);
    }

    rows.into_iter()
        .map(|row| {
            let id = row.id;
            row.into_article(
                blocks.remove(&id).unwrap_or_default(),
                tags.remove(&id).unwrap_or_default(),
            )
        })
        .collect()
}

enum ArticleKey {
    Id(i64),
    Slug(String),
}

async fn load_article(pool: &PgPool, key: ArticleKey) -> DomainResult<Option<Article>> {
    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(ARTICLE_COLUMNS);
    match key {
        ArticleKey::Id(id) => {
            builder.push(" WHERE a.id = ");
            builder.push_bind(id);
        }
        ArticleKey::Slug(slug) => {
            builder.push(" WHERE a.slug = ");
            builder.push_bind(slug);
        }
    }

    let row = builder
        .build_query_as::<ArticleRow>()
        .fetch_optional(pool)
        .await
        .map_err(map_sqlx)?;

    match row {
        Some(row) => Ok(hydrate(pool, vec![row]).await?.pop()),
        None => Ok(None),
    }
}

#[async_trait]
impl ArticleWriteRepository for PostgresArticleWriteRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let NewArticle {
            title,
            slug,
            blocks,
            published,
            comments_enabled,
            author_id,
            author_name,
            category,
            tags,
            created_at,
            updated_at,
        } = article;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO articles
                (title, slug, published, comments_enabled, author_id, author_name, category_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING id",
        )
        .bind(title.as_str())
        .bind(slug.as_str())
        .bind(published)
        .bind(comments_enabled)
        .bind(i64::from(author_id))
        .bind(author_name.as_str())
        .bind(category.as_ref().map(|c| i64::from(c.id)))
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        if !blocks.is_empty() {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO article_blocks (article_id, block_type, content, image, image_caption, position) ",
            );
            builder.push_values(blocks, |mut row, block| {
                row.push_bind(id)
                    .push_bind(block.kind.as_str())
                    .push_bind(block.content)
                    .push_bind(block.image)
                    .push_bind(block.image_caption)
                    .push_bind(i64::from(block.order));
            });
            builder
                .build()
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;
        }

        if !tags.is_empty() {
            let mut builder: QueryBuilder<Postgres> =
                QueryBuilder::new("INSERT INTO article_tags (article_id, tag_id) ");
            builder.push_values(tags, |mut row, tag| {
                row.push_bind(id).push_bind(i64::from(tag.id));
            });
            builder
                .build()
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;
        }

        tx.commit().await.map_err(map_sqlx)?;

        load_article(&self.pool, ArticleKey::Id(id))
            .await?
            .ok_or_else(|| DomainError::Persistence("inserted article vanished".into()))
    }

    async fn increment_views(&self, id: ArticleId) -> DomainResult<u64> {
        let views: Option<i64> =
            sqlx::query_scalar("UPDATE articles SET views = views + 1 WHERE id = $1 RETURNING views")
                .bind(i64::from(id))
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx)?;

        let views = views.ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        u64::try_from(views).map_err(|_| DomainError::Persistence("negative view count".into()))
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("article not found".into()));
        }
        Ok(())
    }
}

impl PostgresArticleReadRepository {
    fn apply_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: ArticleFilter) {
        builder.push(" WHERE a.published = TRUE");
        if let Some(category) = filter.category {
            builder.push(" AND a.category_id = ");
            builder.push_bind(i64::from(category));
        }
        if let Some(tag) = filter.tag {
            builder.push(
                " AND EXISTS (SELECT 1 FROM article_tags at WHERE at.article_id = a.id AND at.tag_id = ",
            );
            builder.push_bind(i64::from(tag));
            builder.push(")");
        }
    }
}

#[async_trait]
impl ArticleReadRepository for PostgresArticleReadRepository {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        load_article(&self.pool, ArticleKey::Id(i64::from(id))).await
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        load_article(&self.pool, ArticleKey::Slug(slug.as_str().to_string())).await
    }

    async fn count_published(&self, filter: ArticleFilter) -> DomainResult<u64> {
        let mut count: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM articles a");
        Self::apply_filter(&mut count, filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn list_published(
        &self,
        filter: ArticleFilter,
        limit: u32,
        offset: u64,
    ) -> DomainResult<Vec<Article>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(ARTICLE_COLUMNS);
        Self::apply_filter(&mut builder, filter);
        builder.push(" ORDER BY a.created_at DESC, a.id DESC LIMIT ");
        builder.push_bind(i64::from(limit));
        builder.push(" OFFSET ");
        builder.push_bind(i64::try_from(offset).unwrap_or(i64::MAX));

        let rows = builder
            .build_query_as::<ArticleRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        hydrate(&self.pool, rows).await
    }

    async fn list_popular(&self, exclude: ArticleId, limit: u32) -> DomainResult<Vec<Article>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(ARTICLE_COLUMNS);
        builder.push(" WHERE a.published = TRUE AND a.id <> ");
        builder.push_bind(i64::from(exclude));
        builder.push(" ORDER BY a.views DESC, a.created_at DESC, a.id DESC LIMIT ");
        builder.push_bind(i64::from(limit));

        let rows = builder
            .build_query_as::<ArticleRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        hydrate(&self.pool, rows).await
    }
}

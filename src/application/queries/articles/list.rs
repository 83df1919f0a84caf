use super::ArticleQueryService;
use crate::{
    application::{
        dto::{ArticleSummaryDto, Page, pagination},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{article::ArticleFilter, taxonomy::TaxonomySlug},
};

#[derive(Debug, Clone, Default)]
pub struct ListArticlesQuery {
    /// Raw `page` value; parsed leniently.
    pub page: Option<String>,
    pub tag: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ArticlesByTagQuery {
    pub tag: String,
    pub page: Option<String>,
}

impl ArticleQueryService {
    /// Published articles, newest first, one page at a time.
    ///
    /// An unknown category slug is an error; an unknown tag slug just yields
    /// an empty listing.
    pub async fn list_articles(
        &self,
        query: ListArticlesQuery,
    ) -> ApplicationResult<Page<ArticleSummaryDto>> {
        let mut filter = ArticleFilter::default();

        if let Some(raw) = non_blank(query.category.as_deref()) {
            let category = match TaxonomySlug::new(raw) {
                Ok(slug) => self.category_repo.find_by_slug(&slug).await?,
                Err(_) => None,
            };
            let category =
                category.ok_or_else(|| ApplicationError::not_found("category not found"))?;
            filter.category = Some(category.id);
        }

        if let Some(raw) = non_blank(query.tag.as_deref()) {
            let tag = match TaxonomySlug::new(raw) {
                Ok(slug) => self.tag_repo.find_by_slug(&slug).await?,
                Err(_) => None,
            };
            match tag {
                Some(tag) => filter.tag = Some(tag.id),
                None => {
                    return Ok(Page::new(Vec::new(), 1, 1, 0));
                }
            }
        }

        self.page_of(filter, query.page.as_deref()).await
    }

    pub async fn articles_by_tag(
        &self,
        query: ArticlesByTagQuery,
    ) -> ApplicationResult<Page<ArticleSummaryDto>> {
        let tag = match TaxonomySlug::new(query.tag.as_str()) {
            Ok(slug) => self.tag_repo.find_by_slug(&slug).await?,
            Err(_) => None,
        }
        .ok_or_else(|| ApplicationError::not_found("tag not found"))?;

        let filter = ArticleFilter {
            tag: Some(tag.id),
            ..ArticleFilter::default()
        };
        self.page_of(filter, query.page.as_deref()).await
    }

    async fn page_of(
        &self,
        filter: ArticleFilter,
        raw_page: Option<&str>,
    ) -> ApplicationResult<Page<ArticleSummaryDto>> {
        let total_items = self.read_repo.count_published(filter).await?;
        let total_pages = pagination::total_pages(total_items, self.per_page);
        let page = pagination::resolve_page(raw_page, total_pages);
        let offset = u64::from(page - 1) * u64::from(self.per_page);

        let articles = self
            .read_repo
            .list_published(filter, self.per_page, offset)
            .await?;
        let items = self.summarize(articles).await?;

        Ok(Page::new(items, page, total_pages, total_items))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

use std::sync::Arc;

use crate::{
    application::{dto::ArticleSummaryDto, error::ApplicationResult},
    domain::{
        article::{Article, ArticleReadRepository},
        comment::CommentRepository,
        taxonomy::{CategoryRepository, TagRepository},
    },
};

pub const DEFAULT_ARTICLES_PER_PAGE: u32 = 3;

pub struct ArticleQueryService {
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) comment_repo: Arc<dyn CommentRepository>,
    pub(super) tag_repo: Arc<dyn TagRepository>,
    pub(super) category_repo: Arc<dyn CategoryRepository>,
    pub(super) per_page: u32,
}

impl ArticleQueryService {
    pub fn new(
        read_repo: Arc<dyn ArticleReadRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        tag_repo: Arc<dyn TagRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        per_page: u32,
    ) -> Self {
        Self {
            read_repo,
            comment_repo,
            tag_repo,
            category_repo,
            per_page: per_page.max(1),
        }
    }

    pub(super) async fn summarize(
        &self,
        articles: Vec<Article>,
    ) -> ApplicationResult<Vec<ArticleSummaryDto>> {
        let mut summaries = Vec::with_capacity(articles.len());
        for article in articles {
            let comments = self.comment_repo.count_approved(article.id).await?;
            summaries.push(ArticleSummaryDto::from_article(article, comments));
        }
        Ok(summaries)
    }
}

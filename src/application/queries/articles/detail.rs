use super::ArticleQueryService;
use crate::{
    application::{
        dto::{ArticleDetailDto, ArticleDto},
        error::{ApplicationError, ApplicationResult},
        queries::comments::load_threads,
    },
    domain::article::ArticleId,
};

const POPULAR_LIMIT: u32 = 5;

impl ArticleQueryService {
    /// Assemble the article page around an article whose view was already recorded.
    pub async fn article_detail(&self, article: ArticleDto) -> ApplicationResult<ArticleDetailDto> {
        let id = ArticleId::new(article.id)
            .map_err(|_| ApplicationError::not_found("article not found"))?;

        let popular = self.read_repo.list_popular(id, POPULAR_LIMIT).await?;
        let popular_articles = self.summarize(popular).await?;
        let comments = load_threads(self.comment_repo.as_ref(), id).await?;
        let comments_count = self.comment_repo.count_approved(id).await?;

        Ok(ArticleDetailDto {
            article,
            popular_articles,
            comments,
            comments_count,
        })
    }
}

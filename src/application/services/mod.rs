// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        ApplicationResult,
        commands::{
            articles::ArticleCommandService,
            comments::{CommentCommandService, CommentPolicy},
            taxonomy::TaxonomyCommandService,
        },
        dto::AuthenticatedUser,
        ports::{security::TokenManager, time::Clock, util::SlugGenerator},
        queries::{
            articles::ArticleQueryService, comments::CommentQueryService,
            taxonomy::TaxonomyQueryService,
        },
    },
    domain::{
        article::{ArticleReadRepository, ArticleWriteRepository, services::ArticleSlugService},
        comment::CommentRepository,
        taxonomy::{CategoryRepository, TagRepository},
    },
};

/// Tunables that shape listings and comment validation.
#[derive(Debug, Clone, Copy)]
pub struct ServiceSettings {
    pub articles_per_page: u32,
    pub comment_max_length: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            articles_per_page: crate::application::queries::articles::DEFAULT_ARTICLES_PER_PAGE,
            comment_max_length: CommentPolicy::default().max_length,
        }
    }
}

pub struct ApplicationServices {
    pub article_commands: Arc<ArticleCommandService>,
    pub article_queries: Arc<ArticleQueryService>,
    pub comment_commands: Arc<CommentCommandService>,
    pub comment_queries: Arc<CommentQueryService>,
    pub taxonomy_commands: Arc<TaxonomyCommandService>,
    pub taxonomy_queries: Arc<TaxonomyQueryService>,
    token_manager: Arc<dyn TokenManager>,
}

impl ApplicationServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        article_write_repo: Arc<dyn ArticleWriteRepository>,
        article_read_repo: Arc<dyn ArticleReadRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        tag_repo: Arc<dyn TagRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        token_manager: Arc<dyn TokenManager>,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
        settings: ServiceSettings,
    ) -> Self {
        let slug_service = Arc::new(ArticleSlugService::new(
            Arc::clone(&article_read_repo),
            Arc::clone(&slugger),
        ));

        let article_commands = Arc::new(ArticleCommandService::new(
            Arc::clone(&article_write_repo),
            Arc::clone(&article_read_repo),
            Arc::clone(&tag_repo),
            Arc::clone(&category_repo),
            slug_service,
            Arc::clone(&clock),
        ));
        let article_queries = Arc::new(ArticleQueryService::new(
            Arc::clone(&article_read_repo),
            Arc::clone(&comment_repo),
            Arc::clone(&tag_repo),
            Arc::clone(&category_repo),
            settings.articles_per_page,
        ));

        let comment_commands = Arc::new(CommentCommandService::new(
            Arc::clone(&article_read_repo),
            Arc::clone(&comment_repo),
            Arc::clone(&clock),
            CommentPolicy {
                max_length: settings.comment_max_length,
            },
        ));
        let comment_queries = Arc::new(CommentQueryService::new(
            Arc::clone(&article_read_repo),
            Arc::clone(&comment_repo),
        ));

        let taxonomy_commands = Arc::new(TaxonomyCommandService::new(
            Arc::clone(&tag_repo),
            Arc::clone(&category_repo),
            slugger,
        ));
        let taxonomy_queries = Arc::new(TaxonomyQueryService::new(tag_repo, category_repo));

        Self {
            article_commands,
            article_queries,
            comment_commands,
            comment_queries,
            taxonomy_commands,
            taxonomy_queries,
            token_manager,
        }
    }

    /// Verify a raw bearer token.
    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        self.token_manager.authenticate(token).await
    }
}

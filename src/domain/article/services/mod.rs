// src/domain/article/services/mod.rs
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::ports::util::SlugGenerator;
use crate::domain::article::repository::ArticleReadRepository;
use crate::domain::article::value_objects::{ArticleSlug, ArticleTitle};
use crate::domain::errors::DomainResult;
use crate::domain::slug::clip_slug;

/// Domain service responsible for producing unique slugs for articles.
pub struct ArticleSlugService {
    read_repo: Arc<dyn ArticleReadRepository>,
    generator: Arc<dyn SlugGenerator>,
}

impl ArticleSlugService {
    pub fn new(
        read_repo: Arc<dyn ArticleReadRepository>,
        generator: Arc<dyn SlugGenerator>,
    ) -> Self {
        Self {
            read_repo,
            generator,
        }
    }

    /// Slugify `title`, appending `-1`, `-2`, ... until no article uses it.
    /// The base is shortened as needed so every candidate fits the slug column.
    pub async fn generate_unique_slug(
        &self,
        title: &ArticleTitle,
        now: DateTime<Utc>,
    ) -> DomainResult<ArticleSlug> {
        let base = self.generator.slugify(title.as_str());
        let base = clip_slug(&base, ArticleSlug::MAX_LEN);
        let base_slug = if base.is_empty() {
            format!("article-{}", now.timestamp())
        } else {
            base.to_string()
        };

        let mut candidate = base_slug.clone();
        let mut counter = 1u64;

        loop {
            let slug = ArticleSlug::new(candidate.clone())?;
            match self.read_repo.find_by_slug(&slug).await? {
                Some(_) => {
                    let suffix = format!("-{counter}");
                    let head = clip_slug(&base_slug, ArticleSlug::MAX_LEN - suffix.len());
                    candidate = format!("{head}{suffix}");
                    counter += 1;
                }
                None => return Ok(slug),
            }
        }
    }
}

// src/presentation/http/controllers/mod.rs
pub mod articles;
pub mod comments;
pub mod taxonomy;

/// Location of the article page that redirects land on.
pub(crate) fn article_url(slug: &str) -> String {
    format!("/api/v1/articles/{slug}")
}

mod detail;
mod list;
mod service;

pub use list::{ArticlesByTagQuery, ListArticlesQuery};
pub use service::{ArticleQueryService, DEFAULT_ARTICLES_PER_PAGE};

pub mod articles;
pub mod auth;
pub mod comments;
pub mod pagination;
pub mod taxonomy;

pub use articles::{ArticleBlockDto, ArticleDetailDto, ArticleDto, ArticleSummaryDto};
pub use auth::{AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use comments::{CommentDto, CommentThreadDto, DeletedCommentDto, ModerationResultDto};
pub use pagination::Page;
pub use taxonomy::{CategoryDto, TagDto};

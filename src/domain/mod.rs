pub mod article;
pub mod comment;
pub mod errors;
pub mod slug;
pub mod taxonomy;
pub mod user;

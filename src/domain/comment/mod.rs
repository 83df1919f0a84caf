// src/domain/comment/mod.rs
pub mod entity;
pub mod repository;
pub mod specifications;
pub mod value_objects;

pub use entity::{Comment, CommentThread, NewComment, assemble_threads};
pub use repository::CommentRepository;
pub use value_objects::{CommentContent, CommentId};

// src/application/commands/taxonomy/mod.rs
mod create;
mod service;

pub use create::{CreateCategoryCommand, CreateTagCommand};
pub use service::TaxonomyCommandService;

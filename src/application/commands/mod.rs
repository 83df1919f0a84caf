// src/application/commands/mod.rs
pub mod articles;
mod capability;
pub mod comments;
pub mod taxonomy;

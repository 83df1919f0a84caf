//! News and blog backend: tagged articles with a threaded, moderated
//! comment engine served over HTTP.
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// src/application/commands/taxonomy/service.rs
use std::sync::Arc;

use crate::{
    application::ports::util::SlugGenerator,
    domain::taxonomy::{CategoryRepository, TagRepository},
};

pub struct TaxonomyCommandService {
    pub(super) tag_repo: Arc<dyn TagRepository>,
    pub(super) category_repo: Arc<dyn CategoryRepository>,
    pub(super) slugger: Arc<dyn SlugGenerator>,
}

impl TaxonomyCommandService {
    pub fn new(
        tag_repo: Arc<dyn TagRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        slugger: Arc<dyn SlugGenerator>,
    ) -> Self {
        Self {
            tag_repo,
            category_repo,
            slugger,
        }
    }
}

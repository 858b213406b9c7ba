//! Application state shared across handlers

use std::sync::Arc;

use crate::{archive::ContentArchive, repositories::CatalogStore};

/// Collaborators built once at startup and handed to every request
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogStore>,
    pub archive: Arc<dyn ContentArchive>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogStore>, archive: Arc<dyn ContentArchive>) -> Self {
        Self { catalog, archive }
    }
}

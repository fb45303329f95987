//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::LinkRepository;

/// Per-process state. Cloning is cheap; the service is shared.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
}

impl AppState {
    pub fn new(link_service: Arc<LinkService>) -> Self {
        Self { link_service }
    }

    /// Builds the state from a repository handle and the public base URL.
    pub fn from_repository(repository: Arc<dyn LinkRepository>, base_url: &str) -> Self {
        Self::new(Arc::new(LinkService::new(repository, base_url)))
    }
}

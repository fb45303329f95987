#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{TimeDelta, Utc};
use shortlink::domain::entities::ShortLink;
use shortlink::domain::repositories::{LinkRepository, StoreError};
use shortlink::infrastructure::persistence::MemoryLinkRepository;
use shortlink::routes;
use shortlink::state::AppState;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const BASE_URL: &str = "https://s.example.com";

pub fn create_test_state(repository: Arc<dyn LinkRepository>) -> AppState {
    AppState::from_repository(repository, BASE_URL)
}

pub fn create_test_server(repository: Arc<dyn LinkRepository>) -> TestServer {
    TestServer::new(routes::router(create_test_state(repository))).unwrap()
}

/// Server over a fresh memory store, plus a handle to that store.
pub fn memory_server() -> (TestServer, MemoryLinkRepository) {
    let repo = MemoryLinkRepository::new();
    let server = create_test_server(Arc::new(repo.clone()));
    (server, repo)
}

pub async fn insert_link(repo: &MemoryLinkRepository, code: &str, url: &str) {
    repo.insert_if_absent(ShortLink::new(code.to_string(), url.to_string(), Utc::now()))
        .await
        .unwrap();
}

pub async fn insert_expired_link(repo: &MemoryLinkRepository, code: &str, url: &str) {
    let created = Utc::now() - TimeDelta::days(91);
    repo.insert_if_absent(ShortLink::new(code.to_string(), url.to_string(), created))
        .await
        .unwrap();
}

/// Store where every code is already taken.
#[derive(Default)]
pub struct CollidingRepository {
    pub attempts: Arc<AtomicUsize>,
}

#[async_trait]
impl LinkRepository for CollidingRepository {
    async fn insert_if_absent(&self, _link: ShortLink) -> Result<(), StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::ConditionalCheckFailed)
    }

    async fn find_by_code(&self, _short_code: &str) -> Result<Option<ShortLink>, StoreError> {
        Ok(None)
    }

    async fn purge_expired(&self) -> Result<u64, StoreError> {
        Ok(0)
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "colliding"
    }
}

/// Store that is down.
pub struct BrokenRepository;

#[async_trait]
impl LinkRepository for BrokenRepository {
    async fn insert_if_absent(&self, _link: ShortLink) -> Result<(), StoreError> {
        Err(StoreError::backend("connection refused"))
    }

    async fn find_by_code(&self, _short_code: &str) -> Result<Option<ShortLink>, StoreError> {
        Err(StoreError::backend("connection refused"))
    }

    async fn purge_expired(&self) -> Result<u64, StoreError> {
        Err(StoreError::backend("connection refused"))
    }

    async fn health_check(&self) -> bool {
        false
    }

    fn backend(&self) -> &'static str {
        "broken"
    }
}

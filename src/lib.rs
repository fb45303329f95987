//! # shortlink
//!
//! A URL shortening service built with Axum over a pluggable key-value store.
//!
//! `POST /shorten` stores a long URL under a random 8-character code and
//! returns the short link; `GET /{short_code}` answers with a 301 redirect.
//! Links expire 90 days after creation.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The [`domain::entities::ShortLink`] entity and the
//!   [`domain::repositories::LinkRepository`] store contract
//! - **Application Layer** ([`application`]) - Code generation retry loop and lookups
//! - **Infrastructure Layer** ([`infrastructure`]) - Memory, PostgreSQL, Redis and
//!   DynamoDB stores
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Uniqueness
//!
//! Codes are unique because every store performs an atomic "insert if absent".
//! A collision is retried with a new code, up to
//! [`application::services::MAX_ATTEMPTS`] times.
//!
//! ## Quick Start
//!
//! ```bash
//! export BASE_URL="http://localhost:3000"
//! export TABLE_NAME="short_links"
//! export STORE_BACKEND="memory"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::LinkService;
    pub use crate::domain::entities::ShortLink;
    pub use crate::domain::repositories::{LinkRepository, StoreError};
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::MemoryLinkRepository;
    pub use crate::state::AppState;
}

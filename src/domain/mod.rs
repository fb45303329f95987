//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Key-value store trait definitions
//!
//! The domain layer has no dependencies on the HTTP layer or on any concrete
//! store. Implementations of [`repositories::LinkRepository`] live in
//! [`crate::infrastructure::persistence`].

pub mod entities;
pub mod repositories;

//! Repository trait definitions for the domain layer.
//!
//! The short link store is modelled as a key-value repository addressed by
//! short code. Implementations live in `crate::infrastructure::persistence`;
//! mock implementations are generated via `mockall` for unit tests.

pub mod link_repository;

pub use link_repository::{LinkRepository, StoreError};

#[cfg(test)]
pub use link_repository::MockLinkRepository;

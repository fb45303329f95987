//! Infrastructure layer for external integrations.
//!
//! Provides the concrete key-value stores behind
//! [`crate::domain::repositories::LinkRepository`].
//!
//! - [`persistence`] - Memory, PostgreSQL, Redis and DynamoDB repositories

pub mod persistence;

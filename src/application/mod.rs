//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for the HTTP
//! handlers and the admin CLI.
//!
//! - [`services::link_service::LinkService`] - Short link creation and resolution

pub mod services;

//! HTTP request handlers for API endpoints.

pub mod health;
pub mod redirect;
pub mod shorten;

pub use health::health_handler;
pub use redirect::{
    fallback_handler, method_not_allowed_handler, missing_code_handler, redirect_handler,
};
pub use shorten::shorten_handler;

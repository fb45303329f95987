//! Core domain entities.
//!
//! - [`ShortLink`] - A short code mapped to a long URL with a fixed lifetime

pub mod short_link;

pub use short_link::{LINK_TTL_DAYS, ShortLink};

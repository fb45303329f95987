//! Utility functions for code generation and input validation.
//!
//! - [`code_generator`] - Random short code generation
//! - [`url_validator`] - Long URL validation

pub mod code_generator;
pub mod url_validator;

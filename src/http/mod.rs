//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from specific business logic.

pub mod cache;
pub mod headers;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_304_response, build_body_response, build_empty_response, build_file_response,
    build_options_response, build_redirect_response_with_code, build_text_response,
};

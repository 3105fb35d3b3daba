//! HTTP protocol layer module
//!
//! Response builders shared by the request handler.

pub mod response;

// Re-export commonly used types
pub use response::{
    build_405_response, build_413_response, build_error_response, build_health_response,
    build_options_response, build_page_response,
};

//! Request handler module
//!
//! Turns HTTP requests into view dispatches and view results into responses.

pub mod router;

// Re-export main entry point
pub use router::handle_request;

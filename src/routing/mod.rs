//! Routing module
//!
//! Maps request paths to handlers:
//! - Patterns with literal segments and typed placeholders
//! - Full-path matching in registration order
//! - Named routes that can be reversed into paths

mod pattern;
mod router;

pub use pattern::{ParamValue, Params};
pub use router::{Resolved, Router};

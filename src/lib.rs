//! clientdesk
//!
//! A small client directory served over HTTP: companies and their employees,
//! an employee search per company and a pet type catalogue. Views resolve
//! to a template name plus a JSON context.

pub mod catalog;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod query;
pub mod routing;
pub mod server;
pub mod store;
pub mod views;

//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method validation,
//! health probes, view dispatch and access logging.

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::views;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request data needed to produce a response
pub struct RequestContext<'a> {
    pub method: Method,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub content_length: Option<&'a str>,
}

impl RequestContext<'_> {
    fn is_head(&self) -> bool {
        self.method == Method::HEAD
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let ctx = RequestContext {
        method: req.method().clone(),
        path: req.uri().path(),
        query: req.uri().query(),
        content_length: req
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok()),
    };

    let (response, template) = respond(&ctx, &state);

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            ctx.method.to_string(),
            ctx.path.to_string(),
        );
        entry.query = ctx.query.map(ToString::to_string);
        entry.http_version = format!("{:?}", req.version())
            .trim_start_matches("HTTP/")
            .to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or_default();
        entry.template = template.map(ToString::to_string);
        entry.user_agent = req
            .headers()
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Produce the response for a request, plus the template of the rendered
/// page when a view ran successfully
pub fn respond(
    ctx: &RequestContext<'_>,
    state: &AppState,
) -> (Response<Full<Bytes>>, Option<&'static str>) {
    let http_config = &state.config.http;

    // 1. Check HTTP method
    if let Some(resp) = check_http_method(&ctx.method, http_config.enable_cors) {
        return (resp, None);
    }

    // 2. Check body size
    if let Some(resp) = check_body_size(ctx.content_length, http_config.max_body_size) {
        return (resp, None);
    }

    // 3. Health check endpoints
    let health = &state.config.health;
    if health.enabled && (ctx.path == health.liveness_path || ctx.path == health.readiness_path) {
        return (http::build_health_response("ok"), None);
    }

    // 4. Views
    match views::dispatch(&state.router, &state.queries, ctx.path, ctx.query) {
        Ok(page) => (
            http::build_page_response(&page, &http_config.server_name, ctx.is_head()),
            Some(page.template),
        ),
        Err(err) => {
            if err.is_not_found() {
                logger::log_debug(&format!("{} {}: {err}", ctx.method, ctx.path));
            } else {
                logger::log_error(&format!("{} {}: {err}", ctx.method, ctx.path));
            }
            (
                http::build_error_response(&err, &http_config.server_name, ctx.is_head()),
                None,
            )
        }
    }
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(
    content_length: Option<&str>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let size_str = content_length?;
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_error(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(http::build_413_response())
        }
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            None
        }
        _ => None,
    }
}

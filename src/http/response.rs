//! HTTP response building module
//!
//! Builders for the responses the server sends, decoupled from views.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::HeaderValue;
use hyper::{Response, StatusCode};
use serde_json::json;

use crate::error::{AppError, ErrorKind};
use crate::views::Page;

/// Header carrying the template a page should be rendered with
pub const TEMPLATE_HEADER: &str = "x-template";

/// Build 200 response for a rendered page
pub fn build_page_response(page: &Page, server_name: &str, is_head: bool) -> Response<Full<Bytes>> {
    let body = json!({
        "template": page.template,
        "context": page.context,
    });
    let mut resp = build_json_response(StatusCode::OK, &body, server_name, is_head);
    if let Ok(value) = HeaderValue::from_str(page.template) {
        resp.headers_mut().insert(TEMPLATE_HEADER, value);
    }
    resp
}

/// Build error response matching the error kind
pub fn build_error_response(
    err: &AppError,
    server_name: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let (status, kind) = match err.kind() {
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "not_found"),
        ErrorKind::Configuration => (StatusCode::INTERNAL_SERVER_ERROR, "configuration"),
        ErrorKind::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
    };
    let body = json!({
        "error": err.to_string(),
        "kind": kind,
    });
    build_json_response(status, &body, server_name, is_head)
}

/// Build JSON response; HEAD keeps the headers and drops the body
pub fn build_json_response(
    status: StatusCode,
    body: &serde_json::Value,
    server_name: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let json = body.to_string();
    let content_length = json.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(json)
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Content-Length", content_length)
        .header("Server", server_name)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS");

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "GET, HEAD, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(413)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("413 Payload Too Large")))
        .unwrap_or_else(|e| {
            log_build_error("413", &e);
            Response::new(Full::new(Bytes::from("413 Payload Too Large")))
        })
}

/// Build health probe response
pub fn build_health_response(status: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", "text/plain")
        .header("Cache-Control", "no-cache")
        .body(Full::new(Bytes::from(status.to_string())))
        .unwrap_or_else(|e| {
            log_build_error("health", &e);
            Response::new(Full::new(Bytes::from(status.to_string())))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_response() {
        let page = Page {
            template: "clients/companies_list.html",
            context: json!({"companies": []}),
        };
        let resp = build_page_response(&page, "clientdesk/0.1", false);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()[TEMPLATE_HEADER],
            "clients/companies_list.html"
        );
        assert_eq!(resp.headers()["Content-Type"], "application/json");
        assert_eq!(resp.headers()["Server"], "clientdesk/0.1");
    }

    #[test]
    fn test_error_response_status() {
        let resp = build_error_response(&AppError::CompanyNotFound { id: 3 }, "s", false);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let err = AppError::from(crate::store::StoreError::MissingCompany(1));
        let resp = build_error_response(&err, "s", false);
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_head_keeps_length() {
        let body = json!({"a": 1});
        let resp = build_json_response(StatusCode::OK, &body, "s", true);
        // {"a":1}
        assert_eq!(resp.headers()["Content-Length"], "7");
    }

    #[test]
    fn test_options_cors() {
        let resp = build_options_response(true);
        assert_eq!(resp.status(), 204);
        assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");
        assert!(!build_options_response(false)
            .headers()
            .contains_key("Access-Control-Allow-Origin"));
    }
}

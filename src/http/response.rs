//! HTTP response building module
//!
//! Provides builders for the responses the server emits, decoupled from
//! routing decisions. Builders never panic: on a build error they log and
//! fall back to an empty response carrying the intended status.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::response::Builder;
use hyper::{Response, StatusCode};

/// Headers allowed and exposed on CORS preflight answers
const CORS_HEADERS: &str = "Content-Type,Accept";
/// Preflight cache lifetime, one day
const CORS_MAX_AGE: &str = "86400";

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str) -> Response<Full<Bytes>> {
    let builder = Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header("ETag", etag);
    finish(builder, Bytes::new(), StatusCode::NOT_MODIFIED)
}

/// Build a response with only a status line, no body
pub fn build_empty_response(status: StatusCode) -> Response<Full<Bytes>> {
    finish(Response::builder().status(status), Bytes::new(), status)
}

/// Build a short plain-text response, e.g. `404 Not Found`
pub fn build_text_response(status: StatusCode) -> Response<Full<Bytes>> {
    let text = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or_default()
    );
    let builder = Response::builder()
        .status(status)
        .header("Content-Type", "text/plain");
    finish(builder, Bytes::from(text), status)
}

/// Build CORS preflight answer for a known route
///
/// `allowed_methods` is the route's method list, already comma-joined.
pub fn build_options_response(allowed_methods: &str) -> Response<Full<Bytes>> {
    let builder = Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Access-Control-Allow-Methods", allowed_methods)
        .header("Access-Control-Allow-Headers", CORS_HEADERS)
        .header("Access-Control-Max-Age", CORS_MAX_AGE)
        .header("Access-Control-Expose-Headers", CORS_HEADERS);
    finish(builder, Bytes::new(), StatusCode::NO_CONTENT)
}

/// Build a file response with optional `ETag`
pub fn build_file_response(
    status: StatusCode,
    content_type: &str,
    data: Bytes,
    etag: Option<&str>,
) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .header("Content-Length", data.len());
    if let Some(etag) = etag {
        builder = builder.header("ETag", etag);
    }
    finish(builder, data, status)
}

/// Build a body response with an explicit `Cache-Control` value
pub fn build_body_response(
    content_type: &str,
    cache_control: &str,
    data: Bytes,
) -> Response<Full<Bytes>> {
    let builder = Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Content-Length", data.len())
        .header("Cache-Control", cache_control);
    finish(builder, data, StatusCode::OK)
}

/// Build redirect response with a specific status code
pub fn build_redirect_response_with_code(target: &str, code: StatusCode) -> Response<Full<Bytes>> {
    let builder = Response::builder()
        .status(code)
        .header("Location", target)
        .header("Content-Type", "text/plain");
    finish(builder, Bytes::from("Redirecting..."), code)
}

fn finish(builder: Builder, body: Bytes, status: StatusCode) -> Response<Full<Bytes>> {
    builder.body(Full::new(body)).unwrap_or_else(|e| {
        crate::logger::log_error(&format!("Failed to build {status} response: {e}"));
        let mut fallback = Response::new(Full::new(Bytes::new()));
        *fallback.status_mut() = status;
        fallback
    })
}

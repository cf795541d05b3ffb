//! Request routing dispatch module
//!
//! Entry point for HTTP request processing. Each request is first
//! classified into a [`Decision`] without side effects; the response is
//! then produced in one step from that decision.

use crate::api;
use crate::config::AppState;
use crate::error::HttpError;
use crate::handler::predicates;
use crate::handler::routes::{ApiRoute, RouteTable};
use crate::http::{self, cache::CachePolicy, headers};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, HOST, IF_NONE_MATCH, SERVER};
use hyper::{HeaderMap, Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// What to do with a request, decided before anything is written
#[derive(Debug)]
pub enum Decision<'a> {
    /// GET outside the API prefix; carries the file to render
    StaticAsset(String),
    /// OPTIONS on a known route
    Preflight(&'a ApiRoute),
    /// Known route, allowed method, acceptable `Accept`
    Invoke(&'a ApiRoute),
    /// Unknown route or failed method / accept check
    Reject(HttpError),
}

/// Classify a request by method, normalized path and headers
///
/// Order: static assets, then 404 for unknown paths (whatever the
/// method), then preflight, then 405, then 406.
pub fn classify<'a>(
    method: &Method,
    path: &str,
    headers: &HeaderMap,
    routes: &'a RouteTable,
    api_prefix: &str,
) -> Decision<'a> {
    if method == Method::GET && !path.starts_with(api_prefix) {
        let file = if path.is_empty() || path == "/" {
            "index.html".to_string()
        } else {
            path.to_string()
        };
        return Decision::StaticAsset(file);
    }

    let Some(route) = routes.get(path) else {
        return Decision::Reject(HttpError::NotFound);
    };

    if method == Method::OPTIONS {
        return Decision::Preflight(route);
    }

    if !route.allows(method) {
        return Decision::Reject(HttpError::MethodNotAllowed);
    }

    if !predicates::accepts_json(headers) {
        return Decision::Reject(HttpError::NotAcceptable);
    }

    Decision::Invoke(route)
}

/// Main entry point for HTTP request handling
///
/// The request body is never read here, so any body type is accepted.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let mut response = dispatch(&req, &state).await;

    if let Ok(server) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, server);
    }
    Ok(response)
}

async fn dispatch<B>(req: &Request<B>, state: &AppState) -> Response<Full<Bytes>> {
    let headers = req.headers();

    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| req.uri().authority().map(hyper::http::uri::Authority::as_str));

    if state.config.http.redirect_http && forwarded_as_http(headers) {
        if let Some(host) = host {
            return api::redirect_to_https(host, req.uri());
        }
    }

    let (path, query) = predicates::normalize_target(req.uri(), host);
    let decision = classify(
        req.method(),
        &path,
        headers,
        &state.routes,
        &state.config.app.api_prefix,
    );

    match decision {
        Decision::StaticAsset(file) => serve_static(&file, headers, state).await,
        Decision::Preflight(route) => http::build_options_response(&route.allowed_methods_header()),
        Decision::Invoke(route) => {
            let params = predicates::get_query_params(query.as_deref());
            api::invoke(route.endpoint, req.method(), &params, state).await
        }
        Decision::Reject(err) => err.into_response(),
    }
}

async fn serve_static(file: &str, headers: &HeaderMap, state: &AppState) -> Response<Full<Bytes>> {
    let app = &state.config.app;
    let policy = CachePolicy::for_static(app.enable_caching, app.cache_max_age);

    let if_none_match = policy
        .and_then(|_| headers.get(IF_NONE_MATCH))
        .and_then(|v| v.to_str().ok());

    let mut response = state.renderer.render(file, if_none_match).await;

    headers::apply_security_headers(&mut response);
    if let Some(policy) = policy {
        headers::apply_cache_policy(&mut response, policy);
    }
    response
}

/// Was the request forwarded by a TLS-terminating proxy as plain http?
fn forwarded_as_http(headers: &HeaderMap) -> bool {
    headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|proto| proto.eq_ignore_ascii_case("http"))
}

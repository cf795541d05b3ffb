// API module entry
// Handlers behind the route table, plus the https redirect helper

mod hello;
mod response;
mod tts;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response, StatusCode, Uri};
use std::collections::HashMap;

use crate::config::AppState;
use crate::error::HttpError;
use crate::handler::Endpoint;
use crate::http;

pub use response::json_response;

/// Run the handler registered for (endpoint, method)
///
/// Reached only after route, method and `Accept` checks have passed; the
/// handler owns the status and body of the response.
pub async fn invoke(
    endpoint: Endpoint,
    method: &Method,
    params: &HashMap<String, String>,
    state: &AppState,
) -> Response<Full<Bytes>> {
    let result = match (endpoint, method) {
        (Endpoint::Hello, &Method::GET) => Ok(hello::handle_hello()),
        (Endpoint::Tts, &Method::GET) => tts::handle_tts(params, state).await,
        // Route table allows a method no handler implements
        _ => Err(HttpError::MethodNotAllowed),
    };
    result.unwrap_or_else(HttpError::into_response)
}

/// Redirect to the https version of the requested URL
pub fn redirect_to_https(host: &str, uri: &Uri) -> Response<Full<Bytes>> {
    let target = uri
        .path_and_query()
        .map_or("/", hyper::http::uri::PathAndQuery::as_str);
    http::build_redirect_response_with_code(
        &format!("https://{host}{target}"),
        StatusCode::MOVED_PERMANENTLY,
    )
}

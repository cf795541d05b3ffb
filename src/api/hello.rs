use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::json_response;

pub const GREETING: &str = "Hello World!";

#[derive(Serialize)]
struct HelloResponse {
    message: &'static str,
}

/// GET /api/hello
pub fn handle_hello() -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &HelloResponse { message: GREETING })
}

// API response utility functions module

use crate::error::HttpError;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

/// Build JSON response
///
/// A serialization failure becomes a 500.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string(body) {
        Ok(j) => j,
        Err(e) => {
            return HttpError::Internal(format!("Failed to serialize response: {e}"))
                .into_response()
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            HttpError::Internal(format!("Failed to build JSON response: {e}")).into_response()
        })
}

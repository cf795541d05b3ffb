//! Request-level error taxonomy
//!
//! Every variant is terminal: it is turned into exactly one response at
//! the dispatch boundary and never retried.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use thiserror::Error;

use crate::http;

#[derive(Debug, Error)]
pub enum HttpError {
    /// Unknown route or missing file.
    #[error("not found")]
    NotFound,

    /// Known route, method outside its allowed set.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// `Accept` header admits neither JSON nor `*/*`.
    #[error("not acceptable")]
    NotAcceptable,

    /// Missing or malformed request input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// I/O or collaborator failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HttpError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotAcceptable => StatusCode::NOT_ACCEPTABLE,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert into the response sent to the client
    ///
    /// Internal details are logged, not exposed.
    pub fn into_response(self) -> Response<Full<Bytes>> {
        if let Self::Internal(detail) = &self {
            crate::logger::log_error(detail);
        }
        http::build_text_response(self.status())
    }
}

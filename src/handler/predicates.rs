//! Stateless request helpers
//!
//! Answers questions about a request without touching routing state:
//! accepted content types, query parameters, JSON bodies and ID-shaped URLs.

use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Body;
use hyper::header::{ACCEPT, CONTENT_TYPE};
use hyper::{HeaderMap, Uri};
use regex::Regex;
use std::collections::HashMap;
use url::Url;

use crate::config::HttpConfig;
use crate::error::HttpError;

const JSON_MIME: &str = "application/json";

/// Does the client accept JSON responses?
///
/// True iff an `Accept` header is present and one of its comma-separated
/// media ranges is `application/json`, or the header contains `*/*`.
pub fn accepts_json(headers: &HeaderMap) -> bool {
    headers
        .get_all(ACCEPT)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|accept| {
            accept.contains("*/*")
                || accept.split(',').any(|range| {
                    let media = range.split(';').next().unwrap_or_default().trim();
                    media.eq_ignore_ascii_case(JSON_MIME)
                })
        })
}

/// Is the request body declared as JSON?
pub fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct == JSON_MIME)
}

/// Query parameters, percent-decoded; the last value wins for repeated keys
pub fn get_query_params(query: Option<&str>) -> HashMap<String, String> {
    query
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default()
}

/// Normalize a request target against the `Host` header
///
/// Dot segments are resolved the way a browser would. Returns the
/// (still percent-encoded) path and the raw query string.
pub fn normalize_target(uri: &Uri, host: Option<&str>) -> (String, Option<String>) {
    let target = uri
        .path_and_query()
        .map_or("/", hyper::http::uri::PathAndQuery::as_str);

    let base = host
        .and_then(|h| Url::parse(&format!("http://{h}")).ok())
        .or_else(|| Url::parse("http://localhost").ok());

    match base.and_then(|b| b.join(target).ok()) {
        Some(url) => (url.path().to_string(), url.query().map(ToString::to_string)),
        None => (uri.path().to_string(), uri.query().map(ToString::to_string)),
    }
}

/// Read and parse a JSON request body
///
/// Returns `Ok(None)` when the body is not valid JSON. Reading more than
/// `limit` bytes is a bad request; a broken transport is an internal error.
pub async fn parse_body_json<B>(body: B, limit: u64) -> Result<Option<serde_json::Value>, HttpError>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    let collected = Limited::new(body, limit).collect().await.map_err(|e| {
        if e.downcast_ref::<LengthLimitError>().is_some() {
            HttpError::BadRequest(format!("request body exceeds {limit} bytes"))
        } else {
            HttpError::Internal(format!("Failed to read request body: {e}"))
        }
    })?;

    Ok(serde_json::from_slice(&collected.to_bytes()).ok())
}

/// [`parse_body_json`] bounded by the configured `http.max_body_size`
pub async fn read_json_body<B>(body: B, config: &HttpConfig) -> Result<Option<serde_json::Value>, HttpError>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    parse_body_json(body, config.max_body_size).await
}

/// Does the url have an ID component as its last part? (e.g. `/api/users/dsf7844e`)
pub fn match_id_route(url: &str, prefix: &str) -> bool {
    let pattern = format!(
        r"^(/api)?/{}/([0-9A-Z\S]{{3,32}})\w+$",
        regex::escape(prefix)
    );
    Regex::new(&pattern).is_ok_and(|re| re.is_match(url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;
    use hyper::body::Bytes;
    use hyper::header::HeaderValue;

    fn headers(name: hyper::header::HeaderName, value: &'static str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(name, HeaderValue::from_static(value));
        map
    }

    #[test]
    fn test_accepts_json() {
        assert!(accepts_json(&headers(ACCEPT, "application/json")));
        assert!(accepts_json(&headers(ACCEPT, "text/html, application/json")));
        assert!(accepts_json(&headers(ACCEPT, "application/json;q=0.9")));
        assert!(accepts_json(&headers(ACCEPT, "text/html,*/*;q=0.8")));
        assert!(!accepts_json(&headers(ACCEPT, "text/html")));
        assert!(!accepts_json(&headers(ACCEPT, "application/jsonp")));
        assert!(!accepts_json(&HeaderMap::new()));
    }

    #[test]
    fn test_is_json() {
        assert!(is_json(&headers(CONTENT_TYPE, "application/json")));
        assert!(!is_json(&headers(CONTENT_TYPE, "text/plain")));
        assert!(!is_json(&HeaderMap::new()));
    }

    #[test]
    fn test_query_params() {
        let params = get_query_params(Some("text=Hello%20there&voice=a&voice=b&flag"));
        assert_eq!(params["text"], "Hello there");
        assert_eq!(params["voice"], "b");
        assert_eq!(params["flag"], "");
        assert!(get_query_params(None).is_empty());
    }

    #[test]
    fn test_normalize_target() {
        let uri: Uri = "/api/tts?text=hi".parse().unwrap();
        assert_eq!(
            normalize_target(&uri, Some("example.com:8080")),
            ("/api/tts".to_string(), Some("text=hi".to_string()))
        );

        let uri: Uri = "/css/../../etc/passwd".parse().unwrap();
        assert_eq!(normalize_target(&uri, None).0, "/etc/passwd");

        let uri: Uri = "/".parse().unwrap();
        assert_eq!(normalize_target(&uri, Some("bad host")).0, "/");
    }

    #[tokio::test]
    async fn test_parse_body_json() {
        let body = Full::new(Bytes::from(r#"{"text":"hi"}"#));
        let value = parse_body_json(body, 1024).await.unwrap().unwrap();
        assert_eq!(value["text"], "hi");

        let body = Full::new(Bytes::from("not json"));
        assert!(parse_body_json(body, 1024).await.unwrap().is_none());

        let body = Full::new(Bytes::from(vec![b' '; 64]));
        let err = parse_body_json(body, 16).await.unwrap_err();
        assert!(matches!(err, HttpError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_read_json_body_uses_configured_limit() {
        let mut http = crate::config::Config::from_defaults().unwrap().http;
        assert_eq!(http.max_body_size, 1_048_576);

        let body = Full::new(Bytes::from(r#"{"text":"hello"}"#));
        let value = read_json_body(body, &http).await.unwrap().unwrap();
        assert_eq!(value["text"], "hello");

        http.max_body_size = 8;
        let body = Full::new(Bytes::from(r#"{"text":"hello"}"#));
        let err = read_json_body(body, &http).await.unwrap_err();
        assert!(matches!(err, HttpError::BadRequest(_)));
    }

    #[test]
    fn test_match_id_route() {
        assert!(match_id_route("/api/users/dsf7844e", "users"));
        assert!(match_id_route("/users/ABC123def", "users"));
        assert!(!match_id_route("/api/users/ab", "users"));
        assert!(!match_id_route("/api/users", "users"));
        assert!(!match_id_route("/api/posts/dsf7844e", "users"));
    }
}

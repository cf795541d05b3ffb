//! Security and caching headers for static responses

use hyper::header::{HeaderName, HeaderValue, CACHE_CONTROL};
use hyper::Response;

use super::cache::CachePolicy;
use crate::logger;

const CONTENT_SECURITY_POLICY: &str = "default-src 'none'; \
connect-src 'self' *.google-analytics.com; base-uri 'self'; form-action 'self'; \
manifest-src 'self'; script-src 'self'; img-src 'self' data:; font-src 'self'; \
style-src 'self'; frame-ancestors 'none'; frame-src 'self';";

/// Headers set on every static asset response, whatever its status
pub const SECURITY_HEADERS: [(&str, &str); 6] = [
    ("content-security-policy", CONTENT_SECURITY_POLICY),
    (
        "strict-transport-security",
        "max-age=63072000; includeSubDomains; preload",
    ),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("x-xss-protection", "1; mode=block"),
    ("referrer-policy", "no-referrer"),
];

pub fn apply_security_headers<B>(response: &mut Response<B>) {
    let headers = response.headers_mut();
    for (name, value) in SECURITY_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
}

pub fn apply_cache_policy<B>(response: &mut Response<B>, policy: CachePolicy) {
    match HeaderValue::from_str(&policy.to_header_value()) {
        Ok(value) => {
            response.headers_mut().insert(CACHE_CONTROL, value);
        }
        Err(e) => logger::log_error(&format!("Invalid Cache-Control value: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_headers() {
        let mut resp = Response::new(());
        apply_security_headers(&mut resp);
        let h = resp.headers();
        assert_eq!(h["x-frame-options"], "DENY");
        assert_eq!(h["x-content-type-options"], "nosniff");
        assert_eq!(h["referrer-policy"], "no-referrer");
        assert!(h["content-security-policy"]
            .to_str()
            .unwrap()
            .starts_with("default-src 'none';"));
        assert!(h["strict-transport-security"]
            .to_str()
            .unwrap()
            .contains("max-age=63072000"));
    }

    #[test]
    fn test_cache_policy_header() {
        let mut resp = Response::new(());
        apply_cache_policy(&mut resp, CachePolicy::Public(86400));
        assert_eq!(resp.headers()[CACHE_CONTROL], "public, max-age=86400");
    }
}

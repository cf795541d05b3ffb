//! MIME type detection module
//!
//! Returns the corresponding Content-Type based on file extension.

/// Content type for anything not in the table, including no extension
pub const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// Get MIME Content-Type based on file extension
///
/// The extension is matched case-insensitively, with or without a leading dot.
///
/// # Examples
/// ```
/// use speech_webserver::http::mime::get_content_type;
/// assert_eq!(get_content_type(Some("js")), "text/javascript");
/// assert_eq!(get_content_type(Some(".PNG")), "image/png");
/// assert_eq!(get_content_type(None), "text/html");
/// ```
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    let Some(ext) = extension else {
        return DEFAULT_CONTENT_TYPE;
    };

    match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
        // Scripts and styles
        "js" => "text/javascript",
        "css" => "text/css",

        // Data
        "json" | "map" => "application/json",
        "xml" => "application/xml",
        "webmanifest" => "application/manifest+json",
        "txt" => "text/plain",

        // Fonts
        "eot" => "application/vnd.ms-fontobject",
        "ttf" => "application/font-ttf",
        "otf" => "application/font-otf",
        "woff" => "application/font-woff",
        "woff2" => "application/font-woff2",

        // Images
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "png" => "image/png",
        "jpeg" | "jpg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",

        // Audio
        "wav" => "audio/wav",
        "mp3" => "audio/mpeg",

        _ => DEFAULT_CONTENT_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_types() {
        assert_eq!(get_content_type(Some("html")), "text/html");
        assert_eq!(get_content_type(Some("css")), "text/css");
        assert_eq!(get_content_type(Some("js")), "text/javascript");
        assert_eq!(get_content_type(Some("json")), "application/json");
        assert_eq!(get_content_type(Some("woff2")), "application/font-woff2");
        assert_eq!(get_content_type(Some("svg")), "image/svg+xml");
        assert_eq!(get_content_type(Some("wav")), "audio/wav");
    }

    #[test]
    fn test_case_and_dot_insensitive() {
        assert_eq!(get_content_type(Some("CSS")), "text/css");
        assert_eq!(get_content_type(Some(".Png")), "image/png");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(get_content_type(Some("xyz")), "text/html");
        assert_eq!(get_content_type(Some("")), "text/html");
        assert_eq!(get_content_type(None), "text/html");
    }
}

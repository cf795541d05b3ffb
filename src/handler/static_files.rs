//! Static file serving module
//!
//! Reads assets from the public directory and answers with the file, a
//! 304 on an `ETag` hit, the fallback 404 page, or a bare 500.

use crate::config::AppConfig;
use crate::http::{self, cache, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Renders files below a public root directory
#[derive(Debug, Clone)]
pub struct StaticFileRenderer {
    root: PathBuf,
    not_found_page: String,
    production: bool,
    enable_caching: bool,
}

impl StaticFileRenderer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            root: PathBuf::from(&config.public_dir),
            not_found_page: config.not_found_page.clone(),
            production: config.production,
            enable_caching: config.enable_caching,
        }
    }

    /// Render `file_path` (relative to the root, leading `/` optional)
    ///
    /// `if_none_match` is only consulted when caching is enabled.
    pub async fn render(&self, file_path: &str, if_none_match: Option<&str>) -> Response<Full<Bytes>> {
        let name = self.asset_name(file_path);
        let content_type = mime::get_content_type(Path::new(&name).extension().and_then(|e| e.to_str()));

        let (path, content) = match self.read_asset(&name).await {
            Ok(asset) => asset,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return self.render_not_found().await,
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                logger::log_error(&format!("Cannot read file: {name}"));
                return http::build_empty_response(StatusCode::INTERNAL_SERVER_ERROR);
            }
            Err(e) => {
                logger::log_error(&format!(
                    "Failed to read file: {name}. Received the following error: {:?}: {e}",
                    e.kind()
                ));
                return http::build_empty_response(StatusCode::INTERNAL_SERVER_ERROR);
            }
        };

        if self.is_not_found_page(&path).await {
            return http::build_file_response(
                StatusCode::NOT_FOUND,
                mime::DEFAULT_CONTENT_TYPE,
                Bytes::from(content),
                None,
            );
        }

        if !self.enable_caching {
            return http::build_file_response(StatusCode::OK, content_type, Bytes::from(content), None);
        }

        let etag = cache::generate_etag(&content);
        if cache::check_etag_match(if_none_match, &etag) {
            return http::build_304_response(&etag);
        }
        http::build_file_response(StatusCode::OK, content_type, Bytes::from(content), Some(&etag))
    }

    /// Serve the fallback page with 404, or a bare 500 if it is unreadable
    pub async fn render_not_found(&self) -> Response<Full<Bytes>> {
        let page = self.root.join(&self.not_found_page);
        match fs::read(&page).await {
            Ok(content) => http::build_file_response(
                StatusCode::NOT_FOUND,
                mime::DEFAULT_CONTENT_TYPE,
                Bytes::from(content),
                None,
            ),
            Err(e) => {
                logger::log_error(&format!(
                    "Failed to read not-found page '{}': {e}",
                    page.display()
                ));
                http::build_empty_response(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }

    /// Name of the file actually read, after the production `.min` rewrite
    pub fn asset_name(&self, file_path: &str) -> String {
        if !self.production {
            return file_path.to_string();
        }
        for ext in [".js", ".css"] {
            if let Some(stem) = file_path.strip_suffix(ext) {
                if !stem.ends_with(".min") {
                    return format!("{stem}.min{ext}");
                }
            }
        }
        file_path.to_string()
    }

    async fn read_asset(&self, name: &str) -> io::Result<(PathBuf, Vec<u8>)> {
        let path = self.resolve(name).await?;
        let content = fs::read(&path).await?;
        Ok((path, content))
    }

    /// The fallback page answers 404 even when requested by name
    async fn is_not_found_page(&self, path: &Path) -> bool {
        fs::canonicalize(self.root.join(&self.not_found_page))
            .await
            .is_ok_and(|page| page == path)
    }

    /// Resolve `name` below the root; escaping the root or naming a
    /// directory both count as not found
    async fn resolve(&self, name: &str) -> io::Result<PathBuf> {
        let decoded = urlencoding::decode(name)
            .map_err(|_| io::Error::new(io::ErrorKind::NotFound, "path is not valid UTF-8"))?;
        if decoded.contains('\0') {
            return Err(io::Error::new(io::ErrorKind::NotFound, "path contains NUL"));
        }
        let relative = decoded.trim_start_matches('/');

        let root = fs::canonicalize(&self.root).await?;
        let path = fs::canonicalize(root.join(relative)).await?;

        if !path.starts_with(&root) {
            logger::log_warning(&format!(
                "Path traversal attempt blocked: {name} -> {}",
                path.display()
            ));
            return Err(io::Error::new(io::ErrorKind::NotFound, "outside public root"));
        }
        if fs::metadata(&path).await?.is_dir() {
            return Err(io::Error::new(io::ErrorKind::NotFound, "is a directory"));
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, AppConfig) {
        let dir = tempfile::tempdir().unwrap();
        let public = dir.path().join("public");
        std::fs::create_dir_all(public.join("js")).unwrap();
        std::fs::write(public.join("index.html"), "<h1>home</h1>").unwrap();
        std::fs::write(public.join("404.html"), "<h1>missing</h1>").unwrap();
        std::fs::write(public.join("js/app.js"), "let a = 1;").unwrap();
        std::fs::write(public.join("js/app.min.js"), "let a=1").unwrap();
        std::fs::write(dir.path().join("secret.txt"), "outside").unwrap();

        let mut app = Config::from_defaults().unwrap().app;
        app.public_dir = public.to_str().unwrap().to_string();
        (dir, app)
    }

    async fn body_of(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_serves_file_with_content_type() {
        let (_dir, app) = fixture();
        let resp = StaticFileRenderer::new(&app).render("/js/app.js", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "text/javascript");
        assert!(resp.headers().get("ETag").is_none());
        assert_eq!(body_of(resp).await, "let a = 1;");
    }

    #[tokio::test]
    async fn test_production_reads_minified() {
        let (_dir, mut app) = fixture();
        app.production = true;
        let renderer = StaticFileRenderer::new(&app);
        assert_eq!(renderer.asset_name("/js/app.js"), "/js/app.min.js");
        assert_eq!(renderer.asset_name("/js/app.min.js"), "/js/app.min.js");
        assert_eq!(renderer.asset_name("/data.json"), "/data.json");
        assert_eq!(renderer.asset_name("/css/site.css"), "/css/site.min.css");

        let resp = renderer.render("/js/app.js", None).await;
        assert_eq!(body_of(resp).await, "let a=1");
    }

    #[tokio::test]
    async fn test_missing_file_serves_fallback() {
        let (_dir, app) = fixture();
        let resp = StaticFileRenderer::new(&app).render("/nope.png", None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers()["Content-Type"], "text/html");
        assert_eq!(body_of(resp).await, "<h1>missing</h1>");
    }

    #[tokio::test]
    async fn test_missing_fallback_is_500() {
        let (dir, app) = fixture();
        std::fs::remove_file(dir.path().join("public/404.html")).unwrap();
        let resp = StaticFileRenderer::new(&app).render("/nope.png", None).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_of(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_directory_and_traversal_are_not_found() {
        let (_dir, app) = fixture();
        let renderer = StaticFileRenderer::new(&app);

        assert_eq!(renderer.render("/js", None).await.status(), StatusCode::NOT_FOUND);
        assert_eq!(renderer.render("/../secret.txt", None).await.status(), StatusCode::NOT_FOUND);
        assert_eq!(renderer.render("/%2e%2e/secret.txt", None).await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_percent_decoded_names() {
        let (dir, app) = fixture();
        std::fs::write(dir.path().join("public/my file.txt"), "spaced").unwrap();
        let resp = StaticFileRenderer::new(&app).render("/my%20file.txt", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "text/plain");
    }

    #[tokio::test]
    async fn test_etag_round_trip() {
        let (_dir, mut app) = fixture();
        app.enable_caching = true;
        let renderer = StaticFileRenderer::new(&app);

        let first = renderer.render("index.html", None).await;
        assert_eq!(first.status(), StatusCode::OK);
        let etag = first.headers()["ETag"].to_str().unwrap().to_string();

        let second = renderer.render("index.html", Some(&etag)).await;
        assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
        assert_eq!(second.headers()["ETag"], etag.as_str());
        assert!(body_of(second).await.is_empty());

        let stale = renderer.render("index.html", Some("\"other\"")).await;
        assert_eq!(stale.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_fallback_page_by_name_is_404() {
        let (_dir, mut app) = fixture();
        app.enable_caching = true;
        let resp = StaticFileRenderer::new(&app).render("/404.html", None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(resp.headers().get("ETag").is_none());
        assert_eq!(body_of(resp).await, "<h1>missing</h1>");
    }

    #[tokio::test]
    async fn test_nul_in_name_is_not_found() {
        let (_dir, app) = fixture();
        let resp = StaticFileRenderer::new(&app).render("/a%00b.html", None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(resp).await, "<h1>missing</h1>");
    }

    #[tokio::test]
    async fn test_fallback_is_never_conditional() {
        let (_dir, mut app) = fixture();
        app.enable_caching = true;
        let resp = StaticFileRenderer::new(&app).render("/gone.html", Some("*")).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(resp.headers().get("ETag").is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unreadable_file_is_500() {
        use std::os::unix::fs::PermissionsExt;

        let (dir, app) = fixture();
        let locked = dir.path().join("public/locked.html");
        std::fs::write(&locked, "x").unwrap();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

        // root ignores file modes
        if std::fs::read(&locked).is_ok() {
            return;
        }
        let resp = StaticFileRenderer::new(&app).render("/locked.html", None).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_of(resp).await.is_empty());
    }
}

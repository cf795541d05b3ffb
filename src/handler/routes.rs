//! API route table
//!
//! Exact-path lookup from a normalized URL path to its route descriptor.
//! OPTIONS is answered for every known path without being listed.

use hyper::Method;
use std::collections::BTreeMap;

/// Handler behind an API route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Greeting as JSON
    Hello,
    /// Text-to-speech audio
    Tts,
}

/// A path paired with its allowed methods and handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRoute {
    pub path: String,
    pub endpoint: Endpoint,
    methods: Vec<Method>,
}

impl ApiRoute {
    /// A route always starts with one allowed method
    pub fn new(path: impl Into<String>, endpoint: Endpoint, method: Method) -> Self {
        Self {
            path: path.into(),
            endpoint,
            methods: vec![method],
        }
    }

    #[must_use]
    pub fn allow(mut self, method: Method) -> Self {
        if !self.methods.contains(&method) {
            self.methods.push(method);
        }
        self
    }

    pub fn allows(&self, method: &Method) -> bool {
        self.methods.contains(method)
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Value for `Access-Control-Allow-Methods`, e.g. `GET,POST`
    pub fn allowed_methods_header(&self) -> String {
        self.methods
            .iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Known API routes, immutable after start-up
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: BTreeMap<String, ApiRoute>,
}

impl RouteTable {
    /// The server's API routes under `prefix` (e.g. `/api`)
    pub fn with_prefix(prefix: &str) -> Self {
        let prefix = prefix.trim_end_matches('/');
        Self::from_routes([
            ApiRoute::new(format!("{prefix}/hello"), Endpoint::Hello, Method::GET),
            ApiRoute::new(format!("{prefix}/tts"), Endpoint::Tts, Method::GET),
        ])
    }

    pub fn from_routes(routes: impl IntoIterator<Item = ApiRoute>) -> Self {
        Self {
            routes: routes
                .into_iter()
                .map(|route| (route.path.clone(), route))
                .collect(),
        }
    }

    pub fn get(&self, path: &str) -> Option<&ApiRoute> {
        self.routes.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ApiRoute> {
        self.routes.values()
    }
}

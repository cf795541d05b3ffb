//! Request handler module
//!
//! Classifies each request as static asset or API traffic and dispatches it:
//! static files through the renderer, API calls through the route table.

pub mod predicates;
pub mod router;
pub mod routes;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
pub use routes::{ApiRoute, Endpoint, RouteTable};
pub use static_files::StaticFileRenderer;

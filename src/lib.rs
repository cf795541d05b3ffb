//! Small HTTP server that serves a static site and a text-to-speech API.

pub mod api;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod speech;

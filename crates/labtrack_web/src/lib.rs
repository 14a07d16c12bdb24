//! HTTP surface for the lab tracker.
//!
//! # Responsibility
//! - Route requests to the scientist show page and link removal.
//! - Render HTML and map service errors to status codes.
//! - Run a sequential `tiny_http` server loop.
//!
//! # Invariants
//! - Handlers never panic; failures become 404/405/500 pages.

pub mod app;
pub mod handlers;
pub mod http;
pub mod routes;
pub mod server;
pub mod views;

pub use app::App;
pub use http::{Method, Request, Response};
pub use server::{HttpServer, ServerError};

//! # explorer-router
//!
//! A lightweight URL routing library with middleware support.
//!
//! This crate provides:
//! - Path pattern matching with parameters
//! - HTTP method-based routing, with 405 for known paths
//! - Middleware support (before/after hooks)
//! - Url-encoded form decoding
//!
//! ## Quick Start
//!
//! ```
//! use explorer_router::{Request, Response, Router};
//!
//! async fn get_record(req: Request) -> Response {
//!     let table = req.params.get("table").unwrap_or_default();
//!     let id = req.params.get("id").unwrap_or_default();
//!     Response::text(format!("{table} #{id}"))
//! }
//!
//! # async fn run() -> explorer_router::Result<()> {
//! let router = Router::new().get("/{table}/{id}", get_record)?;
//!
//! let response = router.handle(Request::get("/items/7")).await;
//! assert_eq!(response.body_string().as_deref(), Some("items #7"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Middleware
//!
//! ```ignore
//! use explorer_router::{LoggingMiddleware, Router};
//!
//! let router = Router::new()
//!     .middleware(LoggingMiddleware)
//!     .get("/", handler)?;
//! ```

mod error;
mod middleware;
mod path;
mod request;
mod response;
mod router;

pub use error::{Result, RouterError};
pub use middleware::{BoxFuture, LoggingMiddleware, Middleware, MiddlewareResult};
pub use path::PathPattern;
pub use request::{Method, PathParams, Request};
pub use response::Response;
pub use router::{Handler, Route, Router};

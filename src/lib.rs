//! # cacheware
//!
//! Session-cache-limiter style cache headers for an async middleware pipeline.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use cacheware::cache::{CacheHeaderMiddleware, CacheOptions, SessionSettings};
//! use cacheware::context::Context;
//! use cacheware::middleware::{Next, endpoint, from_middleware};
//! use cacheware::{Method, Request, Response, StatusCode};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Arc::new(SessionSettings::default());
//!     let cache = CacheHeaderMiddleware::new(session, CacheOptions::new().mode("public"))?;
//!
//!     let next = Next::new(vec![
//!         from_middleware(Arc::new(cache)),
//!         endpoint(|_ctx: Context| async { Ok(Response::new(StatusCode::Ok).body("hi")) }),
//!     ]);
//!     let response = next.run(Context::new(Request::new(Method::Get, "/"))).await?;
//!
//!     assert_eq!(response.headers().get("cache-control"), Some("public, max-age=10800"));
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod context;
pub mod http;
pub mod middleware;

// ── Convenience re-exports ────────────────────────────────────────────────────
pub use cache::{CacheHeaderMiddleware, CacheLimiter, CacheOptions, ConfigError};
pub use http::{Headers, Method, Request, Response, StatusCode};
pub use middleware::{HandlerError, HandlerResult};

//! Runs one request through the cache middleware for every limiter and
//! prints the decorated response in wire format.
//!
//! ```text
//! RUST_LOG=debug cargo run --example cache_limiters
//! ```

use std::sync::Arc;

use cacheware::cache::{CacheHeaderMiddleware, CacheOptions, SessionSettings};
use cacheware::context::Context;
use cacheware::middleware::{LoggerMiddleware, Next, endpoint, from_middleware};
use cacheware::{Method, Request, Response, StatusCode};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let session = Arc::new(SessionSettings::default());

    for mode in ["public", "private", "private_no_expire", "nocache", "none"] {
        let cache = CacheHeaderMiddleware::new(
            session.clone(),
            CacheOptions::new().mode(mode).expire_minutes(3),
        )?;

        let next = Next::new(vec![
            from_middleware(Arc::new(LoggerMiddleware)),
            from_middleware(Arc::new(cache)),
            endpoint(|_ctx: Context| async {
                Ok(Response::new(StatusCode::Ok).body("Hello, World!"))
            }),
        ]);

        let request = Request::new(Method::Get, "/hello").header("Host", "localhost");
        let response = next.run(Context::new(request)).await?;

        println!("── {mode} ──");
        println!("{}", String::from_utf8_lossy(&response.into_bytes()));
    }

    Ok(())
}

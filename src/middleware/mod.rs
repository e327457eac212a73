//! Middleware pipeline — composable before/after request handler logic.
//!
//! Each middleware wraps the next layer, enabling request inspection,
//! short-circuit responses, and response decoration without coupling
//! endpoints to infrastructure concerns.
//!
//! ## Core types
//!
//! - [`Middleware`] — trait implemented by all middleware.
//! - [`Next`] — cursor into the remaining middleware chain; call [`Next::run`] to
//!   advance to the next layer.
//! - [`MiddlewareHandler`] — type-erased, cheaply-cloneable middleware function.
//! - [`from_middleware`] — converts a [`Middleware`] into a [`MiddlewareHandler`].
//! - [`endpoint`] — adapts a terminal async handler into a [`MiddlewareHandler`].
//! - [`LoggerMiddleware`] — built-in request/response logger.
//!
//! Every layer returns a [`HandlerResult`]. A layer that only decorates
//! responses forwards downstream errors with `?` and never swallows them.

use std::{future::Future, pin::Pin, sync::Arc};

use thiserror::Error;
use tokio::time::Instant;

use crate::{Response, StatusCode, context::Context};

/// A failure raised by a handler somewhere down the chain.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{0}")]
    Message(String),
}

impl HandlerError {
    /// Shorthand for a plain-text failure.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

/// The outcome of running one pipeline layer.
pub type HandlerResult = Result<Response, HandlerError>;

/// Boxed future returned by every layer.
pub type BoxFuture = Pin<Box<dyn Future<Output = HandlerResult> + Send>>;

/// A cursor into the remaining middleware chain for a single request.
///
/// `Next` is consumed on each call to [`run`](Self::run), so it cannot be
/// called more than once per middleware invocation.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use cacheware::{Method, Request, Response, StatusCode};
/// use cacheware::context::Context;
/// use cacheware::middleware::{LoggerMiddleware, Next, endpoint, from_middleware};
///
/// # tokio_test_block_on(async {
/// let next = Next::new(vec![
///     from_middleware(Arc::new(LoggerMiddleware)),
///     endpoint(|_ctx: Context| async { Ok(Response::new(StatusCode::Ok)) }),
/// ]);
/// let response = next.run(Context::new(Request::new(Method::Get, "/"))).await.unwrap();
/// assert_eq!(response.status(), StatusCode::Ok);
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
/// # }
/// ```
pub struct Next {
    middlewares: Vec<MiddlewareHandler>,
    // Tracks which middleware to invoke on the next `run` call.
    index: usize,
}

/// A type-erased, reference-counted middleware function.
///
/// The [`Arc`] wrapper makes handlers cheap to clone so that [`Next`] can
/// advance through the chain without copying closures.
pub type MiddlewareHandler = Arc<dyn Fn(Context, Next) -> BoxFuture + Send + Sync + 'static>;

/// Converts a [`Middleware`] implementation into a [`MiddlewareHandler`].
pub fn from_middleware<M>(middleware: Arc<M>) -> MiddlewareHandler
where
    M: Middleware + 'static,
{
    Arc::new(move |ctx: Context, next: Next| middleware.handle(ctx, next))
}

/// Adapts a terminal async handler into the last entry of a chain.
///
/// The handler never sees `Next`; whatever it returns, success or failure,
/// travels back up through every layer above it.
pub fn endpoint<H, F>(handler: H) -> MiddlewareHandler
where
    H: Fn(Context) -> F + Send + Sync + 'static,
    F: Future<Output = HandlerResult> + Send + 'static,
{
    Arc::new(move |ctx: Context, _next: Next| Box::pin(handler(ctx)))
}

impl Next {
    /// Creates a new `Next` positioned at the start of the given middleware stack.
    pub fn new(middlewares: Vec<MiddlewareHandler>) -> Self {
        Self {
            middlewares,
            index: 0,
        }
    }

    /// Invokes the next middleware in the chain and returns its result.
    ///
    /// If no handler remains (the chain is exhausted without producing a
    /// response), a `500 Internal Server Error` response is returned.
    pub async fn run(mut self, ctx: Context) -> HandlerResult {
        if self.index < self.middlewares.len() {
            let handler = self.middlewares[self.index].clone();
            self.index += 1;
            handler(ctx, self).await
        } else {
            Ok(Response::new(StatusCode::InternalServerError)
                .body("No response generated by middleware pipeline"))
        }
    }
}

/// The core trait for all middleware.
///
/// Implementors receive a [`Context`] and a [`Next`] cursor. They may:
///
/// - **Pass through** — call `next.run(ctx).await` without modification.
/// - **Short-circuit** — return a [`Response`] directly without calling `next`.
/// - **Decorate** — call `next.run(ctx).await?`, then return a modified response.
///
/// Implementations must be `Send + Sync` because one instance serves every
/// concurrent request.
pub trait Middleware: Send + Sync {
    /// Handle the request and optionally delegate to the next middleware.
    fn handle(&self, ctx: Context, next: Next) -> BoxFuture;
}

/// Built-in middleware that logs each request's method, path, status, and duration.
///
/// Emits a single `tracing::info!` line after the downstream handler completes,
/// in the format:
///
/// ```text
/// METHOD /path - STATUS (duration)
/// ```
///
/// Downstream failures are logged at `warn` and returned unchanged.
pub struct LoggerMiddleware;

impl Middleware for LoggerMiddleware {
    fn handle(&self, ctx: Context, next: Next) -> BoxFuture {
        Box::pin(async move {
            let start = Instant::now();
            let method = ctx.request().method().as_str().to_string();
            let path = ctx.request().path().to_string();

            let result = next.run(ctx).await;
            let duration = start.elapsed();

            match &result {
                Ok(response) => {
                    tracing::info!(
                        "{} {} - {} ({:?})",
                        method,
                        path,
                        response.status().as_u16(),
                        duration
                    );
                }
                Err(e) => {
                    tracing::warn!(error = %e, "{} {} - failed ({:?})", method, path, duration);
                }
            }

            result
        })
    }
}

//! The cache limiter as a pipeline [`Middleware`].

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{
    config::{CacheOptions, CacheSettings, ConfigError},
    headers,
    session::SessionEnvironment,
};
use crate::{
    context::Context,
    middleware::{BoxFuture, Middleware, Next},
};

/// Middleware that decorates every downstream response with the cache
/// headers of a configured [`CacheLimiter`](super::CacheLimiter).
///
/// Settings are resolved once, at construction, from [`CacheOptions`]
/// layered over the injected [`SessionEnvironment`]. For each request the
/// middleware:
///
/// 1. disables the session layer's automatic cookie and cache headers,
/// 2. records the effective [`CacheSettings`] in the context extensions,
/// 3. forwards the request unchanged,
/// 4. appends the limiter's header set to the downstream response.
///
/// A downstream error is returned as-is and no headers are added.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use cacheware::cache::{CacheHeaderMiddleware, CacheOptions, SessionSettings};
/// use cacheware::middleware::from_middleware;
///
/// let session = Arc::new(SessionSettings::default());
/// let cache = CacheHeaderMiddleware::new(session, CacheOptions::new().mode("public"))?;
/// assert_eq!(cache.settings().max_age(), 10_800);
///
/// let handler = from_middleware(Arc::new(cache));
/// # Ok::<(), cacheware::cache::ConfigError>(())
/// ```
pub struct CacheHeaderMiddleware {
    settings: CacheSettings,
    session: Arc<dyn SessionEnvironment>,
    clock: fn() -> DateTime<Utc>,
}

impl CacheHeaderMiddleware {
    /// Resolves settings and builds the middleware.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the effective expiry is negative or
    /// out of range.
    pub fn new(
        session: Arc<dyn SessionEnvironment>,
        options: CacheOptions,
    ) -> Result<Self, ConfigError> {
        let settings = CacheSettings::resolve(session.as_ref(), &options)?;
        Ok(Self {
            settings,
            session,
            clock: Utc::now,
        })
    }

    /// Replaces the clock used for `Expires` and `Last-Modified`.
    ///
    /// Dates outside 1970..=9999 are clamped to that range when formatted.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// The effective settings.
    pub fn settings(&self) -> CacheSettings {
        self.settings
    }
}

impl Middleware for CacheHeaderMiddleware {
    fn handle(&self, mut ctx: Context, next: Next) -> BoxFuture {
        let settings = self.settings;
        let session = Arc::clone(&self.session);
        let clock = self.clock;

        Box::pin(async move {
            session.disable_automatic_headers();
            ctx.extensions_mut().insert(settings);

            let mut response = next.run(ctx).await?;

            tracing::debug!(
                limiter = %settings.limiter,
                max_age = settings.max_age(),
                "applying cache headers"
            );
            headers::apply(&settings, &mut response, clock());

            Ok(response)
        })
    }
}

//! Session subsystem seen from the cache middleware.
//!
//! The hosting application's session layer supplies the default cache
//! limiter and expiry, and must stop emitting its own cookie and cache
//! headers once [`CacheHeaderMiddleware`](super::CacheHeaderMiddleware)
//! takes over. Both concerns sit behind [`SessionEnvironment`] so callers
//! inject them explicitly.

use std::sync::{PoisonError, RwLock};

/// The session collaborator consulted by the cache middleware.
pub trait SessionEnvironment: Send + Sync {
    /// Name of the configured cache limiter (e.g. `"nocache"`).
    fn cache_limiter(&self) -> String;

    /// Configured cache lifetime in minutes. `0` means "use the default".
    fn cache_expire(&self) -> i64;

    /// Turns off transparent session ids, cookie emission, and the built-in
    /// cache limiter so the middleware's headers are the only cache headers
    /// sent.
    fn disable_automatic_headers(&self);
}

/// Session directives relevant to header emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIni {
    pub use_trans_sid: bool,
    pub use_cookies: bool,
    pub use_only_cookies: bool,
    pub use_strict_mode: bool,
    pub cache_limiter: String,
    pub cache_expire: i64,
}

impl Default for SessionIni {
    fn default() -> Self {
        Self {
            use_trans_sid: false,
            use_cookies: true,
            use_only_cookies: true,
            use_strict_mode: false,
            cache_limiter: "nocache".to_string(),
            cache_expire: 180,
        }
    }
}

/// In-process [`SessionEnvironment`] backed by a [`SessionIni`].
///
/// # Examples
///
/// ```
/// use cacheware::cache::{SessionEnvironment, SessionIni, SessionSettings};
///
/// let session = SessionSettings::new(SessionIni {
///     use_trans_sid: true,
///     ..SessionIni::default()
/// });
/// session.disable_automatic_headers();
///
/// let ini = session.snapshot();
/// assert!(!ini.use_trans_sid);
/// assert!(!ini.use_cookies);
/// assert_eq!(ini.cache_limiter, "");
/// ```
#[derive(Debug, Default)]
pub struct SessionSettings {
    ini: RwLock<SessionIni>,
}

impl SessionSettings {
    pub fn new(ini: SessionIni) -> Self {
        Self {
            ini: RwLock::new(ini),
        }
    }

    /// Returns a copy of the current directives.
    pub fn snapshot(&self) -> SessionIni {
        self.ini
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SessionEnvironment for SessionSettings {
    fn cache_limiter(&self) -> String {
        self.ini
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .cache_limiter
            .clone()
    }

    fn cache_expire(&self) -> i64 {
        self.ini
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .cache_expire
    }

    fn disable_automatic_headers(&self) {
        let mut ini = self.ini.write().unwrap_or_else(PoisonError::into_inner);
        ini.use_trans_sid = false;
        ini.use_cookies = false;
        ini.use_only_cookies = true;
        ini.use_strict_mode = false;
        ini.cache_limiter.clear();
        tracing::trace!("automatic session cookie and cache headers disabled");
    }
}

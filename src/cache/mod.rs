//! Cache limiter — advisory cache headers on outgoing responses.
//!
//! [`CacheHeaderMiddleware`] appends `Expires`, `Cache-Control`,
//! `Last-Modified`, and `Pragma` according to a [`CacheLimiter`]:
//!
//! | limiter             | Expires                          | Cache-Control                                   | Last-Modified | Pragma     |
//! |---------------------|----------------------------------|-------------------------------------------------|---------------|------------|
//! | `public`            | `expires=<now+max-age>; max-age=N` | `public, max-age=N`                           | now           | —          |
//! | `private`           | `Thu, 19 Nov 1981 08:52:00 GMT`  | `private, max-age=N, pre-check=N`               | now           | —          |
//! | `private_no_expire` | —                                | `private, max-age=N, pre-check=N`               | now           | —          |
//! | `nocache`           | `Thu, 19 Nov 1981 08:52:00 GMT`  | `no-store, no-cache, must-revalidate, post-check=0, pre-check=0` | — | `no-cache` |
//! | `none`              | —                                | —                                               | —             | —          |
//!
//! `N` is `expire_minutes * 60`. Nothing here stores, validates, or
//! invalidates cached content.

pub mod config;
pub mod headers;
pub mod middleware;
pub mod session;

pub use config::{CacheLimiter, CacheOptions, CacheSettings, ConfigError};
pub use headers::CACHE_EXPIRED;
pub use middleware::CacheHeaderMiddleware;
pub use session::{SessionEnvironment, SessionIni, SessionSettings};

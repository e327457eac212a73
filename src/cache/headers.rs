//! Cache header sets, one function per [`CacheLimiter`] variant.
//!
//! Every header is appended with [`Response::add_header`]; values the
//! downstream handler already set for the same name stay in front.

use std::time::{Duration, SystemTime};

use chrono::{DateTime, TimeDelta, Utc};

use super::config::{CacheLimiter, CacheSettings};
use crate::Response;

/// Fixed past date that forces immediate expiry.
pub const CACHE_EXPIRED: &str = "Thu, 19 Nov 1981 08:52:00 GMT";

/// `Cache-Control` value for the `nocache` limiter.
pub const NO_CACHE_CONTROL: &str = "no-store, no-cache, must-revalidate, post-check=0, pre-check=0";

pub const EXPIRES: &str = "Expires";
pub const CACHE_CONTROL: &str = "Cache-Control";
pub const LAST_MODIFIED: &str = "Last-Modified";
pub const PRAGMA: &str = "Pragma";

/// Appends the header set for `settings.limiter`, stamped with `now`.
pub fn apply(settings: &CacheSettings, response: &mut Response, now: DateTime<Utc>) {
    let max_age = settings.max_age();
    match settings.limiter {
        CacheLimiter::Public => respond_public(response, max_age, now),
        CacheLimiter::Private => respond_private(response, max_age, now),
        CacheLimiter::PrivateNoExpire => respond_private_no_expire(response, max_age, now),
        CacheLimiter::NoCache => respond_no_cache(response),
        CacheLimiter::None => {}
    }
}

/// `9999-12-31T23:59:59Z`, the last instant an IMF-fixdate can carry.
const LATEST_HTTP_DATE_SECS: u64 = 253_402_300_799;

/// Formats `at` as an IMF-fixdate (`Sun, 06 Nov 1994 08:49:37 GMT`).
///
/// Instants outside 1970..=9999 are clamped to the nearest end of that range.
pub fn http_date(at: DateTime<Utc>) -> String {
    let latest = SystemTime::UNIX_EPOCH + Duration::from_secs(LATEST_HTTP_DATE_SECS);
    let at = SystemTime::from(at).clamp(SystemTime::UNIX_EPOCH, latest);
    httpdate::fmt_http_date(at)
}

fn respond_public(response: &mut Response, max_age: u64, now: DateTime<Utc>) {
    // max_age is bounded by MAX_EXPIRE_MINUTES, well inside i64 seconds.
    let expires_at = now
        .checked_add_signed(TimeDelta::seconds(max_age as i64))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    response.add_header(
        EXPIRES,
        format!("expires={}; max-age={max_age}", http_date(expires_at)),
    );
    response.add_header(CACHE_CONTROL, format!("public, max-age={max_age}"));
    response.add_header(LAST_MODIFIED, http_date(now));
}

fn respond_private(response: &mut Response, max_age: u64, now: DateTime<Utc>) {
    response.add_header(EXPIRES, CACHE_EXPIRED);
    respond_private_no_expire(response, max_age, now);
}

fn respond_private_no_expire(response: &mut Response, max_age: u64, now: DateTime<Utc>) {
    response.add_header(
        CACHE_CONTROL,
        format!("private, max-age={max_age}, pre-check={max_age}"),
    );
    response.add_header(LAST_MODIFIED, http_date(now));
}

fn respond_no_cache(response: &mut Response) {
    response.add_header(EXPIRES, CACHE_EXPIRED);
    response.add_header(CACHE_CONTROL, NO_CACHE_CONTROL);
    response.add_header(PRAGMA, "no-cache");
}

//! Cache limiter configuration.
//!
//! [`CacheOptions`] carries caller overrides (every field optional, serde
//! deserializable); [`CacheSettings`] is the immutable result of merging
//! them over the session environment's defaults.

use std::{convert::Infallible, fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

use super::session::SessionEnvironment;

/// Expiry used when the environment reports `0` minutes.
pub const DEFAULT_EXPIRE_MINUTES: u64 = 180;

/// Upper bound on `expire_minutes` (100 years).
///
/// Keeps `now + max-age` inside the range an HTTP date can express.
pub const MAX_EXPIRE_MINUTES: u64 = 100 * 365 * 24 * 60;

/// Errors raised while resolving [`CacheSettings`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cache expiry must not be negative, got {minutes} minutes")]
    NegativeExpire { minutes: i64 },

    #[error("cache expiry of {minutes} minutes exceeds the maximum of {max} minutes")]
    ExpireTooLarge { minutes: i64, max: u64 },
}

/// The cache header strategy applied to every response.
///
/// Parsing never fails: the empty string and unknown names map to
/// [`CacheLimiter::None`], which leaves responses untouched.
///
/// # Examples
///
/// ```
/// use cacheware::cache::CacheLimiter;
///
/// assert_eq!("private-no-expire".parse(), Ok(CacheLimiter::PrivateNoExpire));
/// assert_eq!("no-cache".parse(), Ok(CacheLimiter::NoCache));
/// assert_eq!("limit".parse(), Ok(CacheLimiter::None));
/// assert_eq!(CacheLimiter::NoCache.to_string(), "nocache");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum CacheLimiter {
    Public,
    Private,
    PrivateNoExpire,
    NoCache,
    #[default]
    None,
}

impl CacheLimiter {
    /// Returns the canonical identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::PrivateNoExpire => "private_no_expire",
            Self::NoCache => "nocache",
            Self::None => "none",
        }
    }
}

impl From<&str> for CacheLimiter {
    fn from(s: &str) -> Self {
        match s {
            "public" => Self::Public,
            "private" => Self::Private,
            "private_no_expire" | "private-no-expire" => Self::PrivateNoExpire,
            "nocache" | "no-cache" => Self::NoCache,
            _ => Self::None,
        }
    }
}

impl FromStr for CacheLimiter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<String> for CacheLimiter {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl fmt::Display for CacheLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller overrides for the cache middleware.
///
/// Unset fields fall back to the session environment. `mode` is also
/// accepted under the key `limiter`.
///
/// # Examples
///
/// ```
/// use cacheware::cache::{CacheLimiter, CacheOptions};
///
/// let options = CacheOptions::new().mode("public").expire_minutes(3);
/// assert_eq!(options.mode, Some(CacheLimiter::Public));
/// assert_eq!(options.expire_minutes, Some(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheOptions {
    #[serde(alias = "limiter")]
    pub mode: Option<CacheLimiter>,
    #[serde(alias = "expire")]
    pub expire_minutes: Option<i64>,
}

impl CacheOptions {
    /// Options with nothing overridden.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(mut self, mode: impl Into<CacheLimiter>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    #[must_use]
    pub fn expire_minutes(mut self, minutes: i64) -> Self {
        self.expire_minutes = Some(minutes);
        self
    }
}

/// Effective, validated cache settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    pub limiter: CacheLimiter,
    pub expire_minutes: u64,
}

impl CacheSettings {
    /// Builds settings directly, validating `expire_minutes`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NegativeExpire`] or [`ConfigError::ExpireTooLarge`].
    pub fn new(limiter: CacheLimiter, expire_minutes: i64) -> Result<Self, ConfigError> {
        Ok(Self {
            limiter,
            expire_minutes: validate_expire(expire_minutes)?,
        })
    }

    /// Merges `options` over the defaults reported by `session`.
    ///
    /// The environment's expiry falls back to [`DEFAULT_EXPIRE_MINUTES`]
    /// when it is `0`.
    ///
    /// # Errors
    ///
    /// Fails when the effective expiry, from either source, is negative or
    /// above [`MAX_EXPIRE_MINUTES`].
    pub fn resolve(
        session: &dyn SessionEnvironment,
        options: &CacheOptions,
    ) -> Result<Self, ConfigError> {
        let limiter = match options.mode {
            Some(limiter) => limiter,
            None => CacheLimiter::from(session.cache_limiter()),
        };

        let expire_minutes = match options.expire_minutes {
            Some(minutes) => validate_expire(minutes)?,
            None => match validate_expire(session.cache_expire())? {
                0 => DEFAULT_EXPIRE_MINUTES,
                minutes => minutes,
            },
        };

        tracing::debug!(
            limiter = %limiter,
            expire_minutes,
            "resolved cache limiter settings"
        );

        Ok(Self {
            limiter,
            expire_minutes,
        })
    }

    /// Freshness lifetime in seconds.
    pub fn max_age(&self) -> u64 {
        self.expire_minutes * 60
    }
}

fn validate_expire(minutes: i64) -> Result<u64, ConfigError> {
    let value = u64::try_from(minutes).map_err(|_| ConfigError::NegativeExpire { minutes })?;
    if value > MAX_EXPIRE_MINUTES {
        return Err(ConfigError::ExpireTooLarge {
            minutes,
            max: MAX_EXPIRE_MINUTES,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::session::{SessionIni, SessionSettings};

    fn session(limiter: &str, expire: i64) -> SessionSettings {
        SessionSettings::new(SessionIni {
            cache_limiter: limiter.to_string(),
            cache_expire: expire,
            ..SessionIni::default()
        })
    }

    #[test]
    fn parses_canonical_and_dashed_names() {
        assert_eq!(CacheLimiter::from("public"), CacheLimiter::Public);
        assert_eq!(CacheLimiter::from("private"), CacheLimiter::Private);
        assert_eq!(CacheLimiter::from("private_no_expire"), CacheLimiter::PrivateNoExpire);
        assert_eq!(CacheLimiter::from("private-no-expire"), CacheLimiter::PrivateNoExpire);
        assert_eq!(CacheLimiter::from("nocache"), CacheLimiter::NoCache);
        assert_eq!(CacheLimiter::from("no-cache"), CacheLimiter::NoCache);
    }

    #[test]
    fn unknown_and_empty_names_are_none() {
        assert_eq!(CacheLimiter::from(""), CacheLimiter::None);
        assert_eq!(CacheLimiter::from("none"), CacheLimiter::None);
        assert_eq!(CacheLimiter::from("limit"), CacheLimiter::None);
        assert_eq!(CacheLimiter::from("PUBLIC"), CacheLimiter::None);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for limiter in [
            CacheLimiter::Public,
            CacheLimiter::Private,
            CacheLimiter::PrivateNoExpire,
            CacheLimiter::NoCache,
            CacheLimiter::None,
        ] {
            assert_eq!(CacheLimiter::from(limiter.to_string()), limiter);
        }
    }

    #[test]
    fn defaults_come_from_session() {
        let settings = CacheSettings::resolve(&session("private", 30), &CacheOptions::new()).unwrap();
        assert_eq!(settings.limiter, CacheLimiter::Private);
        assert_eq!(settings.expire_minutes, 30);
    }

    #[test]
    fn zero_session_expire_falls_back_to_180() {
        let settings = CacheSettings::resolve(&session("public", 0), &CacheOptions::new()).unwrap();
        assert_eq!(settings.expire_minutes, DEFAULT_EXPIRE_MINUTES);
        assert_eq!(settings.max_age(), 10_800);
    }

    #[test]
    fn overrides_win_key_by_key() {
        let options = CacheOptions::new().expire_minutes(3);
        let settings = CacheSettings::resolve(&session("nocache", 60), &options).unwrap();
        assert_eq!(settings.limiter, CacheLimiter::NoCache);
        assert_eq!(settings.expire_minutes, 3);

        let options = CacheOptions::new().mode("public");
        let settings = CacheSettings::resolve(&session("nocache", 60), &options).unwrap();
        assert_eq!(settings.limiter, CacheLimiter::Public);
        assert_eq!(settings.expire_minutes, 60);
    }

    #[test]
    fn explicit_zero_override_is_kept() {
        let options = CacheOptions::new().expire_minutes(0);
        let settings = CacheSettings::resolve(&session("public", 60), &options).unwrap();
        assert_eq!(settings.expire_minutes, 0);
        assert_eq!(settings.max_age(), 0);
    }

    #[test]
    fn negative_expire_is_rejected() {
        let options = CacheOptions::new().expire_minutes(-1);
        assert_eq!(
            CacheSettings::resolve(&session("public", 60), &options),
            Err(ConfigError::NegativeExpire { minutes: -1 })
        );
        assert_eq!(
            CacheSettings::resolve(&session("public", -5), &CacheOptions::new()),
            Err(ConfigError::NegativeExpire { minutes: -5 })
        );
    }

    #[test]
    fn oversized_expire_is_rejected() {
        let too_big = MAX_EXPIRE_MINUTES as i64 + 1;
        assert!(matches!(
            CacheSettings::new(CacheLimiter::Public, too_big),
            Err(ConfigError::ExpireTooLarge { .. })
        ));
    }

    #[test]
    fn options_deserialize_from_json() {
        let options: CacheOptions =
            serde_json::from_str(r#"{"mode": "private-no-expire", "expire_minutes": 5}"#).unwrap();
        assert_eq!(options.mode, Some(CacheLimiter::PrivateNoExpire));
        assert_eq!(options.expire_minutes, Some(5));

        let options: CacheOptions =
            serde_json::from_str(r#"{"limiter": "nocache", "expire": 0}"#).unwrap();
        assert_eq!(options.mode, Some(CacheLimiter::NoCache));
        assert_eq!(options.expire_minutes, Some(0));

        let options: CacheOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, CacheOptions::new());
    }

    #[test]
    fn null_mode_in_json_falls_back_to_session() {
        let options: CacheOptions = serde_json::from_str(r#"{"mode": null}"#).unwrap();
        assert_eq!(options.mode, None);

        let settings = CacheSettings::resolve(&session("private", 30), &options).unwrap();
        assert_eq!(settings.limiter, CacheLimiter::Private);
    }

    #[test]
    fn unknown_mode_in_json_is_none() {
        let options: CacheOptions = serde_json::from_str(r#"{"mode": "limit"}"#).unwrap();
        assert_eq!(options.mode, Some(CacheLimiter::None));
    }
}

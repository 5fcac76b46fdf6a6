use std::env;

use tracing::warn;

pub const DEFAULT_ACCESS_SECRET: &str = "genixhub-dev-access-secret-change-me";
pub const DEFAULT_REFRESH_SECRET: &str = "genixhub-dev-refresh-secret-change-me";

/// 15 minutes
pub const DEFAULT_ACCESS_EXPIRY: i64 = 15 * 60;
/// 7 days
pub const DEFAULT_REFRESH_EXPIRY: i64 = 7 * 24 * 60 * 60;

#[derive(Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    /// Access token lifetime in seconds
    pub access_token_expiry: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("access_secret", &"***")
            .field("refresh_secret", &"***")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish()
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_secret: DEFAULT_ACCESS_SECRET.to_string(),
            refresh_secret: DEFAULT_REFRESH_SECRET.to_string(),
            access_token_expiry: DEFAULT_ACCESS_EXPIRY,
            refresh_token_expiry: DEFAULT_REFRESH_EXPIRY,
        }
    }
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let access_secret = env::var("JWT_SECRET").ok().filter(|s| !s.is_empty());
        let refresh_secret = env::var("JWT_REFRESH_SECRET").ok().filter(|s| !s.is_empty());

        if access_secret.is_none() {
            warn!("JWT_SECRET is not set, using the development fallback");
        }
        if refresh_secret.is_none() {
            warn!("JWT_REFRESH_SECRET is not set, using the development fallback");
        }

        Self {
            access_secret: access_secret.unwrap_or_else(|| DEFAULT_ACCESS_SECRET.to_string()),
            refresh_secret: refresh_secret.unwrap_or_else(|| DEFAULT_REFRESH_SECRET.to_string()),
            access_token_expiry: expiry_from_env("JWT_EXPIRES_IN", DEFAULT_ACCESS_EXPIRY),
            refresh_token_expiry: expiry_from_env("JWT_REFRESH_EXPIRES_IN", DEFAULT_REFRESH_EXPIRY),
        }
    }

    pub fn uses_default_secrets(&self) -> bool {
        self.access_secret == DEFAULT_ACCESS_SECRET || self.refresh_secret == DEFAULT_REFRESH_SECRET
    }
}

fn expiry_from_env(var: &str, default: i64) -> i64 {
    match env::var(var) {
        Ok(raw) => parse_duration_secs(&raw).unwrap_or_else(|| {
            warn!(variable = var, value = %raw, default, "Invalid duration, using default");
            default
        }),
        Err(_) => default,
    }
}

/// Parses `"900"`, `"30s"`, `"15m"`, `"12h"` or `"7d"` into seconds.
///
/// Returns `None` for anything else, including zero and negative values.
pub fn parse_duration_secs(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (digits, multiplier) = match raw.chars().last()? {
        's' => (&raw[..raw.len() - 1], 1),
        'm' => (&raw[..raw.len() - 1], 60),
        'h' => (&raw[..raw.len() - 1], 60 * 60),
        'd' => (&raw[..raw.len() - 1], 24 * 60 * 60),
        c if c.is_ascii_digit() => (raw, 1),
        _ => return None,
    };

    let value: i64 = digits.parse().ok()?;
    if value <= 0 {
        return None;
    }
    value.checked_mul(multiplier)
}

//! Runtime configuration, read once from the environment at startup.

use std::net::SocketAddr;

/// Maximum accepted request body (form posts are tiny).
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

/// Field limits for listing submissions.
pub const MAX_TITLE_LEN: usize = 64;
pub const MAX_DESCRIPTION_LEN: usize = 256;
pub const MAX_CATEGORY_LEN: usize = 32;

/// Single-segment paths served by fixed routes. A listing with one of these
/// titles could never be reached at `/{title}`.
pub const RESERVED_TITLES: &[&str] = &[
    "inactive",
    "categories",
    "watchlist_view",
    "login",
    "logout",
    "register",
    "create",
];

/// Lifetime of a login session (two weeks).
pub const SESSION_TTL_SECS: i64 = 14 * 24 * 60 * 60;

/// Field limits for registration.
pub const MAX_USERNAME_LEN: usize = 150;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    /// Drop and recreate every table on startup.
    pub reset_database: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let bind_addr = parse_var("BIND_ADDR", DEFAULT_BIND_ADDR.to_string())?;
        let max_connections = parse_var("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let reset_database = parse_var("RESET_DATABASE", false)?;

        Ok(Self {
            database_url,
            bind_addr: bind_addr
                .parse()
                .map_err(|_| ConfigError::Invalid {
                    name: "BIND_ADDR",
                    value: bind_addr.clone(),
                })?,
            max_connections,
            reset_database,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_var_falls_back_to_default_when_unset() {
        let value: u32 = parse_var("AUCTION_TEST_SURELY_UNSET_VAR", 7).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn parse_var_rejects_garbage() {
        std::env::set_var("AUCTION_TEST_BAD_BOOL", "maybe");
        let err = parse_var::<bool>("AUCTION_TEST_BAD_BOOL", false).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "AUCTION_TEST_BAD_BOOL", .. }));
    }
}

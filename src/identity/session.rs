// region:    --- Imports
use super::model::User;
use crate::config::{SESSION_COOKIE, SESSION_TTL_SECS};
use crate::database::DatabaseManager;
use crate::error::AuctionError;
use crate::query;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
// endregion: --- Imports

/// The authenticated user behind a request.
///
/// Handlers that take this extractor reject anonymous requests with
/// `401 Unauthenticated` before their body runs.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub token: String,
}

#[async_trait]
impl FromRequestParts<Arc<DatabaseManager>> for CurrentUser {
    type Rejection = AuctionError;

    async fn from_request_parts(
        parts: &mut Parts,
        db_manager: &Arc<DatabaseManager>,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers).ok_or(AuctionError::Unauthenticated)?;
        let cutoff = session_cutoff(Utc::now());
        let user = query::handlers::get_session_user(db_manager, &token, cutoff)
            .await?
            .ok_or(AuctionError::Unauthenticated)?;
        Ok(CurrentUser { user, token })
    }
}

/// Sessions created at or before this instant have expired.
pub fn session_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::seconds(SESSION_TTL_SECS)
}

/// Session token from `Authorization: Bearer …` or the session cookie.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|t| !t.is_empty())
}

/// `Set-Cookie` value that stores `token`.
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// `Set-Cookie` value that clears the session cookie.
pub fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn token_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; session=abc123"));
        assert_eq!(session_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn bearer_header_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("session=from-cookie"));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(session_token(&headers).as_deref(), Some("from-header"));
    }

    #[test]
    fn missing_or_empty_token_is_none() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_token(&headers), None);
        headers.insert(COOKIE, HeaderValue::from_static("session="));
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn sessions_expire_after_their_ttl() {
        let now = Utc::now();
        let cutoff = session_cutoff(now);
        assert_eq!(now - cutoff, Duration::seconds(SESSION_TTL_SECS));
        assert!(cutoff < now);
    }

    #[test]
    fn cookie_values_carry_the_token() {
        assert!(session_cookie("t0k").starts_with("session=t0k;"));
        assert!(expired_session_cookie().contains("Max-Age=0"));
    }
}

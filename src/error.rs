// region:    --- Imports
use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;
// endregion: --- Imports

/// Every failure a request can end in.
#[derive(Debug, thiserror::Error)]
pub enum AuctionError {
    #[error("A listing with that title already exists, try naming it differently.")]
    DuplicateTitle,

    #[error("Username already taken.")]
    DuplicateUsername,

    #[error("Bid must be higher than starting bid or highest bid!")]
    BidTooLow { current_bid: i64 },

    #[error("This auction is closed.")]
    AuctionClosed,

    #[error("Only the owner of a listing can close its auction.")]
    NotOwner,

    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid username and/or password.")]
    InvalidCredentials,

    #[error("You must be logged in to do that.")]
    Unauthenticated,

    #[error("{0}")]
    Validation(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type AuctionResult<T> = Result<T, AuctionError>;

impl AuctionError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Stable machine-readable code for the response body.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateTitle => "DUPLICATE_TITLE",
            Self::DuplicateUsername => "DUPLICATE_USERNAME",
            Self::BidTooLow { .. } => "LOW_BID",
            Self::AuctionClosed => "ALREADY_ENDED",
            Self::NotOwner => "NOT_OWNER",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Validation(_) => "INVALID_INPUT",
            Self::PasswordHash(_) | Self::Database(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BidTooLow { .. } | Self::AuctionClosed => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidCredentials | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::NotOwner => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::DuplicateTitle | Self::DuplicateUsername => StatusCode::CONFLICT,
            Self::PasswordHash(_) | Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// True when the database rejected a write on a unique constraint.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// A form body that does not deserialize is bad input like any other.
impl From<FormRejection> for AuctionError {
    fn from(rejection: FormRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for AuctionError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{:<12} --> {:?}", "Error", self);
        }

        let mut body = serde_json::json!({
            "error": self.to_string(),
            "code": self.code(),
        });
        if let Self::BidTooLow { current_bid } = self {
            body["current_bid"] = current_bid.into();
        }
        // internals stay in the log
        if status.is_server_error() {
            body["error"] = "Internal server error".into();
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_client_statuses() {
        assert_eq!(AuctionError::DuplicateTitle.status(), StatusCode::CONFLICT);
        assert_eq!(AuctionError::DuplicateUsername.status(), StatusCode::CONFLICT);
        assert_eq!(
            AuctionError::BidTooLow { current_bid: 10 }.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuctionError::not_found("Listing").status(), StatusCode::NOT_FOUND);
        assert_eq!(AuctionError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuctionError::NotOwner.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn database_errors_are_internal() {
        let err = AuctionError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "INTERNAL");
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }

    #[test]
    fn not_found_names_the_missing_entity() {
        assert_eq!(AuctionError::not_found("Listing 'Chair'").to_string(), "Listing 'Chair' not found");
    }
}

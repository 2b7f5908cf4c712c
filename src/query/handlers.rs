// region:    --- Imports
use super::queries;
use crate::bidding::model::Bid;
use crate::catalog::model::Listing;
use crate::comments::Comment;
use crate::database::DatabaseManager;
use crate::error::{AuctionError, AuctionResult};
use crate::identity::model::User;
use chrono::{DateTime, Utc};
use sqlx::Error as SqlxError;
use sqlx::Row;
use tracing::info;

// endregion: --- Imports

// region:    --- Catalog Queries

/// Active listings
pub async fn get_active_listings(db_manager: &DatabaseManager) -> Result<Vec<Listing>, SqlxError> {
    info!("{:<12} --> Active listings", "Query");
    sqlx::query_as::<_, Listing>(queries::GET_ACTIVE_LISTINGS)
        .fetch_all(db_manager.pool())
        .await
}

/// Closed listings
pub async fn get_inactive_listings(
    db_manager: &DatabaseManager,
) -> Result<Vec<Listing>, SqlxError> {
    info!("{:<12} --> Inactive listings", "Query");
    sqlx::query_as::<_, Listing>(queries::GET_INACTIVE_LISTINGS)
        .fetch_all(db_manager.pool())
        .await
}

/// Listings in a category
pub async fn get_listings_by_category(
    db_manager: &DatabaseManager,
    category: &str,
) -> Result<Vec<Listing>, SqlxError> {
    info!("{:<12} --> Listings in category '{}'", "Query", category);
    sqlx::query_as::<_, Listing>(queries::GET_LISTINGS_BY_CATEGORY)
        .bind(category)
        .fetch_all(db_manager.pool())
        .await
}

/// Every category in use
pub async fn get_distinct_categories(
    db_manager: &DatabaseManager,
) -> Result<Vec<String>, SqlxError> {
    info!("{:<12} --> Distinct categories", "Query");
    let rows = sqlx::query(queries::GET_DISTINCT_CATEGORIES)
        .fetch_all(db_manager.pool())
        .await?;
    rows.iter().map(|row| row.try_get("category")).collect()
}

/// Listing by title
pub async fn get_listing_by_title(
    db_manager: &DatabaseManager,
    title: &str,
) -> AuctionResult<Listing> {
    info!("{:<12} --> Listing '{}'", "Query", title);
    sqlx::query_as::<_, Listing>(queries::GET_LISTING_BY_TITLE)
        .bind(title)
        .fetch_optional(db_manager.pool())
        .await?
        .ok_or_else(|| AuctionError::not_found(format!("Listing '{title}'")))
}

/// Bid history of a listing
pub async fn get_listing_bids(
    db_manager: &DatabaseManager,
    listing_id: i64,
) -> Result<Vec<Bid>, SqlxError> {
    info!("{:<12} --> Bids on listing id: {}", "Query", listing_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Bid>(queries::GET_LISTING_BIDS)
                    .bind(listing_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// Comments on a listing
pub async fn get_listing_comments(
    db_manager: &DatabaseManager,
    listing_id: i64,
) -> Result<Vec<Comment>, SqlxError> {
    info!("{:<12} --> Comments on listing id: {}", "Query", listing_id);
    sqlx::query_as::<_, Comment>(queries::GET_LISTING_COMMENTS)
        .bind(listing_id)
        .fetch_all(db_manager.pool())
        .await
}

/// Listings the user currently watches
pub async fn get_watched_listings(
    db_manager: &DatabaseManager,
    user_id: i64,
) -> Result<Vec<Listing>, SqlxError> {
    info!("{:<12} --> Watchlist of user id: {}", "Query", user_id);
    sqlx::query_as::<_, Listing>(queries::GET_WATCHED_LISTINGS)
        .bind(user_id)
        .fetch_all(db_manager.pool())
        .await
}

// endregion: --- Catalog Queries

// region:    --- User Queries

/// Username for a user id
pub async fn get_username(
    db_manager: &DatabaseManager,
    user_id: i64,
) -> Result<Option<String>, SqlxError> {
    sqlx::query_scalar::<_, String>(queries::GET_USERNAME)
        .bind(user_id)
        .fetch_optional(db_manager.pool())
        .await
}

/// User by username
pub async fn get_user_by_username(
    db_manager: &DatabaseManager,
    username: &str,
) -> Result<Option<User>, SqlxError> {
    sqlx::query_as::<_, User>(queries::GET_USER_BY_USERNAME)
        .bind(username)
        .fetch_optional(db_manager.pool())
        .await
}

/// User owning a live session token. Sessions created at or before `cutoff` are ignored.
pub async fn get_session_user(
    db_manager: &DatabaseManager,
    token: &str,
    cutoff: DateTime<Utc>,
) -> Result<Option<User>, SqlxError> {
    sqlx::query_as::<_, User>(queries::GET_SESSION_USER)
        .bind(token)
        .bind(cutoff)
        .fetch_optional(db_manager.pool())
        .await
}

// endregion: --- User Queries

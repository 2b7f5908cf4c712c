//! Per-user watch flags on listings.
// region:    --- Imports
use crate::catalog::model::Listing;
use crate::database::DatabaseManager;
use crate::error::{AuctionError, AuctionResult};
use crate::identity::model::User;
use serde::{Deserialize, Serialize};
use tracing::info;
// endregion: --- Imports

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WatchlistEntry {
    pub id: i64,
    pub user_id: i64,
    pub listing_id: i64,
    pub on_watchlist: bool,
}

// The no-op update makes RETURNING yield the existing row on conflict.
const UPSERT_ENTRY: &str = r#"
    INSERT INTO watchlist (user_id, listing_id, on_watchlist)
    VALUES ($1, $2, FALSE)
    ON CONFLICT (user_id, listing_id) DO UPDATE SET user_id = EXCLUDED.user_id
    RETURNING id, user_id, listing_id, on_watchlist
"#;

const TOGGLE_ENTRY: &str = r#"
    UPDATE watchlist
    SET on_watchlist = NOT on_watchlist
    WHERE user_id = $1 AND listing_id = $2
    RETURNING id, user_id, listing_id, on_watchlist
"#;

/// The user's entry for a listing, created unwatched if it does not exist yet.
pub async fn get_or_create(
    db_manager: &DatabaseManager,
    user: &User,
    listing: &Listing,
) -> AuctionResult<WatchlistEntry> {
    let entry = sqlx::query_as::<_, WatchlistEntry>(UPSERT_ENTRY)
        .bind(user.id)
        .bind(listing.id)
        .fetch_one(db_manager.pool())
        .await?;
    Ok(entry)
}

/// Flip the watch flag on an existing entry.
pub async fn toggle(
    db_manager: &DatabaseManager,
    user: &User,
    listing: &Listing,
) -> AuctionResult<WatchlistEntry> {
    let entry = sqlx::query_as::<_, WatchlistEntry>(TOGGLE_ENTRY)
        .bind(user.id)
        .bind(listing.id)
        .fetch_optional(db_manager.pool())
        .await?
        .ok_or_else(|| {
            AuctionError::not_found(format!(
                "Watchlist entry for '{}' on '{}'",
                user.username, listing.title
            ))
        })?;

    info!(
        "{:<12} --> Watchlist '{}' for {}: {}",
        "Command", listing.title, user.username, entry.on_watchlist
    );
    Ok(entry)
}

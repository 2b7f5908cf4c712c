// region:    --- Imports
use super::model::{Listing, NewListing};
use crate::database::DatabaseManager;
use crate::error::{is_unique_violation, AuctionError, AuctionResult};
use crate::identity::model::User;
use crate::query::queries::listing_columns;
use tracing::{info, warn};
// endregion: --- Imports

const INSERT_LISTING: &str = concat!(
    "INSERT INTO listings (title, description, starting_bid, current_bid, image_url, category, active, owner_id, highest_bidder_id)
     VALUES ($1, $2, $3, $3, $4, $5, TRUE, $6, $6)
     RETURNING ",
    listing_columns!()
);

/// Create a listing owned by `owner`.
///
/// The listing opens active with `current_bid = starting_bid` and the owner
/// seeded as highest bidder. A title that already exists fails with
/// [`AuctionError::DuplicateTitle`].
pub async fn create_listing(
    db_manager: &DatabaseManager,
    owner: &User,
    listing: NewListing,
) -> AuctionResult<Listing> {
    info!(
        "{:<12} --> Create listing '{}' for {}",
        "Command", listing.title, owner.username
    );

    let result = sqlx::query_as::<_, Listing>(INSERT_LISTING)
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(listing.starting_bid)
        .bind(&listing.image_url)
        .bind(&listing.category)
        .bind(owner.id)
        .fetch_one(db_manager.pool())
        .await;

    match result {
        Ok(created) => Ok(created),
        Err(e) if is_unique_violation(&e) => {
            warn!(
                "{:<12} --> Duplicate listing title '{}'",
                "Command", listing.title
            );
            Err(AuctionError::DuplicateTitle)
        }
        Err(e) => Err(e.into()),
    }
}

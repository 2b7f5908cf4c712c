//! Auction closing: Active -> Closed, one way.
// region:    --- Imports
use crate::catalog::model::Listing;
use crate::database::DatabaseManager;
use crate::error::{AuctionError, AuctionResult};
use crate::identity::model::User;
use crate::query::queries::{self, listing_columns};
use tracing::info;
// endregion: --- Imports

const CLOSE_LISTING: &str = concat!(
    "UPDATE listings
     SET winner_id = highest_bidder_id, active = FALSE
     WHERE id = $1
     RETURNING ",
    listing_columns!()
);

/// Close the auction on the listing titled `title`, fixing its winner.
///
/// The winner is whoever is the highest bidder at this moment; with no bids
/// that is still the owner. Closing an already closed listing writes the same
/// winner again. Only the owner may close.
pub async fn close_auction(
    db_manager: &DatabaseManager,
    closer: &User,
    title: &str,
) -> AuctionResult<Listing> {
    info!(
        "{:<12} --> Close auction '{}' by {}",
        "Command", title, closer.username
    );

    let closer_id = closer.id;
    let title = title.to_string();

    let closed: AuctionResult<Listing> = db_manager
        .transaction(move |tx| {
            Box::pin(async move {
                let listing =
                    sqlx::query_as::<_, Listing>(queries::GET_LISTING_BY_TITLE_FOR_UPDATE)
                        .bind(&title)
                        .fetch_optional(&mut **tx)
                        .await?
                        .ok_or_else(|| AuctionError::not_found(format!("Listing '{title}'")))?;

                if listing.owner_id != closer_id {
                    return Err(AuctionError::NotOwner);
                }

                let closed = sqlx::query_as::<_, Listing>(CLOSE_LISTING)
                    .bind(listing.id)
                    .fetch_one(&mut **tx)
                    .await?;

                Ok::<_, AuctionError>(closed)
            })
        })
        .await;

    let closed = closed?;
    info!(
        "{:<12} --> Auction '{}' closed, winner id {:?}",
        "Command", closed.title, closed.winner_id
    );
    Ok(closed)
}

//! Bid placement.
// region:    --- Imports
use crate::catalog::model::Listing;
use crate::database::DatabaseManager;
use crate::error::{AuctionError, AuctionResult};
use crate::identity::model::User;
use crate::query::queries::{self, listing_columns};
use tracing::{info, warn};
// endregion: --- Imports

const UPDATE_HIGHEST_BID: &str = concat!(
    "UPDATE listings
     SET current_bid = $1, highest_bidder_id = $2, bid_count = bid_count + 1
     WHERE id = $3
     RETURNING ",
    listing_columns!()
);

const INSERT_BID: &str = "INSERT INTO bids (listing_id, bidder_id, amount) VALUES ($1, $2, $3)";

/// Check a bid amount against the listing it targets.
///
/// The opening bid may match the starting bid; every later bid has to beat
/// the current one.
pub fn check_bid(listing: &Listing, amount: i64) -> AuctionResult<()> {
    if !listing.is_active() {
        return Err(AuctionError::AuctionClosed);
    }

    let accepted = if listing.bid_count == 0 {
        amount >= listing.current_bid
    } else {
        amount > listing.current_bid
    };

    if accepted {
        Ok(())
    } else {
        Err(AuctionError::BidTooLow {
            current_bid: listing.current_bid,
        })
    }
}

/// Place a bid of `amount` by `bidder` on the listing titled `title`.
///
/// The listing row stays locked from the read to the write, so concurrent bids
/// on one listing are applied one after another against the fresh price.
/// Returns the listing as updated.
pub async fn place_bid(
    db_manager: &DatabaseManager,
    bidder: &User,
    title: &str,
    amount: i64,
) -> AuctionResult<Listing> {
    info!(
        "{:<12} --> Bid {} by {} on '{}'",
        "Command", amount, bidder.username, title
    );

    let bidder_id = bidder.id;
    let title = title.to_string();

    let result: AuctionResult<Listing> = db_manager
        .transaction(move |tx| {
            Box::pin(async move {
                let listing =
                    sqlx::query_as::<_, Listing>(queries::GET_LISTING_BY_TITLE_FOR_UPDATE)
                        .bind(&title)
                        .fetch_optional(&mut **tx)
                        .await?
                        .ok_or_else(|| AuctionError::not_found(format!("Listing '{title}'")))?;

                check_bid(&listing, amount)?;

                sqlx::query(INSERT_BID)
                    .bind(listing.id)
                    .bind(bidder_id)
                    .bind(amount)
                    .execute(&mut **tx)
                    .await?;

                let updated = sqlx::query_as::<_, Listing>(UPDATE_HIGHEST_BID)
                    .bind(amount)
                    .bind(bidder_id)
                    .bind(listing.id)
                    .fetch_one(&mut **tx)
                    .await?;

                Ok::<_, AuctionError>(updated)
            })
        })
        .await;

    match &result {
        Ok(listing) => info!(
            "{:<12} --> Bid accepted: current bid on '{}' is {}",
            "Command", listing.title, listing.current_bid
        ),
        Err(e) => warn!("{:<12} --> Bid rejected: {}", "Command", e),
    }
    result
}

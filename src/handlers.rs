// region:    --- Imports
use crate::auction::closing;
use crate::bidding::commands as bidding;
use crate::bidding::model::{Bid, BidForm};
use crate::catalog::commands as catalog;
use crate::catalog::model::{Listing, NewListingForm};
use crate::comments::{self, Comment, CommentForm};
use crate::database::DatabaseManager;
use crate::error::AuctionResult;
use crate::identity::commands::{self as identity, Session};
use crate::identity::model::{LoginForm, RegisterForm};
use crate::identity::session::{expired_session_cookie, session_cookie, session_token};
use crate::identity::CurrentUser;
use crate::query;
use crate::watchlist;
use axum::extract::{Path, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use crate::extract::Form;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

type Db = State<Arc<DatabaseManager>>;

/// Everything the listing page shows.
#[derive(Debug, Serialize)]
pub struct ListingDetail {
    pub listing: Listing,
    pub owner: Option<String>,
    pub highest_bidder: Option<String>,
    pub winner: Option<String>,
    pub bids: Vec<Bid>,
    pub comments: Vec<Comment>,
    pub on_watchlist: bool,
}

/// What the bid form needs to show.
#[derive(Debug, Serialize)]
pub struct BidStatus {
    pub title: String,
    pub current_bid: i64,
    pub minimum_bid: i64,
    pub active: bool,
}

impl From<&Listing> for BidStatus {
    fn from(listing: &Listing) -> Self {
        let minimum_bid = if listing.bid_count == 0 {
            listing.current_bid
        } else {
            listing.current_bid.saturating_add(1)
        };
        Self {
            title: listing.title.clone(),
            current_bid: listing.current_bid,
            minimum_bid,
            active: listing.is_active(),
        }
    }
}

fn session_response(status: StatusCode, session: Session) -> impl IntoResponse {
    (
        status,
        [(SET_COOKIE, session_cookie(&session.token))],
        Json(serde_json::json!({
            "user": session.user,
            "token": session.token,
        })),
    )
}

// region:    --- Identity Handlers

pub async fn handle_register(
    State(db_manager): Db,
    Form(form): Form<RegisterForm>,
) -> AuctionResult<impl IntoResponse> {
    info!("{:<12} --> Register", "Handler");
    let new_user = form.validate()?;
    let session = identity::register(&db_manager, new_user).await?;
    Ok(session_response(StatusCode::CREATED, session))
}

pub async fn handle_login(
    State(db_manager): Db,
    Form(form): Form<LoginForm>,
) -> AuctionResult<impl IntoResponse> {
    info!("{:<12} --> Login", "Handler");
    let session = identity::login(&db_manager, form).await?;
    Ok(session_response(StatusCode::OK, session))
}

pub async fn handle_logout(
    State(db_manager): Db,
    headers: HeaderMap,
) -> AuctionResult<impl IntoResponse> {
    info!("{:<12} --> Logout", "Handler");
    if let Some(token) = session_token(&headers) {
        identity::logout(&db_manager, &token).await?;
    }
    Ok((
        StatusCode::OK,
        [(SET_COOKIE, expired_session_cookie())],
        Json(serde_json::json!({ "message": "Logged out." })),
    ))
}

// endregion: --- Identity Handlers

// region:    --- Catalog Handlers

/// Active listings
pub async fn handle_index(State(db_manager): Db) -> AuctionResult<Json<Vec<Listing>>> {
    info!("{:<12} --> Active listings", "Handler");
    Ok(Json(query::handlers::get_active_listings(&db_manager).await?))
}

/// Closed listings
pub async fn handle_inactive(State(db_manager): Db) -> AuctionResult<Json<Vec<Listing>>> {
    info!("{:<12} --> Inactive listings", "Handler");
    Ok(Json(query::handlers::get_inactive_listings(&db_manager).await?))
}

pub async fn handle_categories(State(db_manager): Db) -> AuctionResult<Json<Vec<String>>> {
    info!("{:<12} --> Categories", "Handler");
    Ok(Json(query::handlers::get_distinct_categories(&db_manager).await?))
}

pub async fn handle_category_view(
    State(db_manager): Db,
    Path(category): Path<String>,
) -> AuctionResult<Json<Vec<Listing>>> {
    info!("{:<12} --> Category '{}'", "Handler", category);
    Ok(Json(
        query::handlers::get_listings_by_category(&db_manager, &category).await?,
    ))
}

pub async fn handle_create(
    State(db_manager): Db,
    CurrentUser { user, .. }: CurrentUser,
    Form(form): Form<NewListingForm>,
) -> AuctionResult<impl IntoResponse> {
    info!("{:<12} --> Create listing", "Handler");
    let new_listing = form.validate()?;
    let listing = catalog::create_listing(&db_manager, &user, new_listing).await?;
    Ok((StatusCode::CREATED, Json(listing)))
}

/// Listing page. Opening it makes sure the viewer has a watchlist entry.
pub async fn handle_listing(
    State(db_manager): Db,
    CurrentUser { user, .. }: CurrentUser,
    Path(title): Path<String>,
) -> AuctionResult<Json<ListingDetail>> {
    info!("{:<12} --> Listing '{}'", "Handler", title);
    let listing = query::handlers::get_listing_by_title(&db_manager, &title).await?;

    let entry = watchlist::get_or_create(&db_manager, &user, &listing).await?;
    let owner = query::handlers::get_username(&db_manager, listing.owner_id).await?;
    let highest_bidder = match listing.highest_bidder_id {
        Some(id) => query::handlers::get_username(&db_manager, id).await?,
        None => None,
    };
    let winner = match listing.winner_id {
        Some(id) => query::handlers::get_username(&db_manager, id).await?,
        None => None,
    };
    let bids = query::handlers::get_listing_bids(&db_manager, listing.id).await?;
    let comments = query::handlers::get_listing_comments(&db_manager, listing.id).await?;

    Ok(Json(ListingDetail {
        listing,
        owner,
        highest_bidder,
        winner,
        bids,
        comments,
        on_watchlist: entry.on_watchlist,
    }))
}

// endregion: --- Catalog Handlers

// region:    --- Bidding Handlers

pub async fn handle_bid_status(
    State(db_manager): Db,
    Path(title): Path<String>,
) -> AuctionResult<Json<BidStatus>> {
    info!("{:<12} --> Bid status '{}'", "Handler", title);
    let listing = query::handlers::get_listing_by_title(&db_manager, &title).await?;
    Ok(Json(BidStatus::from(&listing)))
}

pub async fn handle_bid(
    State(db_manager): Db,
    CurrentUser { user, .. }: CurrentUser,
    Path(title): Path<String>,
    Form(form): Form<BidForm>,
) -> AuctionResult<Json<serde_json::Value>> {
    info!("{:<12} --> Bid on '{}': {:?}", "Handler", title, form);
    let listing = bidding::place_bid(&db_manager, &user, &title, form.bid).await?;
    Ok(Json(serde_json::json!({
        "message": "Bid placed.",
        "current_bid": listing.current_bid,
        "bid_amount": form.bid,
        "listing": listing,
    })))
}

pub async fn handle_close(
    State(db_manager): Db,
    CurrentUser { user, .. }: CurrentUser,
    Path(title): Path<String>,
) -> AuctionResult<Json<serde_json::Value>> {
    info!("{:<12} --> Close '{}'", "Handler", title);
    let listing = closing::close_auction(&db_manager, &user, &title).await?;
    let winner = match listing.winner_id {
        Some(id) => query::handlers::get_username(&db_manager, id).await?,
        None => None,
    };
    Ok(Json(serde_json::json!({
        "message": "Auction closed.",
        "winner": winner,
        "listing": listing,
    })))
}

// endregion: --- Bidding Handlers

// region:    --- Watchlist & Comment Handlers

pub async fn handle_watchlist_view(
    State(db_manager): Db,
    CurrentUser { user, .. }: CurrentUser,
) -> AuctionResult<Json<Vec<Listing>>> {
    info!("{:<12} --> Watchlist of {}", "Handler", user.username);
    Ok(Json(
        query::handlers::get_watched_listings(&db_manager, user.id).await?,
    ))
}

pub async fn handle_watchlist_toggle(
    State(db_manager): Db,
    CurrentUser { user, .. }: CurrentUser,
    Path(title): Path<String>,
) -> AuctionResult<Json<watchlist::WatchlistEntry>> {
    info!("{:<12} --> Toggle watchlist '{}'", "Handler", title);
    let listing = query::handlers::get_listing_by_title(&db_manager, &title).await?;
    watchlist::get_or_create(&db_manager, &user, &listing).await?;
    Ok(Json(watchlist::toggle(&db_manager, &user, &listing).await?))
}

pub async fn handle_comment(
    State(db_manager): Db,
    CurrentUser { user, .. }: CurrentUser,
    Path(title): Path<String>,
    Form(form): Form<CommentForm>,
) -> AuctionResult<impl IntoResponse> {
    info!("{:<12} --> Comment on '{}'", "Handler", title);
    let body = form.validate()?;
    let listing = query::handlers::get_listing_by_title(&db_manager, &title).await?;
    let comment = comments::add_comment(&db_manager, &user, &listing, body).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

// endregion: --- Watchlist & Comment Handlers

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn listing(current_bid: i64, bid_count: i64) -> Listing {
        Listing {
            id: 1,
            title: "Chair".into(),
            description: "oak".into(),
            starting_bid: 10,
            current_bid,
            image_url: None,
            category: Some("Furniture".into()),
            active: Some(true),
            owner_id: 1,
            highest_bidder_id: Some(1),
            winner_id: None,
            bid_count,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn minimum_bid_follows_opening_rule() {
        assert_eq!(BidStatus::from(&listing(10, 0)).minimum_bid, 10);
        assert_eq!(BidStatus::from(&listing(15, 2)).minimum_bid, 16);
    }
}

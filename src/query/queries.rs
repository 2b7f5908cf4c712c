/// Columns of a listing row
macro_rules! listing_columns {
    () => {
        "id, title, description, starting_bid, current_bid, image_url, category, active, owner_id, highest_bidder_id, winner_id, bid_count, created_at"
    };
}
pub(crate) use listing_columns;

/// Active listings
pub const GET_ACTIVE_LISTINGS: &str = concat!(
    "SELECT ",
    listing_columns!(),
    " FROM listings WHERE active = TRUE ORDER BY id"
);

/// Closed listings
pub const GET_INACTIVE_LISTINGS: &str = concat!(
    "SELECT ",
    listing_columns!(),
    " FROM listings WHERE active = FALSE ORDER BY id"
);

/// Listings in one category (exact match)
pub const GET_LISTINGS_BY_CATEGORY: &str = concat!(
    "SELECT ",
    listing_columns!(),
    " FROM listings WHERE category = $1 ORDER BY id"
);

/// Distinct non-empty categories
pub const GET_DISTINCT_CATEGORIES: &str = r#"
    SELECT DISTINCT category
    FROM listings
    WHERE category IS NOT NULL AND category <> ''
    ORDER BY category
"#;

/// Listing lookup by title
pub const GET_LISTING_BY_TITLE: &str = concat!(
    "SELECT ",
    listing_columns!(),
    " FROM listings WHERE title = $1"
);

/// Listing lookup by title, locking the row for the rest of the transaction
pub const GET_LISTING_BY_TITLE_FOR_UPDATE: &str = concat!(
    "SELECT ",
    listing_columns!(),
    " FROM listings WHERE title = $1 FOR UPDATE"
);

/// Bids on a listing, oldest first
pub const GET_LISTING_BIDS: &str = r#"
    SELECT b.id, b.listing_id, b.bidder_id, u.username AS bidder, b.amount, b.bid_time
    FROM bids b
    JOIN users u ON u.id = b.bidder_id
    WHERE b.listing_id = $1
    ORDER BY b.id
"#;

/// Comments on a listing, in storage order
pub const GET_LISTING_COMMENTS: &str = r#"
    SELECT c.id, c.listing_id, c.author_id, u.username AS author, c.body, c.created_at
    FROM comments c
    JOIN users u ON u.id = c.author_id
    WHERE c.listing_id = $1
    ORDER BY c.id
"#;

/// Listings a user is watching
pub const GET_WATCHED_LISTINGS: &str = concat!(
    "SELECT ",
    "l.id, l.title, l.description, l.starting_bid, l.current_bid, l.image_url, l.category, l.active, ",
    "l.owner_id, l.highest_bidder_id, l.winner_id, l.bid_count, l.created_at",
    " FROM listings l JOIN watchlist w ON w.listing_id = l.id",
    " WHERE w.user_id = $1 AND w.on_watchlist = TRUE ORDER BY l.id"
);

/// Username by id
pub const GET_USERNAME: &str = "SELECT username FROM users WHERE id = $1";

/// User lookup by username
pub const GET_USER_BY_USERNAME: &str =
    "SELECT id, username, email, password_hash, created_at FROM users WHERE username = $1";

/// User owning a session token created after the cutoff
pub const GET_SESSION_USER: &str = r#"
    SELECT u.id, u.username, u.email, u.password_hash, u.created_at
    FROM sessions s
    JOIN users u ON u.id = s.user_id
    WHERE s.token = $1 AND s.created_at > $2
"#;

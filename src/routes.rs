// region:    --- Imports
use crate::config::BODY_LIMIT_BYTES;
use crate::database::DatabaseManager;
use crate::handlers;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
// endregion: --- Imports

/// The full HTTP surface.
pub fn app(db_manager: Arc<DatabaseManager>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::handle_index))
        .route("/inactive", get(handlers::handle_inactive))
        .route("/categories", get(handlers::handle_categories))
        .route(
            "/category_view/:category",
            get(handlers::handle_category_view),
        )
        .route("/watchlist_view", get(handlers::handle_watchlist_view))
        .route("/login", post(handlers::handle_login))
        .route(
            "/logout",
            get(handlers::handle_logout).post(handlers::handle_logout),
        )
        .route("/register", post(handlers::handle_register))
        .route("/create", post(handlers::handle_create))
        .route(
            "/bid/:listing",
            get(handlers::handle_bid_status).post(handlers::handle_bid),
        )
        .route("/close/:listing", post(handlers::handle_close))
        .route("/watchlist/:listing", post(handlers::handle_watchlist_toggle))
        .route("/comment/:listing", post(handlers::handle_comment))
        // any other single-segment path is a listing title
        .route("/:listing", get(handlers::handle_listing))
        .layer(cors)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(db_manager)
}

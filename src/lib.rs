pub mod auction;
pub mod bidding;
pub mod catalog;
pub mod comments;
pub mod config;
pub mod database;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod identity;
pub mod query;
pub mod routes;
pub mod watchlist;

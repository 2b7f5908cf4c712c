//! Listing catalog: creating listings. Catalog reads live in `query`.
pub mod commands;
pub mod model;

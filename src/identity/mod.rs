//! Accounts, password credentials and login sessions.
pub mod commands;
pub mod model;
pub mod password;
pub mod session;

pub use session::CurrentUser;

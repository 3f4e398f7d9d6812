//! Campaign Keep - TTRPG campaign management service
//!
//! Campaign, membership and content management for tabletop RPG groups,
//! with player keep bookkeeping: weekly ledgers, check-ins and history.

pub mod api;
pub mod config;
pub mod core;
pub mod database;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

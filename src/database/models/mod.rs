//! Database Models
//!
//! This module contains all database model types organized by domain.
//!
//! ## Modules
//!
//! - [`core`] - Campaigns, campaign members and currencies
//! - [`keep`] - Player keeps, facilities, hirelings and check-ins
//! - [`content`] - Shops, shop items and creatures
//!
//! All types are re-exported at the module root.

pub mod content;
pub mod core;
pub mod keep;


pub use self::content::*;
pub use self::core::*;
pub use self::keep::*;

/// Current time in the format stored by every `*_at` column.
pub(crate) fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

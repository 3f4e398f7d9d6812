//! Crate test suites
//!
//! - `common`: fixtures shared by every suite
//! - `database`: storage operations against a temporary SQLite file
//! - `property`: proptest invariants for the ledger and validation
//! - `api`: HTTP round trips through the full router

//! Domain logic for the zemli platform.
//!
//! Everything in this crate is pure (no I/O, no database): error taxonomy,
//! shared type aliases, slug generation, promo codes, unit conversions,
//! quiz answer validation, and pagination math. The `db` and `api` crates
//! both depend on it; it depends on neither.

pub mod error;
pub mod pagination;
pub mod promo;
pub mod quiz;
pub mod roles;
pub mod slug;
pub mod types;
pub mod units;

//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - `FromRow` + `Serialize` entity structs matching database rows
//! - `Deserialize` input DTOs for the write paths
//! - string-enum helpers matching the CHECK constraints on status columns

pub mod application;
pub mod contact;
pub mod page_visit;
pub mod plot;
pub mod quiz;
pub mod user;

use serde::Serialize;

/// Paged listing envelope shared by the plot and application grids.
#[derive(Debug, Serialize)]
pub struct Paged<T: Serialize> {
    pub items: Vec<T>,
    pub total_items: i64,
    pub total_pages: i64,
    pub current_page: i64,
}

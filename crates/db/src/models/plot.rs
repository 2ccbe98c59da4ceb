//! Plot entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use zemli_core::types::{DbId, Timestamp};

/// A row from the `plots` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Plot {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub area_m2: f64,
    pub price: f64,
    pub price_per_m2: f64,
    pub region: String,
    pub locality: Option<String>,
    pub land_use: String,
    pub land_category: String,
    pub status: String,
    pub is_visible: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Plot sale status, matching the CHECK constraint on `plots.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotStatus {
    Available,
    Reserved,
    Sold,
}

impl PlotStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PlotStatus::Available => "available",
            PlotStatus::Reserved => "reserved",
            PlotStatus::Sold => "sold",
        }
    }

    /// Parse a stored status string. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "available" => Some(PlotStatus::Available),
            "reserved" => Some(PlotStatus::Reserved),
            "sold" => Some(PlotStatus::Sold),
            _ => None,
        }
    }
}

/// A row from the `plot_media` table. `sort_order` values within one plot
/// are contiguous from 0.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlotMedia {
    pub id: DbId,
    pub plot_id: DbId,
    pub url: String,
    pub alt: Option<String>,
    pub sort_order: i32,
}

/// A row from the `plot_documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlotDocument {
    pub id: DbId,
    pub plot_id: DbId,
    pub url: String,
    pub title: String,
    pub sort_order: i32,
}

/// A row from the `plot_cadastral_numbers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlotCadastralNumber {
    pub id: DbId,
    pub plot_id: DbId,
    pub value: String,
}

/// A row from the `plot_communications` table (utility descriptors).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlotCommunication {
    pub id: DbId,
    pub plot_id: DbId,
    pub name: String,
    pub description: Option<String>,
}

/// A row from the `plot_features` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlotFeature {
    pub id: DbId,
    pub plot_id: DbId,
    pub value: String,
}

/// Listing row: plot columns plus the first media item's URL for the
/// grid thumbnail. Full collections are loaded only on detail fetch.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlotListItem {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub area_m2: f64,
    pub price: f64,
    pub price_per_m2: f64,
    pub region: String,
    pub locality: Option<String>,
    pub land_use: String,
    pub land_category: String,
    pub status: String,
    pub is_visible: bool,
    pub created_at: Timestamp,
    pub thumbnail_url: Option<String>,
}

/// Full plot with every owned collection, as served by the detail endpoints.
#[derive(Debug, Serialize)]
pub struct PlotDetail {
    #[serde(flatten)]
    pub plot: Plot,
    /// Display-unit area (1 sotka = 100 m²), derived from `area_m2`.
    pub area_sotka: f64,
    pub media: Vec<PlotMedia>,
    pub documents: Vec<PlotDocument>,
    pub cadastral_numbers: Vec<PlotCadastralNumber>,
    pub communications: Vec<PlotCommunication>,
    pub features: Vec<PlotFeature>,
}

/// Incoming media item. A present `id` refers to an existing row to keep;
/// `None` marks a new upload. Position in the list becomes `sort_order`.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaInput {
    pub id: Option<DbId>,
    pub url: String,
    pub alt: Option<String>,
}

/// Incoming document item, reconciled by id like media.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentInput {
    pub id: Option<DbId>,
    pub url: String,
    pub title: String,
}

/// Incoming communication descriptor (always replaced wholesale).
#[derive(Debug, Clone, Deserialize)]
pub struct CommunicationInput {
    pub name: String,
    pub description: Option<String>,
}

/// DTO for creating or fully updating a plot. The slug is never accepted
/// from the caller; it is derived from `title` server-side.
#[derive(Debug, Deserialize)]
pub struct PlotInput {
    pub title: String,
    pub description: Option<String>,
    pub area_m2: f64,
    pub price: f64,
    pub price_per_m2: f64,
    pub region: String,
    pub locality: Option<String>,
    pub land_use: String,
    pub land_category: String,
    pub status: Option<String>,
    pub is_visible: Option<bool>,
    #[serde(default)]
    pub media: Vec<MediaInput>,
    #[serde(default)]
    pub documents: Vec<DocumentInput>,
    #[serde(default)]
    pub cadastral_numbers: Vec<String>,
    #[serde(default)]
    pub communications: Vec<CommunicationInput>,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Query parameters for the listing endpoints. All filters are optional
/// and AND-combined. `status` is honored only by the admin grid.
#[derive(Debug, Default, Deserialize)]
pub struct PlotListParams {
    pub q: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub region: Option<String>,
    pub land_use: Option<String>,
    pub land_category: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
    pub page: Option<i64>,
}

/// Sort orders for plot listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    AreaAsc,
    AreaDesc,
}

impl PlotSort {
    /// Parse the `sort` query parameter. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "newest" => Some(PlotSort::Newest),
            "price_asc" => Some(PlotSort::PriceAsc),
            "price_desc" => Some(PlotSort::PriceDesc),
            "area_asc" => Some(PlotSort::AreaAsc),
            "area_desc" => Some(PlotSort::AreaDesc),
            _ => None,
        }
    }

    /// The ORDER BY clause for this sort. `id DESC` breaks creation-time ties
    /// deterministically.
    pub fn order_by(self) -> &'static str {
        match self {
            PlotSort::Newest => "p.created_at DESC, p.id DESC",
            PlotSort::PriceAsc => "p.price ASC, p.id DESC",
            PlotSort::PriceDesc => "p.price DESC, p.id DESC",
            PlotSort::AreaAsc => "p.area_m2 ASC, p.id DESC",
            PlotSort::AreaDesc => "p.area_m2 DESC, p.id DESC",
        }
    }
}

/// Distinct filter values across eligible plots, for the filter UI.
#[derive(Debug, Serialize)]
pub struct FilterOptions {
    pub regions: Vec<String>,
    pub land_uses: Vec<String>,
    pub land_categories: Vec<String>,
}

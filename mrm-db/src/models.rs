//! Query result model structs.
//!
//! All structs derive `Serialize` so the CLI can print them as JSON.

use serde::Serialize;

/// Aggregate totals over the live dataset.
///
/// Always recomputed by [`crate::Database::query_totals`]; never stored.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Totals {
    /// Sum of `dealsCompleted` over all basins.
    pub total_deals: u64,
    /// Sum of `acresAcquired` over all basins.
    pub total_acres: u64,
    /// Longest `yearsActive` of any basin.
    pub years_in_business: u32,
    /// Distinct jurisdiction codes across all basins.
    pub states_covered: u32,
    pub basin_count: u32,
    pub project_count: u32,
    /// Sum of project purchase prices in whole dollars.
    pub total_invested: u64,
}

/// One card of the basin fallback grid.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BasinCard {
    pub basin_id: String,
    pub full_name: String,
    pub display_name: String,
    /// "North Dakota, Montana"
    pub states: String,
    pub deals_completed: u32,
    pub acres_acquired: u64,
    pub years_active: u32,
    pub project_count: u32,
    pub cta_text: String,
    pub cta_url: String,
}

/// One card of the project-centric fallback grid, also used for
/// per-basin project lists.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProjectCard {
    pub project_id: String,
    pub basin_id: String,
    pub basin_name: String,
    pub name: String,
    pub purchase_price: u64,
    pub acres: f64,
    pub production_bopd: f64,
    pub status: String,
    pub acquisition_year: u16,
    pub description: String,
    pub cta_url: String,
}

//! Geographic dataset for the mineral rights map.
//!
//! Basins (regions rendered as polygons) and project sites (points inside a
//! basin) are immutable for a page session. They arrive either from the
//! embedded fixtures or from a fetched JSON document, and are validated once
//! when the [`Dataset`] is built.

pub mod basin;
pub mod dataset;
pub mod error;
pub mod geometry;
pub mod project;

pub use basin::Basin;
pub use dataset::{Dataset, DatasetDocument, StoredTotals};
pub use error::DatasetError;
pub use geometry::{BasinShape, Bounds, LngLat};
pub use project::{ProjectSite, ProjectStatus};

/// Largest acreage or dollar amount a dataset may carry; amounts are stored
/// as signed 64-bit integers.
pub const MAX_AMOUNT: u64 = i64::MAX as u64;

/// Embedded basin document (`fixtures/basins.json`).
pub static BASINS_JSON: &str = include_str!("../../fixtures/basins.json");

/// Embedded project sites (`fixtures/projects.csv`).
pub static PROJECTS_CSV: &str = include_str!("../../fixtures/projects.csv");

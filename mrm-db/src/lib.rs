//! In-memory SQLite query layer for the basin and project dataset.
//!
//! The validated [`mrm_geo::Dataset`] is loaded once per page session into an
//! in-memory SQLite database. Every aggregate the UI shows (trust indicator
//! totals, fallback cards, per-basin project lists) is derived with SQL at
//! query time, so no counter is kept alongside the dataset that could drift.
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper for interior mutability in single-threaded WASM
//! - In-memory SQLite via `rusqlite`
//! - Typed query methods returning serializable structs from [`models`]
//!
//! # Usage
//!
//! ```rust
//! use mrm_db::Database;
//! use mrm_geo::Dataset;
//!
//! let dataset = Dataset::embedded().unwrap();
//! let db = Database::from_dataset(&dataset).unwrap();
//! let totals = db.query_totals().unwrap();
//! assert_eq!(totals.basin_count, dataset.basins().len() as u32);
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.
//! - `basins` - Basin presentation data and statistics
//! - `basin_states` - Ordered (code, full name) pairs per basin
//! - `projects` - Project sites with financials

pub mod schema;
mod loader;
mod queries;
pub mod models;

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database holding one session's dataset.
///
/// Cheaply cloneable (via `Rc`) for sharing across Dioxus components in a
/// single-threaded WASM environment.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }

    /// Create a database and load `dataset` into it.
    pub fn from_dataset(dataset: &mrm_geo::Dataset) -> anyhow::Result<Self> {
        let db = Self::new()?;
        db.load_dataset(dataset)?;
        Ok(db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_creates_successfully() {
        let db = Database::new();
        assert!(db.is_ok(), "Database should create without errors");
    }

    #[test]
    fn database_is_cloneable() {
        let db = Database::new().unwrap();
        let db2 = db.clone();
        db.load_dataset(&mrm_geo::Dataset::embedded().unwrap()).unwrap();
        let cards = db2.query_basin_cards().unwrap();
        assert_eq!(cards.len(), 9, "Clone should see same data via shared Rc");
    }

    #[test]
    fn largest_storable_acreage_round_trips() {
        let json = format!(
            r#"{{"basins": [{{
                "id": "permian",
                "name": "Permian Basin",
                "displayName": "Permian",
                "statistics": {{"dealsCompleted": 1, "acresAcquired": {}, "yearsActive": 1}},
                "states": ["TX"],
                "statesFullName": ["Texas"],
                "coordinates": {{"center": [-102.0, 31.5]}},
                "cta": {{"text": "Sell", "url": "/contact?basin=permian"}}
            }}]}}"#,
            mrm_geo::MAX_AMOUNT
        );
        let dataset = mrm_geo::Dataset::from_json(&json).unwrap();
        let db = Database::from_dataset(&dataset).unwrap();
        let cards = db.query_basin_cards().unwrap();
        assert_eq!(cards[0].acres_acquired, mrm_geo::MAX_AMOUNT);
    }

    #[test]
    fn database_starts_empty() {
        let db = Database::new().unwrap();
        assert!(db.query_basin_cards().unwrap().is_empty());
        assert_eq!(db.query_totals().unwrap().total_deals, 0);
    }
}

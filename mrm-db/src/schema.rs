//! SQL schema definitions for the in-memory SQLite database.

/// Returns the full SQL schema as a single batch string.
///
/// - `basins` - one row per basin; `sort_order` keeps dataset order
/// - `basin_states` - jurisdiction codes and full names, `position` keeps their order
/// - `projects` - project sites; `basin_id` references `basins`
///
/// Totals are never stored; they come from `SUM`/`COUNT` over these tables.
pub fn create_schema() -> &'static str {
    r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS basins (
        id TEXT PRIMARY KEY,
        sort_order INTEGER NOT NULL,
        full_name TEXT NOT NULL,
        display_name TEXT NOT NULL,
        description TEXT NOT NULL,
        deals_completed INTEGER NOT NULL CHECK (deals_completed >= 0),
        acres_acquired INTEGER NOT NULL CHECK (acres_acquired >= 0),
        years_active INTEGER NOT NULL CHECK (years_active >= 0),
        center_lon REAL NOT NULL,
        center_lat REAL NOT NULL,
        cta_text TEXT NOT NULL,
        cta_url TEXT NOT NULL,
        cta_secondary TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS basin_states (
        basin_id TEXT NOT NULL REFERENCES basins(id),
        position INTEGER NOT NULL,
        code TEXT NOT NULL,
        full_name TEXT NOT NULL,
        PRIMARY KEY (basin_id, position)
    );
    CREATE INDEX IF NOT EXISTS idx_basin_states_code ON basin_states(code);

    CREATE TABLE IF NOT EXISTS projects (
        id TEXT PRIMARY KEY,
        basin_id TEXT NOT NULL REFERENCES basins(id),
        name TEXT NOT NULL,
        lon REAL NOT NULL,
        lat REAL NOT NULL,
        purchase_price INTEGER NOT NULL CHECK (purchase_price > 0),
        acres REAL NOT NULL CHECK (acres > 0),
        production_bopd REAL NOT NULL CHECK (production_bopd >= 0),
        status TEXT NOT NULL,
        acquisition_year INTEGER NOT NULL,
        description TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_projects_basin ON projects(basin_id);
    "#
}

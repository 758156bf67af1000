//! Loading a validated dataset into the in-memory SQLite database.

use crate::Database;
use anyhow::Context;
use mrm_geo::Dataset;
use rusqlite::params;

impl Database {
    /// Insert every basin, its ordered states, and every project site.
    ///
    /// Runs in a single transaction: a failure leaves the database unchanged.
    pub fn load_dataset(&self, dataset: &Dataset) -> anyhow::Result<()> {
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;

        for (order, basin) in dataset.basins().iter().enumerate() {
            let [lon, lat] = basin.center();
            let acres = i64::try_from(basin.statistics.acres_acquired)
                .with_context(|| format!("basin `{}` acreage out of range", basin.id))?;
            tx.execute(
                "INSERT INTO basins (id, sort_order, full_name, display_name, description,
                                     deals_completed, acres_acquired, years_active,
                                     center_lon, center_lat, cta_text, cta_url, cta_secondary)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    basin.id,
                    order as i64,
                    basin.full_name,
                    basin.display_name,
                    basin.description,
                    basin.statistics.deals_completed,
                    acres,
                    basin.statistics.years_active,
                    lon,
                    lat,
                    basin.cta.text,
                    basin.cta.url,
                    basin.cta.secondary_text,
                ],
            )?;
            for (position, (code, name)) in basin
                .states
                .iter()
                .zip(basin.states_full_name.iter())
                .enumerate()
            {
                tx.execute(
                    "INSERT INTO basin_states (basin_id, position, code, full_name)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![basin.id, position as i64, code, name],
                )?;
            }
        }

        for project in dataset.projects() {
            let f = &project.financials;
            let price = i64::try_from(f.purchase_price)
                .with_context(|| format!("project `{}` price out of range", project.id))?;
            tx.execute(
                "INSERT INTO projects (id, basin_id, name, lon, lat, purchase_price, acres,
                                       production_bopd, status, acquisition_year, description)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    project.id,
                    project.basin_id,
                    project.name,
                    project.coordinates[0],
                    project.coordinates[1],
                    price,
                    f.acres,
                    f.production_bopd,
                    f.status.to_string(),
                    f.acquisition_year,
                    f.description,
                ],
            )?;
        }

        tx.commit()?;
        log::info!(
            "[MRM] loader: Loaded {} basins and {} projects",
            dataset.basins().len(),
            dataset.projects().len()
        );
        Ok(())
    }
}

//! Typed query methods for the fallback grid, overlays and the CLI.
//!
//! All queries return structs from [`crate::models`].

use crate::models::{BasinCard, ProjectCard, Totals};
use crate::Database;
use mrm_utils::links;
use rusqlite::{params, Connection, Row};
use std::collections::HashMap;

impl Database {
    /// Aggregate totals recomputed from the live tables.
    pub fn query_totals(&self) -> anyhow::Result<Totals> {
        let conn = self.conn.borrow();
        let (total_deals, total_acres, years_in_business, basin_count) = conn.query_row(
            "SELECT COALESCE(SUM(deals_completed), 0),
                    COALESCE(SUM(acres_acquired), 0),
                    COALESCE(MAX(years_active), 0),
                    COUNT(*)
             FROM basins",
            [],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, i64>(3)?,
                ))
            },
        )?;
        let states_covered: i64 = conn.query_row(
            "SELECT COUNT(DISTINCT code) FROM basin_states",
            [],
            |row| row.get(0),
        )?;
        let (project_count, total_invested) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(purchase_price), 0) FROM projects",
            [],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
        )?;

        Ok(Totals {
            total_deals: total_deals as u64,
            total_acres: total_acres as u64,
            years_in_business: years_in_business as u32,
            states_covered: states_covered as u32,
            basin_count: basin_count as u32,
            project_count: project_count as u32,
            total_invested: total_invested as u64,
        })
    }

    /// One card per basin, in dataset order.
    pub fn query_basin_cards(&self) -> anyhow::Result<Vec<BasinCard>> {
        let conn = self.conn.borrow();
        let mut states = states_by_basin(&conn)?;
        let mut stmt = conn.prepare(
            "SELECT b.id, b.full_name, b.display_name, b.deals_completed, b.acres_acquired,
                    b.years_active,
                    (SELECT COUNT(*) FROM projects p WHERE p.basin_id = b.id),
                    b.cta_text, b.cta_url
             FROM basins b
             ORDER BY b.sort_order",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(BasinCard {
                    basin_id: row.get(0)?,
                    full_name: row.get(1)?,
                    display_name: row.get(2)?,
                    states: String::new(),
                    deals_completed: row.get(3)?,
                    acres_acquired: row.get::<_, i64>(4)? as u64,
                    years_active: row.get(5)?,
                    project_count: row.get(6)?,
                    cta_text: row.get(7)?,
                    cta_url: row.get(8)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|mut card| {
                card.states = states.remove(&card.basin_id).unwrap_or_default().join(", ");
                card
            })
            .collect::<Vec<_>>();
        log::debug!("[MRM] query: query_basin_cards returned {} records", rows.len());
        Ok(rows)
    }

    /// Every project site, grouped by basin in dataset order.
    pub fn query_project_cards(&self) -> anyhow::Result<Vec<ProjectCard>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&format!(
            "{} ORDER BY b.sort_order, p.acquisition_year DESC, p.id",
            PROJECT_CARD_SELECT
        ))?;
        let rows = stmt
            .query_map([], project_card_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("[MRM] query: query_project_cards returned {} records", rows.len());
        Ok(rows)
    }

    /// Project sites inside one basin, newest acquisition first.
    pub fn query_basin_projects(&self, basin_id: &str) -> anyhow::Result<Vec<ProjectCard>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&format!(
            "{} WHERE p.basin_id = ?1 ORDER BY p.acquisition_year DESC, p.id",
            PROJECT_CARD_SELECT
        ))?;
        let rows = stmt
            .query_map(params![basin_id], project_card_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

const PROJECT_CARD_SELECT: &str = "
    SELECT p.id, p.basin_id, b.full_name, p.name, p.purchase_price, p.acres,
           p.production_bopd, p.status, p.acquisition_year, p.description
    FROM projects p
    INNER JOIN basins b ON b.id = p.basin_id";

fn project_card_from_row(row: &Row<'_>) -> rusqlite::Result<ProjectCard> {
    let project_id: String = row.get(0)?;
    let basin_id: String = row.get(1)?;
    Ok(ProjectCard {
        cta_url: links::project_contact_url(&basin_id, &project_id),
        project_id,
        basin_id,
        basin_name: row.get(2)?,
        name: row.get(3)?,
        purchase_price: row.get::<_, i64>(4)? as u64,
        acres: row.get(5)?,
        production_bopd: row.get(6)?,
        status: row.get(7)?,
        acquisition_year: row.get(8)?,
        description: row.get(9)?,
    })
}

/// Full state names per basin, in their declared order.
fn states_by_basin(conn: &Connection) -> anyhow::Result<HashMap<String, Vec<String>>> {
    let mut stmt =
        conn.prepare("SELECT basin_id, full_name FROM basin_states ORDER BY basin_id, position")?;
    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;
    for row in rows {
        let (basin_id, name) = row?;
        map.entry(basin_id).or_default().push(name);
    }
    Ok(map)
}

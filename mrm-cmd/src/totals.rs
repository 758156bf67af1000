//! `totals`: aggregate totals recomputed from the dataset.

use crate::input;
use crate::DatasetArgs;
use mrm_db::Database;

pub fn run_totals(args: &DatasetArgs, json: bool) -> anyhow::Result<()> {
    let loaded = input::load(args)?;
    let totals = Database::from_dataset(&loaded.dataset)?.query_totals()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&totals)?);
    } else {
        println!("basins:            {}", totals.basin_count);
        println!("projects:          {}", totals.project_count);
        println!("deals completed:   {}", totals.total_deals);
        println!("acres acquired:    {}", totals.total_acres);
        println!("years in business: {}", totals.years_in_business);
        println!("states covered:    {}", totals.states_covered);
        println!("total invested:    ${}", totals.total_invested);
    }
    Ok(())
}

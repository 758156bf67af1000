//! `validate`: invariants, data-quality warnings and stored-totals drift.

use crate::input;
use crate::DatasetArgs;
use chrono::{Datelike, Local};
use log::{info, warn};
use mrm_db::models::Totals;
use mrm_db::Database;
use mrm_geo::{Dataset, StoredTotals};

/// Differences between the totals a document carries and the recomputed ones.
pub fn totals_drift(stored: &StoredTotals, live: &Totals) -> Vec<String> {
    let mut drift = Vec::new();
    let mut check = |field: &str, stored: u64, live: u64| {
        if stored != live {
            drift.push(format!("{}: document says {}, dataset gives {}", field, stored, live));
        }
    };
    check("totalDeals", stored.total_deals, live.total_deals);
    check("totalAcres", stored.total_acres, live.total_acres);
    check(
        "yearsInBusiness",
        u64::from(stored.years_in_business),
        u64::from(live.years_in_business),
    );
    check(
        "statesCovered",
        u64::from(stored.states_covered),
        u64::from(live.states_covered),
    );
    drift
}

/// Projects whose acquisition year lies after `current_year`.
pub fn future_acquisitions(dataset: &Dataset, current_year: i32) -> Vec<String> {
    dataset
        .projects()
        .iter()
        .filter(|p| i32::from(p.financials.acquisition_year) > current_year)
        .map(|p| {
            format!(
                "project `{}` acquired in {}, after {}",
                p.id, p.financials.acquisition_year, current_year
            )
        })
        .collect()
}

/// Everything `validate` reports for a loaded dataset.
pub fn findings(dataset: &Dataset, stored: Option<&StoredTotals>, current_year: i32) -> anyhow::Result<Vec<String>> {
    let mut findings = dataset.quality_warnings();
    findings.extend(future_acquisitions(dataset, current_year));
    if let Some(stored) = stored {
        let live = Database::from_dataset(dataset)?.query_totals()?;
        findings.extend(totals_drift(stored, &live));
    }
    Ok(findings)
}

pub fn run_validate(args: &DatasetArgs) -> anyhow::Result<()> {
    let loaded = input::load(args)?;
    let current_year = Local::now().year();
    let findings = findings(&loaded.dataset, loaded.stored_totals.as_ref(), current_year)?;

    for finding in &findings {
        warn!("{}", finding);
    }
    info!(
        "{} is valid: {} basins, {} projects, {} warnings",
        loaded.origin,
        loaded.dataset.basins().len(),
        loaded.dataset.projects().len(),
        findings.len()
    );
    println!("OK ({} warnings)", findings.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embedded() -> input::LoadedDataset {
        input::load(&DatasetArgs::default()).unwrap()
    }

    #[test]
    fn embedded_totals_do_not_drift() {
        let loaded = embedded();
        let stored = loaded.stored_totals.clone().expect("fixture carries totals");
        let live = Database::from_dataset(&loaded.dataset).unwrap().query_totals().unwrap();
        assert!(totals_drift(&stored, &live).is_empty());
    }

    #[test]
    fn drift_names_each_differing_field() {
        let stored = StoredTotals {
            total_deals: 10,
            total_acres: 500,
            years_in_business: 3,
            states_covered: 2,
        };
        let live = Totals {
            total_deals: 12,
            total_acres: 500,
            years_in_business: 3,
            states_covered: 4,
            ..Totals::default()
        };
        let drift = totals_drift(&stored, &live);
        assert_eq!(drift.len(), 2);
        assert!(drift[0].starts_with("totalDeals"));
        assert!(drift[1].starts_with("statesCovered"));
    }

    #[test]
    fn flags_acquisitions_after_current_year() {
        let loaded = embedded();
        assert!(future_acquisitions(&loaded.dataset, 2100).is_empty());
        let flagged = future_acquisitions(&loaded.dataset, 2019);
        assert!(!flagged.is_empty());
        assert!(flagged.iter().all(|f| f.contains("after 2019")));
    }

    #[test]
    fn findings_include_drift_when_document_carries_totals() {
        let loaded = embedded();
        let mut stored = loaded.stored_totals.clone().unwrap();
        stored.total_deals += 1;
        let all = findings(&loaded.dataset, Some(&stored), 2100).unwrap();
        assert!(all.iter().any(|f| f.starts_with("totalDeals")));
    }
}

//! Dataset loading shared by the commands.

use crate::DatasetArgs;
use anyhow::Context;
use mrm_geo::{Dataset, DatasetDocument, ProjectSite, StoredTotals};
use std::fs;

/// A validated dataset plus whatever totals its document carried.
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub stored_totals: Option<StoredTotals>,
    /// Human-readable origin for log lines.
    pub origin: String,
}

pub fn load(args: &DatasetArgs) -> anyhow::Result<LoadedDataset> {
    let (basins_json, origin) = match &args.basins {
        Some(path) => (
            fs::read_to_string(path).with_context(|| format!("reading {}", path))?,
            path.clone(),
        ),
        None => (mrm_geo::BASINS_JSON.to_string(), "embedded fixtures".to_string()),
    };
    let projects_csv = match &args.projects {
        Some(path) => Some(fs::read_to_string(path).with_context(|| format!("reading {}", path))?),
        // The embedded basins pair with the embedded projects.
        None if args.basins.is_none() => Some(mrm_geo::PROJECTS_CSV.to_string()),
        None => None,
    };
    from_text(&basins_json, projects_csv.as_deref(), origin)
}

pub fn from_text(basins_json: &str, projects_csv: Option<&str>, origin: String) -> anyhow::Result<LoadedDataset> {
    let doc = DatasetDocument::parse(basins_json).with_context(|| format!("parsing {}", origin))?;
    let mut projects = doc.projects;
    if let Some(csv) = projects_csv {
        projects.extend(ProjectSite::parse_csv(csv).context("parsing projects CSV")?);
    }
    let dataset = Dataset::new(doc.basins, projects).with_context(|| format!("validating {}", origin))?;
    log::info!(
        "[MRM] loaded {} basins and {} projects from {}",
        dataset.basins().len(),
        dataset.projects().len(),
        origin
    );
    Ok(LoadedDataset {
        dataset,
        stored_totals: doc.totals,
        origin,
    })
}

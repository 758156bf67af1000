//! The validated, immutable basin + project collection.

use crate::basin::Basin;
use crate::error::DatasetError;
use crate::project::ProjectSite;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Degrees a project may sit outside its basin's bounds before it is flagged.
pub const PROJECT_BOUNDS_MARGIN: f64 = 0.25;

/// Dataset document as served over HTTP or embedded as `basins.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetDocument {
    pub basins: Vec<Basin>,
    #[serde(default)]
    pub projects: Vec<ProjectSite>,
    /// Totals as written by whoever produced the document. Never displayed;
    /// display totals are always recomputed from the basins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totals: Option<StoredTotals>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTotals {
    #[serde(default)]
    pub total_deals: u64,
    #[serde(default)]
    pub total_acres: u64,
    #[serde(default)]
    pub years_in_business: u32,
    #[serde(default)]
    pub states_covered: u32,
}

impl DatasetDocument {
    pub fn parse(json: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Validated basins and project sites for one page session.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    basins: Vec<Basin>,
    projects: Vec<ProjectSite>,
}

impl Dataset {
    /// Build a dataset, enforcing every per-entity and cross-entity invariant.
    pub fn new(basins: Vec<Basin>, projects: Vec<ProjectSite>) -> Result<Self, DatasetError> {
        if basins.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut basin_ids = HashSet::new();
        for basin in &basins {
            basin.validate()?;
            if !basin_ids.insert(basin.id.as_str()) {
                return Err(DatasetError::DuplicateId {
                    kind: "basin",
                    id: basin.id.clone(),
                });
            }
        }

        let mut project_ids = HashSet::new();
        for project in &projects {
            project.validate()?;
            if !project_ids.insert(project.id.as_str()) {
                return Err(DatasetError::DuplicateId {
                    kind: "project",
                    id: project.id.clone(),
                });
            }
            if !basin_ids.contains(project.basin_id.as_str()) {
                return Err(DatasetError::UnknownBasin {
                    project: project.id.clone(),
                    basin: project.basin_id.clone(),
                });
            }
        }

        log::info!(
            "[MRM] dataset: {} basins, {} project sites",
            basins.len(),
            projects.len()
        );
        Ok(Self { basins, projects })
    }

    /// Parse a single JSON document carrying basins and (optionally) projects.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let doc = DatasetDocument::parse(json)?;
        Self::new(doc.basins, doc.projects)
    }

    /// Basins from a JSON document plus projects from CSV.
    ///
    /// Projects listed inside the JSON document are kept as well.
    pub fn from_sources(basins_json: &str, projects_csv: &str) -> Result<Self, DatasetError> {
        let doc = DatasetDocument::parse(basins_json)?;
        let mut projects = doc.projects;
        projects.extend(ProjectSite::parse_csv(projects_csv)?);
        Self::new(doc.basins, projects)
    }

    /// The fixtures compiled into this crate.
    pub fn embedded() -> Result<Self, DatasetError> {
        Self::from_sources(crate::BASINS_JSON, crate::PROJECTS_CSV)
    }

    pub fn basins(&self) -> &[Basin] {
        &self.basins
    }

    pub fn projects(&self) -> &[ProjectSite] {
        &self.projects
    }

    pub fn basin(&self, id: &str) -> Option<&Basin> {
        self.basins.iter().find(|b| b.id == id)
    }

    pub fn project(&self, id: &str) -> Option<&ProjectSite> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn projects_in<'a>(&'a self, basin_id: &'a str) -> impl Iterator<Item = &'a ProjectSite> + 'a {
        self.projects.iter().filter(move |p| p.basin_id == basin_id)
    }

    /// Data-quality findings that do not make the dataset unusable.
    pub fn quality_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for project in &self.projects {
            let Some(basin) = self.basin(&project.basin_id) else {
                continue;
            };
            if !basin
                .shape()
                .bounds()
                .contains(project.coordinates, PROJECT_BOUNDS_MARGIN)
            {
                warnings.push(format!(
                    "project `{}` at [{}, {}] lies outside basin `{}`",
                    project.id, project.coordinates[0], project.coordinates[1], basin.id
                ));
            }
        }
        for basin in &self.basins {
            if basin.insights.is_empty() {
                warnings.push(format!("basin `{}` has no insights", basin.id));
            }
        }
        warnings
    }
}

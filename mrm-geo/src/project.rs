use crate::error::DatasetError;
use crate::geometry::LngLat;
use csv::ReaderBuilder;
use mrm_utils::links;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A specific acquisition, rendered as a point inside its basin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSite {
    pub id: String,
    /// Foreign key into the dataset's basins.
    pub basin_id: String,
    pub name: String,
    pub coordinates: LngLat,
    pub financials: ProjectFinancials,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFinancials {
    /// Whole US dollars.
    pub purchase_price: u64,
    pub acres: f64,
    /// Barrels of oil per day.
    pub production_bopd: f64,
    pub status: ProjectStatus,
    pub acquisition_year: u16,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    Producing,
    Developing,
    Permitted,
    #[serde(rename = "Shut-In")]
    ShutIn,
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProjectStatus::Producing => "Producing",
            ProjectStatus::Developing => "Developing",
            ProjectStatus::Permitted => "Permitted",
            ProjectStatus::ShutIn => "Shut-In",
        };
        f.write_str(s)
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "producing" => Ok(ProjectStatus::Producing),
            "developing" => Ok(ProjectStatus::Developing),
            "permitted" => Ok(ProjectStatus::Permitted),
            "shut-in" | "shutin" => Ok(ProjectStatus::ShutIn),
            other => Err(format!("unknown project status `{}`", other)),
        }
    }
}

impl ProjectSite {
    /// Contact link carrying both the parent basin and this project.
    pub fn cta_url(&self) -> String {
        links::project_contact_url(&self.basin_id, &self.id)
    }

    /// Per-project invariants. The basin reference is checked by [`crate::Dataset`].
    pub fn validate(&self) -> Result<(), DatasetError> {
        if !links::is_slug(&self.id) {
            return Err(DatasetError::InvalidId {
                kind: "project",
                id: self.id.clone(),
            });
        }
        let invalid = |reason: &str| DatasetError::InvalidProject {
            id: self.id.clone(),
            reason: reason.to_string(),
        };
        let f = &self.financials;
        if f.purchase_price == 0 {
            return Err(invalid("purchase price must be positive"));
        }
        if f.purchase_price > crate::MAX_AMOUNT {
            return Err(invalid("purchase price is too large"));
        }
        if !(f.acres > 0.0) {
            return Err(invalid("acreage must be positive"));
        }
        if !(f.production_bopd >= 0.0) {
            return Err(invalid("production must not be negative"));
        }
        if !(1000..=9999).contains(&f.acquisition_year) {
            return Err(invalid("acquisition year must have four digits"));
        }
        let [lon, lat] = self.coordinates;
        if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
            return Err(invalid("coordinates out of range"));
        }
        Ok(())
    }

    /// Parse the project CSV fixture.
    ///
    /// Expected columns (with headers):
    /// `id,basin_id,name,longitude,latitude,purchase_price,acres,production_bopd,status,acquisition_year,description`
    pub fn parse_csv(csv_data: &str) -> Result<Vec<ProjectSite>, DatasetError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut projects = Vec::new();
        for (index, result) in rdr.records().enumerate() {
            let r = result?;
            // header is line 1
            let row = index + 2;
            let text = |i: usize| r.get(i).unwrap_or("").trim().to_string();
            let number = |i: usize, name: &str| -> Result<f64, DatasetError> {
                r.get(i)
                    .unwrap_or("")
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| DatasetError::CsvField {
                        row,
                        message: format!("`{}` is not a number", name),
                    })
            };

            let status = text(8)
                .parse::<ProjectStatus>()
                .map_err(|message| DatasetError::CsvField { row, message })?;
            let purchase_price = text(5).parse::<u64>().map_err(|_| DatasetError::CsvField {
                row,
                message: "`purchase_price` must be whole dollars".to_string(),
            })?;
            let acquisition_year =
                text(9).parse::<u16>().map_err(|_| DatasetError::CsvField {
                    row,
                    message: "`acquisition_year` is not a year".to_string(),
                })?;

            projects.push(ProjectSite {
                id: text(0),
                basin_id: text(1),
                name: text(2),
                coordinates: [number(3, "longitude")?, number(4, "latitude")?],
                financials: ProjectFinancials {
                    purchase_price,
                    acres: number(6, "acres")?,
                    production_bopd: number(7, "production_bopd")?,
                    status,
                    acquisition_year,
                    description: text(10),
                },
            });
        }
        log::info!("[MRM] dataset: parsed {} project sites", projects.len());
        Ok(projects)
    }
}

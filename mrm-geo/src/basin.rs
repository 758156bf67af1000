use crate::error::DatasetError;
use crate::geometry::{validate_ring, BasinShape, Geometry, LngLat};
use mrm_utils::links;
use serde::{Deserialize, Serialize};

/// A named oil and gas producing region where the company acquires minerals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Basin {
    /// Stable slug, used as layer/source key and filter token.
    pub id: String,
    /// Full name, e.g. "Williston Basin".
    #[serde(rename = "name", alias = "fullName")]
    pub full_name: String,
    /// Short name used on filter buttons and map labels.
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    pub statistics: BasinStatistics,
    /// Jurisdiction codes, e.g. `["ND", "MT"]`.
    pub states: Vec<String>,
    /// Full state names, parallel to `states`.
    pub states_full_name: Vec<String>,
    #[serde(default)]
    pub primary_counties: Vec<String>,
    #[serde(default)]
    pub formations: Vec<String>,
    #[serde(default)]
    pub insights: Vec<String>,
    pub coordinates: BasinAnchors,
    /// Surveyed outline; basins without one get a synthesized rectangle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub color: BasinColor,
    pub cta: CallToAction,
}

/// Aggregate business statistics for a basin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasinStatistics {
    pub deals_completed: u32,
    pub acres_acquired: u64,
    pub years_active: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_response_time: Option<String>,
}

/// Anchor points used to place the basin on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasinAnchors {
    pub center: LngLat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_position: Option<LngLat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_position: Option<LngLat>,
}

/// Paint colors for the region layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasinColor {
    pub fill: String,
    pub stroke: String,
    pub hover: String,
}

impl Default for BasinColor {
    fn default() -> Self {
        Self {
            fill: "#D4A756".to_string(),
            stroke: "#B8862F".to_string(),
            hover: "#E8C47A".to_string(),
        }
    }
}

/// Where a click on the basin sends the visitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToAction {
    #[serde(alias = "label")]
    pub text: String,
    pub url: String,
    #[serde(default)]
    pub secondary_text: String,
}

impl Basin {
    /// Resolve the one geometry this basin renders with.
    pub fn shape(&self) -> BasinShape {
        match &self.geometry {
            Some(Geometry::Polygon { coordinates }) if !coordinates.is_empty() => {
                BasinShape::surveyed(coordinates[0].clone())
            }
            _ => BasinShape::synthesized(self.coordinates.center),
        }
    }

    pub fn center(&self) -> LngLat {
        self.coordinates.center
    }

    pub fn label_position(&self) -> LngLat {
        self.coordinates
            .label_position
            .unwrap_or(self.coordinates.center)
    }

    /// "North Dakota, Montana"
    pub fn states_label(&self) -> String {
        self.states_full_name.join(", ")
    }

    /// Per-basin invariants. Cross-entity checks live in [`crate::Dataset`].
    pub fn validate(&self) -> Result<(), DatasetError> {
        if !links::is_slug(&self.id) {
            return Err(DatasetError::InvalidId {
                kind: "basin",
                id: self.id.clone(),
            });
        }
        if self.states.len() != self.states_full_name.len() {
            return Err(DatasetError::StatesMismatch {
                id: self.id.clone(),
                codes: self.states.len(),
                names: self.states_full_name.len(),
            });
        }
        if let Some(Geometry::Polygon { coordinates }) = &self.geometry {
            let outer = coordinates.first().ok_or_else(|| DatasetError::InvalidGeometry {
                id: self.id.clone(),
                reason: "polygon has no rings".to_string(),
            })?;
            for ring in coordinates {
                validate_ring(ring).map_err(|reason| DatasetError::InvalidGeometry {
                    id: self.id.clone(),
                    reason,
                })?;
            }
            log::debug!("[MRM] basin {} surveyed ring with {} points", self.id, outer.len());
        }
        if self.statistics.acres_acquired > crate::MAX_AMOUNT {
            return Err(DatasetError::OutOfRange {
                id: self.id.clone(),
                field: "acresAcquired",
                value: self.statistics.acres_acquired,
                max: crate::MAX_AMOUNT,
            });
        }
        if links::contact_query_param(&self.cta.url, "basin") != Some(self.id.as_str()) {
            return Err(DatasetError::InvalidCta {
                id: self.id.clone(),
                url: self.cta.url.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::geometry::ShapeOrigin;

    pub(crate) fn sample_basin(id: &str, deals: u32, acres: u64) -> Basin {
        Basin {
            id: id.to_string(),
            full_name: format!("{} Basin", id),
            display_name: id.to_string(),
            description: String::new(),
            statistics: BasinStatistics {
                deals_completed: deals,
                acres_acquired: acres,
                years_active: 10,
                average_response_time: None,
            },
            states: vec!["TX".to_string()],
            states_full_name: vec!["Texas".to_string()],
            primary_counties: Vec::new(),
            formations: Vec::new(),
            insights: Vec::new(),
            coordinates: BasinAnchors {
                center: [-100.0, 31.0],
                label_position: None,
                icon_position: None,
            },
            geometry: None,
            color: BasinColor::default(),
            cta: CallToAction {
                text: "Request Offer".to_string(),
                url: links::basin_contact_url(id),
                secondary_text: String::new(),
            },
        }
    }

    #[test]
    fn basin_parses_from_document_json() {
        let json = r#"{
            "id": "williston",
            "name": "Williston Basin",
            "displayName": "Williston",
            "statistics": {"dealsCompleted": 150, "acresAcquired": 15000, "yearsActive": 12},
            "states": ["ND", "MT"],
            "statesFullName": ["North Dakota", "Montana"],
            "coordinates": {"center": [-103.5, 48.0]},
            "cta": {"text": "Request Williston Offer", "url": "/contact?basin=williston"}
        }"#;
        let basin: Basin = serde_json::from_str(json).unwrap();
        assert_eq!(basin.full_name, "Williston Basin");
        assert_eq!(basin.statistics.acres_acquired, 15000);
        assert_eq!(basin.states_label(), "North Dakota, Montana");
        assert_eq!(basin.label_position(), [-103.5, 48.0]);
        assert_eq!(basin.color, BasinColor::default());
        assert!(basin.validate().is_ok());
    }

    #[test]
    fn basin_without_geometry_synthesizes_shape() {
        let basin = sample_basin("midland", 1, 1);
        let shape = basin.shape();
        assert_eq!(shape.origin, ShapeOrigin::Synthesized);
        assert_eq!(shape.bounds().center(), basin.center());
    }

    #[test]
    fn basin_with_polygon_uses_surveyed_ring() {
        let mut basin = sample_basin("delaware", 1, 1);
        let ring = vec![[-104.9, 30.6], [-103.2, 30.6], [-103.3, 32.9], [-104.9, 30.6]];
        basin.geometry = Some(Geometry::Polygon {
            coordinates: vec![ring.clone()],
        });
        let shape = basin.shape();
        assert!(shape.is_surveyed());
        assert_eq!(shape.ring, ring);
        assert!(basin.validate().is_ok());
    }

    #[test]
    fn validate_rejects_mismatched_states() {
        let mut basin = sample_basin("dj", 1, 1);
        basin.states.push("WY".to_string());
        assert!(matches!(
            basin.validate(),
            Err(DatasetError::StatesMismatch { codes: 2, names: 1, .. })
        ));
    }

    #[test]
    fn validate_rejects_foreign_cta() {
        let mut basin = sample_basin("uinta", 1, 1);
        basin.cta.url = "/contact?basin=williston".to_string();
        assert!(matches!(basin.validate(), Err(DatasetError::InvalidCta { .. })));

        basin.cta.url = "https://example.com/contact?basin=uinta".to_string();
        assert!(matches!(basin.validate(), Err(DatasetError::InvalidCta { .. })));
    }

    #[test]
    fn validate_rejects_unstorable_acreage() {
        let basin = sample_basin("permian", 1, crate::MAX_AMOUNT + 1);
        assert!(matches!(
            basin.validate(),
            Err(DatasetError::OutOfRange { field: "acresAcquired", .. })
        ));
        assert!(sample_basin("permian", 1, crate::MAX_AMOUNT).validate().is_ok());
    }

    #[test]
    fn validate_rejects_open_polygon() {
        let mut basin = sample_basin("anadarko", 1, 1);
        basin.geometry = Some(Geometry::Polygon {
            coordinates: vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]],
        });
        assert!(matches!(basin.validate(), Err(DatasetError::InvalidGeometry { .. })));
    }

    #[test]
    fn validate_rejects_non_slug_id() {
        let basin = sample_basin("Powder River", 1, 1);
        assert!(matches!(basin.validate(), Err(DatasetError::InvalidId { .. })));
    }
}

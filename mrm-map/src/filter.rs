//! Filter tokens to camera transitions.

use crate::config::MapConfig;
use crate::engine::CameraMove;
use mrm_geo::Dataset;
use std::collections::HashMap;

/// Token selecting every basin.
pub const ALL_FILTER: &str = "all";

#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    Camera(CameraMove),
    /// The token names no basin. Not an error; the UI only emits known tokens.
    Ignored,
}

/// One button of the filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterButton {
    pub token: String,
    pub label: String,
}

/// Camera targets are computed once per session, so selecting the same
/// token twice always yields the same transition.
#[derive(Debug, Clone)]
pub struct FilterController {
    home: CameraMove,
    targets: HashMap<String, CameraMove>,
    buttons: Vec<FilterButton>,
}

impl FilterController {
    pub fn new(dataset: &Dataset, config: &MapConfig, is_mobile: bool) -> Self {
        let viewport = config.viewport_for(is_mobile);
        let home = CameraMove::FlyTo {
            center: viewport.center,
            zoom: viewport.zoom,
            duration_ms: config.transition_ms,
        };

        let mut targets = HashMap::new();
        let mut buttons = vec![FilterButton {
            token: ALL_FILTER.to_string(),
            label: "All Basins".to_string(),
        }];
        for basin in dataset.basins() {
            let shape = basin.shape();
            let camera = if shape.is_surveyed() {
                CameraMove::fit(shape.bounds(), config.fit_padding, config.transition_ms)
            } else {
                CameraMove::FlyTo {
                    center: basin.center(),
                    zoom: config.filter_zoom,
                    duration_ms: config.transition_ms,
                }
            };
            targets.insert(basin.id.clone(), camera);
            buttons.push(FilterButton {
                token: basin.id.clone(),
                label: basin.display_name.clone(),
            });
        }

        Self {
            home,
            targets,
            buttons,
        }
    }

    pub fn buttons(&self) -> &[FilterButton] {
        &self.buttons
    }

    pub fn target(&self, token: &str) -> Option<&CameraMove> {
        if token == ALL_FILTER {
            Some(&self.home)
        } else {
            self.targets.get(token)
        }
    }

    pub fn set_filter(&self, token: &str) -> FilterOutcome {
        match self.target(token) {
            Some(camera) => FilterOutcome::Camera(camera.clone()),
            None => {
                log::warn!("[MRM] ignoring unknown filter token `{}`", token);
                FilterOutcome::Ignored
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::two_basin_dataset;

    fn controller(is_mobile: bool) -> FilterController {
        FilterController::new(&two_basin_dataset(), &MapConfig::default(), is_mobile)
    }

    #[test]
    fn all_returns_to_responsive_home() {
        let desktop = controller(false);
        assert_eq!(
            desktop.set_filter(ALL_FILTER),
            FilterOutcome::Camera(CameraMove::FlyTo {
                center: [-98.5795, 39.8283],
                zoom: 4.0,
                duration_ms: 1000,
            })
        );
        match controller(true).set_filter(ALL_FILTER) {
            FilterOutcome::Camera(CameraMove::FlyTo { zoom, .. }) => assert_eq!(zoom, 3.0),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn all_is_idempotent() {
        let c = controller(false);
        assert_eq!(c.set_filter("all"), c.set_filter("all"));
    }

    #[test]
    fn surveyed_basin_fits_bounds() {
        let dataset = two_basin_dataset();
        let c = FilterController::new(&dataset, &MapConfig::default(), false);
        let bounds = dataset.basin("williston").unwrap().shape().bounds();
        assert_eq!(
            c.set_filter("williston"),
            FilterOutcome::Camera(CameraMove::FitBounds {
                bounds: bounds.to_pairs(),
                padding: 40,
                duration_ms: 1000,
            })
        );
    }

    #[test]
    fn synthesized_basin_flies_to_center() {
        let c = controller(false);
        assert_eq!(
            c.set_filter("delaware"),
            FilterOutcome::Camera(CameraMove::FlyTo {
                center: [-104.0, 31.5],
                zoom: 6.0,
                duration_ms: 1000,
            })
        );
    }

    #[test]
    fn unknown_token_is_ignored() {
        assert_eq!(controller(false).set_filter("atlantis"), FilterOutcome::Ignored);
    }

    #[test]
    fn buttons_start_with_all() {
        let c = controller(false);
        let labels: Vec<&str> = c.buttons().iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["All Basins", "Williston", "Delaware"]);
    }
}

//! Map page state managed via Dioxus context.
//!
//! `MapState` bundles the reactive signals into a single `Copy` struct
//! provided with `use_context_provider`. Child components retrieve it with
//! `use_context::<MapState>()`. The signals mirror the map session after
//! every event; the session itself stays inside `InteractiveMap`.

use dioxus::prelude::*;
use mrm_db::models::Totals;
use mrm_db::Database;
use mrm_geo::Dataset;
use mrm_map::engine::{EngineEvent, PixelPoint};
use mrm_map::filter::{FilterButton, ALL_FILTER};
use mrm_map::interaction::{EntityRef, Presentation};
use mrm_map::EngineState;

/// Commands delivered to the map session coroutine.
///
/// Engine callbacks and UI handlers only enqueue; the coroutine is the one
/// place that mutates the session.
#[derive(Debug, Clone)]
pub enum MapCommand {
    Engine(EngineEvent),
    /// The instance did not report ready in time.
    ReadyTimeout,
    Filter(String),
    /// Close the bottom sheet.
    Dismiss,
}

#[derive(Clone, Copy)]
pub struct MapState {
    /// Validated dataset (None until loaded)
    pub dataset: Signal<Option<Dataset>>,
    /// Session database derived from the dataset
    pub db: Signal<Option<Database>>,
    /// Set when the dataset could not be fetched or parsed
    pub dataset_error: Signal<Option<String>>,
    /// Recomputed totals for the trust indicators
    pub totals: Signal<Option<Totals>>,
    pub engine_state: Signal<EngineState>,
    pub hovered: Signal<Option<EntityRef>>,
    /// Pointer position over the hovered entity, in container pixels
    pub cursor: Signal<Option<PixelPoint>>,
    pub selected_filter: Signal<String>,
    pub filter_buttons: Signal<Vec<FilterButton>>,
    /// Tooltip or bottom sheet, decided once at mount
    pub presentation: Signal<Presentation>,
}

impl MapState {
    pub fn new() -> Self {
        Self {
            dataset: Signal::new(None),
            db: Signal::new(None),
            dataset_error: Signal::new(None),
            totals: Signal::new(None),
            engine_state: Signal::new(EngineState::Loading),
            hovered: Signal::new(None),
            cursor: Signal::new(None),
            selected_filter: Signal::new(ALL_FILTER.to_string()),
            filter_buttons: Signal::new(Vec::new()),
            presentation: Signal::new(Presentation::Tooltip),
        }
    }

    /// Install a loaded dataset and derive the session database from it.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        for warning in dataset.quality_warnings() {
            log::warn!("[MRM] dataset: {}", warning);
        }
        match Database::from_dataset(&dataset) {
            Ok(db) => {
                match db.query_totals() {
                    Ok(totals) => self.totals.set(Some(totals)),
                    Err(e) => log::error!("[MRM] totals query failed: {}", e),
                }
                self.db.set(Some(db));
            }
            Err(e) => log::error!("[MRM] failed to load dataset into database: {}", e),
        }
        self.dataset.set(Some(dataset));
    }

    pub fn set_dataset_error(&mut self, message: String) {
        log::error!("[MRM] dataset unavailable: {}", message);
        self.dataset_error.set(Some(message));
    }
}

impl Default for MapState {
    fn default() -> Self {
        Self::new()
    }
}

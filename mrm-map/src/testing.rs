//! Test doubles for the engine and host seams.

use crate::engine::{CameraMove, Cursor, EngineEvent, EventSink, FeatureKey, MapEngine};
use crate::error::MapError;
use crate::layers::{LayerSpec, SourceSpec};
use crate::loader::EngineHost;
use mrm_geo::Dataset;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

pub(crate) const TWO_BASINS: &str = r#"{
    "basins": [
        {
            "id": "williston",
            "name": "Williston Basin",
            "displayName": "Williston",
            "statistics": {"dealsCompleted": 150, "acresAcquired": 15000, "yearsActive": 12},
            "states": ["ND", "MT"],
            "statesFullName": ["North Dakota", "Montana"],
            "coordinates": {"center": [-103.5, 48.0], "labelPosition": [-103.5, 48.6]},
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[-105.5, 46.5], [-101.0, 46.5], [-101.0, 49.0], [-105.5, 49.0], [-105.5, 46.5]]]
            },
            "cta": {"text": "Request Williston Offer", "url": "/contact?basin=williston"}
        },
        {
            "id": "delaware",
            "name": "Delaware Basin",
            "displayName": "Delaware",
            "statistics": {"dealsCompleted": 200, "acresAcquired": 25000, "yearsActive": 15},
            "states": ["TX", "NM"],
            "statesFullName": ["Texas", "New Mexico"],
            "coordinates": {"center": [-104.0, 31.5]},
            "cta": {"text": "Request Delaware Offer", "url": "/contact?basin=delaware"}
        }
    ],
    "projects": [
        {
            "id": "wil-001",
            "basinId": "williston",
            "name": "Keene Bench Minerals",
            "coordinates": [-103.05, 47.82],
            "financials": {"purchasePrice": 1850000, "acres": 640, "productionBopd": 210,
                           "status": "Producing", "acquisitionYear": 2019}
        },
        {
            "id": "del-001",
            "basinId": "delaware",
            "name": "Pecos Trough Interests",
            "coordinates": [-103.62, 31.41],
            "financials": {"purchasePrice": 3100000, "acres": 800, "productionBopd": 340,
                           "status": "Producing", "acquisitionYear": 2018}
        }
    ]
}"#;

pub(crate) fn two_basin_dataset() -> Dataset {
    Dataset::from_json(TWO_BASINS).unwrap()
}

/// Every call a [`FakeEngine`] received.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EngineCall {
    Create,
    AddSource(String),
    AddLayer(String),
    Watch(String),
    FeatureState(FeatureKey, bool),
    Cursor(Cursor),
    Camera(CameraMove),
    Remove,
}

thread_local! {
    static CALLS: RefCell<Vec<EngineCall>> = const { RefCell::new(Vec::new()) };
    static FAIL_LAYER: RefCell<Option<String>> = const { RefCell::new(None) };
    static FAIL_CREATE: Cell<bool> = const { Cell::new(false) };
    static LAST_SINK: RefCell<Option<EventSink>> = const { RefCell::new(None) };
}

pub(crate) fn engine_calls() -> Vec<EngineCall> {
    CALLS.with(|c| c.borrow().clone())
}

pub(crate) fn count_calls(pred: impl Fn(&EngineCall) -> bool) -> usize {
    CALLS.with(|c| c.borrow().iter().filter(|call| pred(call)).count())
}

/// Latest hover flag per feature, replayed from the call log.
pub(crate) fn hover_flags() -> HashMap<FeatureKey, bool> {
    let mut flags = HashMap::new();
    for call in engine_calls() {
        if let EngineCall::FeatureState(key, hover) = call {
            flags.insert(key, hover);
        }
    }
    flags
}

pub(crate) fn fail_layer(layer_id: &str) {
    FAIL_LAYER.with(|f| *f.borrow_mut() = Some(layer_id.to_string()));
}

pub(crate) fn fail_create() {
    FAIL_CREATE.with(|f| f.set(true));
}

/// Deliver an event the way an engine instance would.
pub(crate) fn emit(event: EngineEvent) {
    let sink = LAST_SINK.with(|s| s.borrow().clone());
    if let Some(sink) = sink {
        sink(event);
    }
}

fn record(call: EngineCall) {
    CALLS.with(|c| c.borrow_mut().push(call));
}

pub(crate) struct FakeEngine;

impl MapEngine for FakeEngine {
    fn create(_options: &serde_json::Value, events: EventSink) -> Result<Self, MapError> {
        if FAIL_CREATE.with(|f| f.get()) {
            return Err(MapError::Construction("style is not valid".to_string()));
        }
        LAST_SINK.with(|s| *s.borrow_mut() = Some(events));
        record(EngineCall::Create);
        Ok(FakeEngine)
    }

    fn add_source(&mut self, source: &SourceSpec) -> Result<(), MapError> {
        record(EngineCall::AddSource(source.id.clone()));
        Ok(())
    }

    fn add_layer(&mut self, layer: &LayerSpec) -> Result<(), MapError> {
        if FAIL_LAYER.with(|f| f.borrow().as_deref() == Some(layer.id.as_str())) {
            return Err(MapError::Construction(format!("layer {} rejected", layer.id)));
        }
        record(EngineCall::AddLayer(layer.id.clone()));
        Ok(())
    }

    fn watch_layer(&mut self, layer_id: &str) -> Result<(), MapError> {
        record(EngineCall::Watch(layer_id.to_string()));
        Ok(())
    }

    fn set_feature_state(&mut self, feature: &FeatureKey, hover: bool) {
        record(EngineCall::FeatureState(feature.clone(), hover));
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        record(EngineCall::Cursor(cursor));
    }

    fn move_camera(&mut self, camera: &CameraMove) {
        record(EngineCall::Camera(camera.clone()));
    }

    fn remove(&mut self) {
        record(EngineCall::Remove);
    }
}

type Callback = Box<dyn FnOnce()>;

#[derive(Default)]
struct HostState {
    present: Cell<bool>,
    /// Whether the engine global exists once the script has loaded.
    defines_engine: Cell<bool>,
    stylesheets: RefCell<Vec<String>>,
    scripts: RefCell<Vec<String>>,
    on_load: RefCell<Vec<Callback>>,
    on_error: RefCell<Vec<Callback>>,
    timers: RefCell<Vec<(u32, Callback)>>,
}

/// Host whose script and timer callbacks are fired by hand.
#[derive(Clone, Default)]
pub(crate) struct FakeHost {
    state: Rc<HostState>,
}

impl FakeHost {
    pub(crate) fn new() -> Self {
        let host = Self::default();
        host.state.defines_engine.set(true);
        host
    }

    pub(crate) fn preinstalled() -> Self {
        let host = Self::new();
        host.state.present.set(true);
        host
    }

    pub(crate) fn without_engine_global(self) -> Self {
        self.state.defines_engine.set(false);
        self
    }

    pub(crate) fn script_count(&self) -> usize {
        self.state.scripts.borrow().len()
    }

    pub(crate) fn stylesheet_count(&self) -> usize {
        self.state.stylesheets.borrow().len()
    }

    pub(crate) fn timer_delays(&self) -> Vec<u32> {
        self.state.timers.borrow().iter().map(|(ms, _)| *ms).collect()
    }

    pub(crate) fn fire_load(&self) {
        self.state.present.set(self.state.defines_engine.get());
        let callbacks: Vec<Callback> = self.state.on_load.borrow_mut().drain(..).collect();
        for callback in callbacks {
            callback();
        }
    }

    pub(crate) fn fire_error(&self) {
        let callbacks: Vec<Callback> = self.state.on_error.borrow_mut().drain(..).collect();
        for callback in callbacks {
            callback();
        }
    }

    pub(crate) fn fire_timers(&self) {
        let timers: Vec<(u32, Callback)> = self.state.timers.borrow_mut().drain(..).collect();
        for (_, callback) in timers {
            callback();
        }
    }
}

impl EngineHost for FakeHost {
    fn engine_present(&self) -> bool {
        self.state.present.get()
    }

    fn inject_stylesheet(&self, href: &str) {
        self.state.stylesheets.borrow_mut().push(href.to_string());
    }

    fn inject_script(&self, src: &str, on_load: Box<dyn FnOnce()>, on_error: Box<dyn FnOnce()>) {
        self.state.scripts.borrow_mut().push(src.to_string());
        self.state.on_load.borrow_mut().push(on_load);
        self.state.on_error.borrow_mut().push(on_error);
    }

    fn set_timeout(&self, ms: u32, callback: Box<dyn FnOnce()>) {
        self.state.timers.borrow_mut().push((ms, callback));
    }
}

//! The seam between the map subsystem and a concrete map engine.
//!
//! Engine events cross the boundary as JSON and are decoded into
//! [`EngineEvent`] immediately, so nothing past this module inspects untyped
//! property bags.

use crate::error::MapError;
use crate::layers::{LayerSpec, SourceSpec};
use mrm_geo::{Bounds, LngLat};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Callback through which an engine instance reports its events.
pub type EventSink = Rc<dyn Fn(EngineEvent)>;

/// Operations the controller needs from a live map instance.
pub trait MapEngine: Sized {
    /// Construct an instance from constructor `options` (see
    /// [`crate::MapConfig::instance_options`]). The instance reports
    /// [`EngineEvent::Ready`] through `events` once it can accept layers.
    fn create(options: &serde_json::Value, events: EventSink) -> Result<Self, MapError>;

    fn add_source(&mut self, source: &SourceSpec) -> Result<(), MapError>;

    fn add_layer(&mut self, layer: &LayerSpec) -> Result<(), MapError>;

    /// Subscribe to pointer enter/move/leave/click on one layer.
    fn watch_layer(&mut self, layer_id: &str) -> Result<(), MapError>;

    fn set_feature_state(&mut self, feature: &FeatureKey, hover: bool);

    fn set_cursor(&mut self, cursor: Cursor);

    fn move_camera(&mut self, camera: &CameraMove);

    /// Release the instance and detach every listener.
    fn remove(&mut self);
}

/// Identifies one geometry for feature-state updates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FeatureKey {
    pub source: String,
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Pointer,
}

impl Cursor {
    pub fn css(self) -> &'static str {
        match self {
            Cursor::Default => "",
            Cursor::Pointer => "pointer",
        }
    }
}

/// Camera transition issued by the filter controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CameraMove {
    #[serde(rename_all = "camelCase")]
    FlyTo {
        center: LngLat,
        zoom: f64,
        duration_ms: u32,
    },
    #[serde(rename_all = "camelCase")]
    FitBounds {
        bounds: [LngLat; 2],
        padding: u32,
        duration_ms: u32,
    },
}

impl CameraMove {
    pub fn fit(bounds: Bounds, padding: u32, duration_ms: u32) -> Self {
        CameraMove::FitBounds {
            bounds: bounds.to_pairs(),
            padding,
            duration_ms,
        }
    }
}

/// Pixel position relative to the map container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Enter,
    Move,
    Leave,
    Click,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub layer: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl PointerEvent {
    pub fn point(&self) -> PixelPoint {
        PixelPoint {
            x: self.x,
            y: self.y,
        }
    }
}

/// Everything an engine instance can tell the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EngineEvent {
    Ready,
    Error { message: String },
    Pointer(PointerEvent),
}

impl EngineEvent {
    /// Decode one event payload as emitted by the browser bridge.
    pub fn decode(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}

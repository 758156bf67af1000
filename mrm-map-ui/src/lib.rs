//! Dioxus components and Mapbox GL JS bridge for the basin map.
//!
//! This crate provides:
//! - `js_bridge`: the `MapEngine`/`EngineHost` implementations over `window.mrmMap`
//! - `state`: reactive `MapState` with Dioxus Signals
//! - `components`: the interactive map and its fallback, filter bar and overlays

pub mod components;
pub mod js_bridge;
pub mod state;

//! Interactive basin/project map, independent of any particular map engine.
//!
//! This crate provides:
//! - `loader`: one-shot, idempotent installation of the engine script and stylesheet
//! - `controller`: lifecycle of one map instance and its data-driven layers
//! - `interaction`: hover/click handling with feature-state and tooltip placement
//! - `filter`: filter tokens to camera transitions
//! - `fallback`: the static card grid / contact panel shown when the engine is unusable
//! - `session`: wiring of the above for one mounted map
//!
//! The browser binding lives in `mrm-map-ui`; everything here runs natively and
//! is exercised through the [`engine::MapEngine`] and [`loader::EngineHost`] seams.

pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod filter;
pub mod interaction;
pub mod layers;
pub mod loader;
pub mod session;
pub mod status;

#[cfg(test)]
pub(crate) mod testing;

pub use config::MapConfig;
pub use error::{EngineLoadError, MapError};
pub use status::EngineState;

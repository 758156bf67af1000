//! Dioxus RSX components for the basin map page.

mod basin_filters;
mod entity_details;
mod interactive_map;
mod loading_overlay;
mod map_fallback;
mod trust_indicators;

pub use basin_filters::BasinFilters;
pub use entity_details::{BasinTooltip, BottomSheet, EntityDetails};
pub use interactive_map::{InteractiveMap, MAP_CONTAINER_ID};
pub use loading_overlay::LoadingOverlay;
pub use map_fallback::MapFallback;
pub use trust_indicators::TrustIndicators;

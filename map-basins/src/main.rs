//! Interactive map of operational basins and project sites.
//!
//! Data flow:
//! 1. The dataset is the embedded fixtures, or a JSON document fetched from
//!    `MRM_DATASET_URL` when that is set at build time.
//! 2. `MapState::set_dataset` validates quality and derives the session
//!    database used for totals, tooltips and the fallback grid.
//! 3. `InteractiveMap` loads Mapbox GL JS, builds the layers and wires
//!    hover, click and filter handling; any failure shows the basin grid.

use dioxus::prelude::*;
use mrm_geo::Dataset;
use mrm_map::MapConfig;
use mrm_map_ui::components::{InteractiveMap, MapFallback};
use mrm_map_ui::js_bridge;
use mrm_map_ui::state::MapState;

const ROOT_ID: &str = "basin-map-root";

/// Both captured at build time.
const MAPBOX_TOKEN: Option<&str> = option_env!("MAPBOX_TOKEN");
const DATASET_URL: Option<&str> = option_env!("MRM_DATASET_URL");
const EMBEDDED_SUMMARY: &str = env!("MRM_EMBEDDED_SUMMARY");

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname(ROOT_ID))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(MapState::new);
    let config = use_hook(|| MapConfig::default().with_access_token(MAPBOX_TOKEN));

    // Load the dataset once on mount.
    use_effect(move || {
        if let Some(url) = DATASET_URL {
            spawn(async move {
                let fetched = js_bridge::fetch_text(url)
                    .await
                    .and_then(|body| Dataset::from_json(&body).map_err(|e| e.to_string()));
                match fetched {
                    Ok(dataset) => state.set_dataset(dataset),
                    Err(e) => state.set_dataset_error(format!("{}: {}", url, e)),
                }
            });
            return;
        }
        match Dataset::embedded() {
            Ok(dataset) => {
                log::info!("[MRM] using embedded dataset ({})", EMBEDDED_SUMMARY);
                state.set_dataset(dataset);
            }
            Err(e) => state.set_dataset_error(e.to_string()),
        }
    });

    let loaded = state.dataset.read().is_some();
    let unavailable = state.dataset_error.read().is_some();

    rsx! {
        div {
            style: "max-width: 1100px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",
            h2 { style: "margin: 8px 0 4px 0; color: #5C4A1F;", "Where We Buy Mineral Rights" }
            p {
                style: "margin: 0 0 8px 0; font-size: 14px; color: #555;",
                "Hover a basin for our track record there, or click it to start a conversation."
            }

            if unavailable {
                MapFallback {}
            } else if loaded {
                InteractiveMap { config: config.clone() }
            } else {
                div {
                    style: "display: flex; justify-content: center; align-items: center; padding: 40px; color: #666;",
                    "Loading basins..."
                }
            }
        }
    }
}

//! Overlay shown while the engine loads.

use dioxus::prelude::*;

#[component]
pub fn LoadingOverlay() -> Element {
    rsx! {
        div {
            style: "position: absolute; top: 0; right: 0; bottom: 0; left: 0; display: flex; justify-content: center; align-items: center; background: rgba(245, 241, 232, 0.85); color: #666; z-index: 2;",
            "Loading interactive map..."
        }
    }
}

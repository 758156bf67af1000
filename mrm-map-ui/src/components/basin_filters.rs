//! Filter bar: "All Basins" plus one button per basin.

use crate::state::{MapCommand, MapState};
use dioxus::prelude::*;

#[component]
pub fn BasinFilters() -> Element {
    let state = use_context::<MapState>();
    let buttons = state.filter_buttons.read().clone();
    let selected = (state.selected_filter)();

    rsx! {
        div {
            style: "display: flex; flex-wrap: wrap; gap: 8px; margin: 8px 0 12px 0;",
            for filter in buttons.iter() {
                FilterChip {
                    key: "{filter.token}",
                    token: filter.token.clone(),
                    label: filter.label.clone(),
                    active: filter.token == selected,
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct FilterChipProps {
    token: String,
    label: String,
    active: bool,
}

#[component]
fn FilterChip(props: FilterChipProps) -> Element {
    let map = use_coroutine_handle::<MapCommand>();
    let style = if props.active {
        "padding: 6px 14px; border-radius: 16px; border: 1px solid #B8862F; background: #B8862F; color: #fff; cursor: pointer; font-size: 13px;"
    } else {
        "padding: 6px 14px; border-radius: 16px; border: 1px solid #D4A756; background: #fff; color: #5C4A1F; cursor: pointer; font-size: 13px;"
    };
    let token = props.token.clone();

    rsx! {
        button {
            style: "{style}",
            onclick: move |_| map.send(MapCommand::Filter(token.clone())),
            "{props.label}"
        }
    }
}

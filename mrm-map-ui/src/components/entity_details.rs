//! Hover details for a basin or project site, as a cursor tooltip or a
//! bottom sheet on touch and narrow screens.

use crate::js_bridge;
use crate::state::{MapCommand, MapState};
use dioxus::prelude::*;
use mrm_geo::{Basin, ProjectSite};
use mrm_map::interaction::{place_tooltip, EntityRef, TooltipSide};
use mrm_utils::numbers;

const TOOLTIP_WIDTH: f64 = 280.0;

#[derive(Props, Clone, PartialEq)]
pub struct EntityDetailsProps {
    pub entity: EntityRef,
}

/// Statistics and call-to-action for one entity.
#[component]
pub fn EntityDetails(props: EntityDetailsProps) -> Element {
    let state = use_context::<MapState>();
    let dataset = state.dataset.read();
    let Some(dataset) = dataset.as_ref() else {
        return rsx! {};
    };

    match &props.entity {
        EntityRef::Basin { id } => match dataset.basin(id) {
            Some(basin) => basin_details(basin, dataset.projects_in(id).count()),
            None => rsx! {},
        },
        EntityRef::Project { id, .. } => match dataset.project(id) {
            Some(project) => {
                let basin_name = dataset
                    .basin(&project.basin_id)
                    .map(|b| b.full_name.clone())
                    .unwrap_or_default();
                project_details(project, &basin_name)
            }
            None => rsx! {},
        },
    }
}

fn basin_details(basin: &Basin, project_count: usize) -> Element {
    let stats = &basin.statistics;
    let deals = numbers::with_commas(u64::from(stats.deals_completed));
    let acres = numbers::compact(stats.acres_acquired);
    let states = basin.states_label();

    rsx! {
        div {
            h3 { style: "margin: 0 0 2px 0; font-size: 16px; color: #5C4A1F;", "{basin.full_name}" }
            p { style: "margin: 0 0 8px 0; font-size: 12px; color: #777;", "{states}" }
            div {
                style: "display: flex; gap: 12px; margin-bottom: 8px;",
                Stat { value: deals, label: "Deals".to_string() }
                Stat { value: acres, label: "Acres".to_string() }
                Stat { value: format!("{}", stats.years_active), label: "Years".to_string() }
            }
            if project_count > 0 {
                p { style: "margin: 0 0 8px 0; font-size: 12px; color: #555;", "{project_count} active projects" }
            }
            a {
                href: "{basin.cta.url}",
                style: "display: inline-block; font-weight: bold; color: #B8862F; text-decoration: none;",
                "{basin.cta.text}"
            }
            if !basin.cta.secondary_text.is_empty() {
                p { style: "margin: 4px 0 0 0; font-size: 11px; color: #888;", "{basin.cta.secondary_text}" }
            }
        }
    }
}

fn project_details(project: &ProjectSite, basin_name: &str) -> Element {
    let financials = &project.financials;
    let price = numbers::currency(financials.purchase_price);
    let cta_url = project.cta_url();

    rsx! {
        div {
            h3 { style: "margin: 0 0 2px 0; font-size: 16px; color: #5C4A1F;", "{project.name}" }
            p { style: "margin: 0 0 8px 0; font-size: 12px; color: #777;", "{basin_name} - {financials.status}" }
            div {
                style: "display: flex; gap: 12px; margin-bottom: 8px;",
                Stat { value: price, label: "Purchase".to_string() }
                Stat { value: format!("{:.0}", financials.acres), label: "Acres".to_string() }
                Stat { value: format!("{:.0}", financials.production_bopd), label: "BOPD".to_string() }
            }
            if !financials.description.is_empty() {
                p { style: "margin: 0 0 8px 0; font-size: 12px; color: #555;", "{financials.description}" }
            }
            a {
                href: "{cta_url}",
                style: "display: inline-block; font-weight: bold; color: #B8862F; text-decoration: none;",
                "Sell Minerals Like These"
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct StatProps {
    value: String,
    label: String,
}

#[component]
fn Stat(props: StatProps) -> Element {
    rsx! {
        div {
            div { style: "font-weight: bold; font-size: 14px;", "{props.value}" }
            div { style: "font-size: 11px; color: #777;", "{props.label}" }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct BasinTooltipProps {
    /// Element the cursor coordinates are relative to.
    pub container_id: String,
}

/// Follows the cursor over the hovered entity.
#[component]
pub fn BasinTooltip(props: BasinTooltipProps) -> Element {
    let state = use_context::<MapState>();
    let hovered = (state.hovered)();
    let cursor = (state.cursor)();
    let (Some(entity), Some(cursor)) = (hovered, cursor) else {
        return rsx! {};
    };

    let placement = place_tooltip(cursor, js_bridge::element_width(&props.container_id), TOOLTIP_WIDTH);
    let origin = match placement.side {
        TooltipSide::Right => "left",
        TooltipSide::Left => "right",
    };
    let style = format!(
        "position: absolute; left: {}px; top: {}px; width: {}px; transform-origin: top {}; z-index: 3; padding: 12px; background: #fff; border-radius: 6px; box-shadow: 0 2px 8px rgba(0,0,0,0.2); pointer-events: none;",
        placement.left, placement.top, TOOLTIP_WIDTH, origin
    );

    rsx! {
        div {
            style: "{style}",
            EntityDetails { entity }
        }
    }
}

/// Bottom-anchored sheet for the hovered or tapped entity.
#[component]
pub fn BottomSheet() -> Element {
    let state = use_context::<MapState>();
    let map = use_coroutine_handle::<MapCommand>();
    let Some(entity) = (state.hovered)() else {
        return rsx! {};
    };

    rsx! {
        div {
            style: "position: fixed; left: 0; right: 0; bottom: 0; z-index: 10; padding: 16px 16px 24px 16px; background: #fff; border-radius: 12px 12px 0 0; box-shadow: 0 -2px 12px rgba(0,0,0,0.25);",
            button {
                style: "float: right; border: none; background: transparent; font-size: 20px; line-height: 1; cursor: pointer; color: #777;",
                aria_label: "Close",
                onclick: move |_| map.send(MapCommand::Dismiss),
                "×"
            }
            EntityDetails { entity }
        }
    }
}

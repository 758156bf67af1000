//! Company totals shown over the live map.

use crate::state::MapState;
use dioxus::prelude::*;
use mrm_utils::numbers;

#[derive(Props, Clone, PartialEq)]
pub struct TrustIndicatorsProps {
    /// Float over the map corner instead of flowing inline.
    #[props(default = false)]
    pub overlay: bool,
}

#[component]
pub fn TrustIndicators(props: TrustIndicatorsProps) -> Element {
    let state = use_context::<MapState>();
    let Some(totals) = state.totals.read().clone() else {
        return rsx! {};
    };

    let style = if props.overlay {
        "position: absolute; left: 12px; bottom: 12px; z-index: 1; display: flex; gap: 16px; padding: 8px 12px; background: rgba(255, 255, 255, 0.92); border-radius: 6px; box-shadow: 0 1px 4px rgba(0,0,0,0.15); pointer-events: none;"
    } else {
        "display: flex; gap: 24px; justify-content: center; padding: 12px 0;"
    };
    let deals = numbers::with_commas(totals.total_deals);
    let acres = numbers::compact(totals.total_acres);

    rsx! {
        div {
            style: "{style}",
            Indicator { value: deals, label: "Deals Closed".to_string() }
            Indicator { value: acres, label: "Acres Acquired".to_string() }
            Indicator { value: format!("{}+", totals.years_in_business), label: "Years".to_string() }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct IndicatorProps {
    value: String,
    label: String,
}

#[component]
fn Indicator(props: IndicatorProps) -> Element {
    rsx! {
        div {
            style: "text-align: center;",
            div { style: "font-weight: bold; font-size: 16px; color: #5C4A1F;", "{props.value}" }
            div { style: "font-size: 11px; color: #777;", "{props.label}" }
        }
    }
}

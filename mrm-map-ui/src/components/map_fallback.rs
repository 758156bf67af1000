//! Static rendering used whenever the interactive map is unavailable.

use crate::state::MapState;
use dioxus::prelude::*;
use mrm_db::models::{BasinCard, ProjectCard, Totals};
use mrm_map::fallback::{ContactPanel, FallbackVariant, FallbackView};
use mrm_utils::numbers;

#[derive(Props, Clone, PartialEq)]
pub struct MapFallbackProps {
    #[props(default)]
    pub variant: FallbackVariant,
}

/// Card grid from the session database, or the contact panel when there is
/// no dataset.
#[component]
pub fn MapFallback(props: MapFallbackProps) -> Element {
    let state = use_context::<MapState>();
    let db = state.db.read().clone();
    let view = FallbackView::render(db.as_ref(), props.variant);

    match view {
        FallbackView::BasinGrid { cards, totals } => rsx! {
            div {
                Experience { totals }
                div {
                    style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(240px, 1fr)); gap: 12px;",
                    for card in cards {
                        BasinCardView { key: "{card.basin_id}", card: card.clone() }
                    }
                }
            }
        },
        FallbackView::ProjectGrid { cards, totals } => rsx! {
            div {
                Experience { totals }
                div {
                    style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(240px, 1fr)); gap: 12px;",
                    for card in cards {
                        ProjectCardView { key: "{card.project_id}", card: card.clone() }
                    }
                }
            }
        },
        FallbackView::ContactPanel(panel) => rsx! {
            ContactPanelView { panel }
        },
    }
}

#[derive(Props, Clone, PartialEq)]
struct ExperienceProps {
    totals: Totals,
}

/// "Our Experience" summary above the grid.
#[component]
fn Experience(props: ExperienceProps) -> Element {
    let totals = &props.totals;
    let deals = numbers::with_commas(totals.total_deals);
    let acres = numbers::compact(totals.total_acres);

    rsx! {
        div {
            style: "margin-bottom: 16px; padding: 12px 16px; background: #F5F1E8; border-radius: 6px;",
            h3 { style: "margin: 0 0 8px 0; color: #5C4A1F;", "Our Experience" }
            p {
                style: "margin: 0; font-size: 14px; color: #444;",
                "{deals} deals closed, {acres} acres acquired across {totals.states_covered} states over {totals.years_in_business}+ years."
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct BasinCardViewProps {
    card: BasinCard,
}

#[component]
fn BasinCardView(props: BasinCardViewProps) -> Element {
    let card = &props.card;
    let deals = numbers::with_commas(u64::from(card.deals_completed));
    let acres = numbers::compact(card.acres_acquired);

    rsx! {
        div {
            style: "padding: 12px; border: 1px solid #E0D6C2; border-radius: 6px; background: #fff;",
            h4 { style: "margin: 0 0 2px 0; color: #5C4A1F;", "{card.full_name}" }
            p { style: "margin: 0 0 8px 0; font-size: 12px; color: #777;", "{card.states}" }
            p {
                style: "margin: 0 0 8px 0; font-size: 13px;",
                "{deals} deals · {acres} acres · {card.years_active} years"
            }
            a {
                href: "{card.cta_url}",
                style: "font-weight: bold; color: #B8862F; text-decoration: none;",
                "{card.cta_text}"
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct ProjectCardViewProps {
    card: ProjectCard,
}

#[component]
fn ProjectCardView(props: ProjectCardViewProps) -> Element {
    let card = &props.card;
    let price = numbers::currency(card.purchase_price);
    let acres = format!("{:.0}", card.acres);
    let production = format!("{:.0}", card.production_bopd);

    rsx! {
        div {
            style: "padding: 12px; border: 1px solid #E0D6C2; border-radius: 6px; background: #fff;",
            h4 { style: "margin: 0 0 2px 0; color: #5C4A1F;", "{card.name}" }
            p { style: "margin: 0 0 8px 0; font-size: 12px; color: #777;", "{card.basin_name} - {card.status} - {card.acquisition_year}" }
            p {
                style: "margin: 0 0 8px 0; font-size: 13px;",
                "{price} · {acres} acres · {production} BOPD"
            }
            a {
                href: "{card.cta_url}",
                style: "font-weight: bold; color: #B8862F; text-decoration: none;",
                "Contact Us"
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct ContactPanelViewProps {
    panel: ContactPanel,
}

#[component]
fn ContactPanelView(props: ContactPanelViewProps) -> Element {
    let panel = &props.panel;
    let tel = format!("tel:{}", panel.phone.chars().filter(|c| c.is_ascii_digit()).collect::<String>());

    rsx! {
        div {
            style: "padding: 24px; text-align: center; border: 1px solid #E0D6C2; border-radius: 8px; background: #F5F1E8;",
            h3 { style: "margin: 0 0 8px 0; color: #5C4A1F;", "{panel.title}" }
            p { style: "margin: 0 0 16px 0; color: #444;", "{panel.message}" }
            p {
                style: "margin: 0 0 4px 0;",
                a { href: "{tel}", style: "color: #B8862F;", "{panel.phone}" }
            }
            p {
                style: "margin: 0 0 16px 0;",
                a { href: "mailto:{panel.email}", style: "color: #B8862F;", "{panel.email}" }
            }
            a {
                href: "{panel.contact_url}",
                style: "display: inline-block; padding: 8px 20px; background: #B8862F; color: #fff; border-radius: 4px; text-decoration: none;",
                "Contact Us"
            }
        }
    }
}

//! The live basin map.
//!
//! Owns the [`MapSession`] for one mount. Engine callbacks, the ready
//! watchdog and the filter bar only enqueue [`MapCommand`]s; a single
//! coroutine applies them to the session and mirrors the result into
//! [`MapState`]. Any failure swaps the map for [`MapFallback`].

use crate::components::{BasinFilters, BasinTooltip, BottomSheet, LoadingOverlay, MapFallback, TrustIndicators};
use crate::js_bridge::{self, DomHost, MapboxEngine};
use crate::state::{MapCommand, MapState};
use dioxus::prelude::*;
use futures_util::StreamExt;
use mrm_map::engine::{EngineEvent, EventSink};
use mrm_map::fallback::FallbackVariant;
use mrm_map::interaction::Presentation;
use mrm_map::loader::EngineHost;
use mrm_map::session::MapSession;
use mrm_map::{EngineState, MapConfig};
use std::cell::RefCell;
use std::rc::Rc;

/// DOM id of the element the engine renders into.
pub const MAP_CONTAINER_ID: &str = "mrm-basin-map";

type SharedSession = Rc<RefCell<Option<MapSession<MapboxEngine>>>>;

#[derive(Props, Clone, PartialEq)]
pub struct InteractiveMapProps {
    pub config: MapConfig,
    /// Grid shown if the map fails.
    #[props(default)]
    pub variant: FallbackVariant,
    #[props(default = 600)]
    pub height: u32,
}

/// Copy the session's observable state into the signals, touching only
/// what changed.
fn sync(state: &mut MapState, session: &MapSession<MapboxEngine>) {
    let engine_state = session.engine_state();
    if *state.engine_state.peek() != engine_state {
        state.engine_state.set(engine_state);
    }
    let interaction = session.interaction();
    if *state.hovered.peek() != interaction.hovered {
        state.hovered.set(interaction.hovered.clone());
    }
    if *state.cursor.peek() != interaction.cursor {
        state.cursor.set(interaction.cursor);
    }
    if *state.selected_filter.peek() != interaction.selected_filter {
        state.selected_filter.set(interaction.selected_filter.clone());
    }
}

#[component]
pub fn InteractiveMap(props: InteractiveMapProps) -> Element {
    let mut state = use_context::<MapState>();
    let session: SharedSession = use_hook(|| Rc::new(RefCell::new(None)));

    let map = use_coroutine({
        let session = session.clone();
        move |mut rx: UnboundedReceiver<MapCommand>| {
            let session = session.clone();
            async move {
                while let Some(command) = rx.next().await {
                    let navigate_to = {
                        let mut slot = session.borrow_mut();
                        let Some(active) = slot.as_mut() else {
                            continue;
                        };
                        let url = match command {
                            MapCommand::Engine(event) => active.handle(event),
                            MapCommand::ReadyTimeout => {
                                active.ready_timeout();
                                None
                            }
                            MapCommand::Filter(token) => {
                                active.set_filter(&token);
                                None
                            }
                            MapCommand::Dismiss => {
                                active.dismiss_hover();
                                None
                            }
                        };
                        sync(&mut state, active);
                        url
                    };
                    if let Some(url) = navigate_to {
                        js_bridge::navigate(&url);
                    }
                }
            }
        }
    });

    // Mount: runs once the container div exists.
    use_effect({
        let session = session.clone();
        let config = props.config.clone();
        move || {
            if session.borrow().is_some() {
                return;
            }
            let Some(dataset) = state.dataset.peek().clone() else {
                return;
            };

            let width = js_bridge::element_width(MAP_CONTAINER_ID);
            state.presentation.set(Presentation::detect(
                width,
                js_bridge::pointer_is_coarse(),
                config.mobile_breakpoint,
            ));

            let mut fresh = MapSession::new(&dataset, config.clone(), config.is_mobile_width(width));
            state.filter_buttons.set(fresh.filters().buttons().to_vec());
            let token_ok = fresh.check_token().is_ok();
            sync(&mut state, &fresh);
            *session.borrow_mut() = Some(fresh);
            if !token_ok {
                return;
            }

            let slot = session.clone();
            let timeout_ms = config.load_timeout_ms;
            js_bridge::shared_loader(&config).ensure_available(Box::new(move |outcome| {
                let mut state = state;
                let events: EventSink =
                    Rc::new(move |event: EngineEvent| map.send(MapCommand::Engine(event)));

                let waiting = {
                    let mut guard = slot.borrow_mut();
                    // Unmounted while the script was loading.
                    let Some(active) = guard.as_mut() else {
                        return;
                    };
                    active.on_engine_loaded(outcome, MAP_CONTAINER_ID, events);
                    sync(&mut state, active);
                    active.engine_state() == EngineState::Loading
                };

                if waiting {
                    let watched = slot.clone();
                    DomHost.set_timeout(
                        timeout_ms,
                        Box::new(move || {
                            if watched.borrow().is_some() {
                                map.send(MapCommand::ReadyTimeout);
                            }
                        }),
                    );
                }
            }));
        }
    });

    use_drop({
        let session = session.clone();
        move || {
            let taken = session.borrow_mut().take();
            if let Some(mut active) = taken {
                active.destroy();
            }
        }
    });

    let engine_state = (state.engine_state)();
    let presentation = (state.presentation)();
    let frame_style = format!(
        "position: relative; width: 100%; height: {}px; border-radius: 8px; overflow: hidden; background: #F5F1E8;",
        props.height
    );

    rsx! {
        div {
            style: "width: 100%;",
            if engine_state == EngineState::Failed {
                MapFallback { variant: props.variant }
            } else {
                BasinFilters {}
                div {
                    style: "{frame_style}",
                    div {
                        id: "{MAP_CONTAINER_ID}",
                        style: "position: absolute; top: 0; right: 0; bottom: 0; left: 0;",
                    }
                    if engine_state == EngineState::Loading {
                        LoadingOverlay {}
                    }
                    TrustIndicators { overlay: true }
                    if presentation == Presentation::Tooltip {
                        BasinTooltip { container_id: MAP_CONTAINER_ID.to_string() }
                    }
                }
                if presentation == Presentation::BottomSheet {
                    BottomSheet {}
                }
            }
        }
    }
}

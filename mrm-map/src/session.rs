//! One mounted map: engine state, instance, interaction and filters.
//!
//! The session is driven entirely by events (loader outcome, engine events,
//! watchdog, filter clicks) and never blocks. Any failure funnels through
//! [`MapSession::fail`], which moves `engine_state` to `failed` exactly once.

use crate::config::{MapConfig, ViewportConfig};
use crate::controller::MapController;
use crate::engine::{EngineEvent, EventSink, MapEngine};
use crate::error::MapError;
use crate::filter::{FilterController, FilterOutcome};
use crate::interaction::{HandlerTable, InteractionEffect, InteractionManager, InteractionState};
use crate::layers::LayerPlan;
use crate::loader::LoadOutcome;
use crate::status::EngineState;
use mrm_geo::Dataset;

pub struct MapSession<E: MapEngine> {
    config: MapConfig,
    viewport: ViewportConfig,
    plan: LayerPlan,
    controller: Option<MapController<E>>,
    interaction: InteractionManager,
    filters: FilterController,
    state: EngineState,
    error: Option<MapError>,
}

impl<E: MapEngine> MapSession<E> {
    pub fn new(dataset: &Dataset, config: MapConfig, is_mobile: bool) -> Self {
        let plan = LayerPlan::build(dataset);
        let interaction = InteractionManager::new(HandlerTable::build(&plan, dataset));
        let filters = FilterController::new(dataset, &config, is_mobile);
        Self {
            viewport: config.viewport_for(is_mobile),
            config,
            plan,
            controller: None,
            interaction,
            filters,
            state: EngineState::Loading,
            error: None,
        }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn engine_state(&self) -> EngineState {
        self.state
    }

    /// The error that failed the session, if any.
    pub fn error(&self) -> Option<&MapError> {
        self.error.as_ref()
    }

    pub fn interaction(&self) -> &InteractionState {
        self.interaction.state()
    }

    pub fn filters(&self) -> &FilterController {
        &self.filters
    }

    pub fn plan(&self) -> &LayerPlan {
        &self.plan
    }

    /// A missing or non-public access token fails the session before any
    /// script is injected.
    pub fn check_token(&mut self) -> Result<(), MapError> {
        match self.config.validate_token() {
            Ok(_) => Ok(()),
            Err(err) => {
                let err = MapError::from(err);
                self.fail(err.clone());
                Err(err)
            }
        }
    }

    /// Continue after the loader settled: construct the instance on success.
    pub fn on_engine_loaded(&mut self, outcome: LoadOutcome, container: &str, events: EventSink) {
        if self.state != EngineState::Loading || self.controller.is_some() {
            return;
        }
        let created = outcome
            .map_err(MapError::from)
            .and_then(|_| {
                self.config
                    .instance_options(container, &self.viewport)
                    .map_err(MapError::from)
            })
            .and_then(|options| MapController::create_instance(&options, self.plan.clone(), events));
        match created {
            Ok(controller) => self.controller = Some(controller),
            Err(err) => self.fail(err),
        }
    }

    /// Feed one engine event. Returns the URL to navigate to after a click.
    pub fn handle(&mut self, event: EngineEvent) -> Option<String> {
        if self.state.is_failed() {
            return None;
        }
        let controller = self.controller.as_mut()?;
        match event {
            EngineEvent::Ready => {
                if let Err(err) = controller.on_ready() {
                    self.fail(err);
                } else if controller.is_ready() {
                    self.state.transition(EngineState::Ready);
                }
                None
            }
            EngineEvent::Error { message } => {
                if let Some(err) = controller.on_error(&message) {
                    self.fail(err);
                }
                None
            }
            EngineEvent::Pointer(pointer) => {
                if !controller.is_ready() {
                    return None;
                }
                let effects = self.interaction.handle(&pointer);
                controller.apply(&effects);
                effects.into_iter().find_map(|effect| match effect {
                    InteractionEffect::Navigate(url) => Some(url),
                    _ => None,
                })
            }
        }
    }

    /// The instance did not report ready within the load timeout.
    pub fn ready_timeout(&mut self) {
        let timeout_ms = self.config.load_timeout_ms;
        if let Some(err) = self.controller.as_mut().and_then(|c| c.on_ready_timeout(timeout_ms)) {
            self.fail(err);
        }
    }

    /// Select a filter. The token is recorded for highlighting even when it
    /// names no basin.
    pub fn set_filter(&mut self, token: &str) -> FilterOutcome {
        self.interaction.select_filter(token);
        let outcome = self.filters.set_filter(token);
        if let (FilterOutcome::Camera(camera), Some(controller)) = (&outcome, self.controller.as_mut()) {
            controller.move_camera(camera);
        }
        outcome
    }

    /// Close the bottom sheet.
    pub fn dismiss_hover(&mut self) {
        let effects = self.interaction.dismiss();
        if let Some(controller) = self.controller.as_mut() {
            controller.apply(&effects);
        }
    }

    /// Move to `failed`. Only the first failure is kept.
    pub fn fail(&mut self, err: MapError) {
        if self.state.transition(EngineState::Failed) {
            log::error!("[MRM] map failed, showing fallback: {}", err);
            self.error = Some(err);
        }
        if let Some(controller) = self.controller.as_mut() {
            controller.destroy();
        }
    }

    /// Unmount: release the instance and its listeners.
    pub fn destroy(&mut self) {
        if let Some(mut controller) = self.controller.take() {
            controller.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineAssets;
    use crate::engine::{CameraMove, FeatureKey, PointerEvent, PointerKind};
    use crate::error::EngineLoadError;
    use crate::fallback::{FallbackVariant, FallbackView};
    use crate::layers::LayerKind;
    use crate::loader::{EngineHandle, EngineLoader};
    use crate::testing::{
        count_calls, emit, fail_create, hover_flags, two_basin_dataset, EngineCall, FakeEngine, FakeHost,
    };
    use mrm_db::Database;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Shared = Rc<RefCell<MapSession<FakeEngine>>>;

    fn config() -> MapConfig {
        MapConfig::default().with_access_token(Some("pk.test"))
    }

    fn session(config: MapConfig) -> Shared {
        Rc::new(RefCell::new(MapSession::new(&two_basin_dataset(), config, false)))
    }

    /// Engine events are queued and drained after the emitting call returns,
    /// the way the browser delivers them on a later tick.
    fn sink(queue: &Rc<RefCell<Vec<EngineEvent>>>) -> EventSink {
        let queue = Rc::clone(queue);
        Rc::new(move |event| queue.borrow_mut().push(event))
    }

    fn drain(session: &Shared, queue: &Rc<RefCell<Vec<EngineEvent>>>) -> Vec<String> {
        let events: Vec<EngineEvent> = queue.borrow_mut().drain(..).collect();
        events
            .into_iter()
            .filter_map(|event| session.borrow_mut().handle(event))
            .collect()
    }

    fn start(session: &Shared, host: &FakeHost) -> Rc<RefCell<Vec<EngineEvent>>> {
        let queue = Rc::new(RefCell::new(Vec::new()));
        session.borrow_mut().check_token().unwrap();
        let loader = EngineLoader::new(host.clone(), EngineAssets::default(), 5000);
        let target = Rc::clone(session);
        let events = sink(&queue);
        loader.ensure_available(Box::new(move |outcome| {
            target.borrow_mut().on_engine_loaded(outcome, "basin-map", events);
        }));
        queue
    }

    fn pointer(kind: PointerKind, layer: &str) -> EngineEvent {
        EngineEvent::Pointer(PointerEvent {
            kind,
            layer: layer.to_string(),
            x: 200.0,
            y: 120.0,
        })
    }

    fn ready_session() -> (Shared, Rc<RefCell<Vec<EngineEvent>>>) {
        let session = session(config());
        let queue = start(&session, &FakeHost::preinstalled());
        emit(EngineEvent::Ready);
        drain(&session, &queue);
        (session, queue)
    }

    #[test]
    fn happy_path_registers_layers_and_hovers_one_basin() {
        let (session, queue) = ready_session();
        assert_eq!(session.borrow().engine_state(), EngineState::Ready);

        let fills = session.borrow().plan().layers_of(LayerKind::Fill).count();
        let labels = session.borrow().plan().layers_of(LayerKind::Label).count();
        assert_eq!((fills, labels), (2, 2));
        assert!(count_calls(|c| *c == EngineCall::AddLayer("basin-fill:williston".into())) == 1);
        assert!(count_calls(|c| *c == EngineCall::AddLayer("basin-label:delaware".into())) == 1);

        emit(pointer(PointerKind::Enter, "basin-fill:williston"));
        drain(&session, &queue);

        let flags = hover_flags();
        let williston = FeatureKey {
            source: "basin:williston".into(),
            id: "williston".into(),
        };
        assert_eq!(flags.get(&williston), Some(&true));
        assert!(flags.iter().filter(|(k, _)| **k != williston).all(|(_, hover)| !hover));
        assert_eq!(session.borrow().interaction().hovered_basin(), Some("williston"));
    }

    #[test]
    fn script_timeout_fails_once_and_falls_back_to_cards() {
        let session = session(config());
        let host = FakeHost::new();
        let _queue = start(&session, &host);
        assert_eq!(session.borrow().engine_state(), EngineState::Loading);

        host.fire_timers();
        host.fire_load();
        session.borrow_mut().ready_timeout();

        let s = session.borrow();
        assert_eq!(s.engine_state(), EngineState::Failed);
        assert_eq!(s.error(), Some(&MapError::Load(EngineLoadError::TimedOut(5000))));
        assert_eq!(count_calls(|c| *c == EngineCall::Create), 0);

        let dataset = two_basin_dataset();
        let db = Database::from_dataset(&dataset).unwrap();
        let view = FallbackView::render(Some(&db), FallbackVariant::Basins);
        assert_eq!(view.card_count(), dataset.basins().len());
    }

    #[test]
    fn every_failure_point_reaches_failed() {
        // Script error.
        let s = session(config());
        let host = FakeHost::new();
        start(&s, &host);
        host.fire_error();
        assert!(s.borrow().engine_state().is_failed());

        // Construction error event before ready.
        let s = session(config());
        let queue = start(&s, &FakeHost::preinstalled());
        emit(EngineEvent::Error {
            message: "Unauthorized".into(),
        });
        drain(&s, &queue);
        assert!(s.borrow().engine_state().is_failed());
        assert!(matches!(s.borrow().error(), Some(MapError::Construction(_))));

        // Ready watchdog.
        let s = session(config());
        start(&s, &FakeHost::preinstalled());
        s.borrow_mut().ready_timeout();
        assert!(s.borrow().engine_state().is_failed());
    }

    #[test]
    fn constructor_failure_fails_the_session() {
        fail_create();
        let s = session(config());
        start(&s, &FakeHost::preinstalled());
        assert!(matches!(s.borrow().error(), Some(MapError::Construction(_))));
    }

    #[test]
    fn missing_token_fails_before_injection() {
        let mut s: MapSession<FakeEngine> =
            MapSession::new(&two_basin_dataset(), MapConfig::default(), false);
        assert_eq!(
            s.check_token(),
            Err(MapError::Load(EngineLoadError::MissingToken))
        );
        assert!(s.engine_state().is_failed());

        // A late loader success is ignored.
        s.on_engine_loaded(
            Ok(EngineHandle { preinstalled: true }),
            "basin-map",
            Rc::new(|_: EngineEvent| {}),
        );
        assert_eq!(count_calls(|c| *c == EngineCall::Create), 0);
    }

    #[test]
    fn unknown_filter_updates_selection_without_camera() {
        let (session, _) = ready_session();
        let outcome = session.borrow_mut().set_filter("atlantis");
        assert_eq!(outcome, FilterOutcome::Ignored);
        assert_eq!(session.borrow().interaction().selected_filter, "atlantis");
        assert_eq!(count_calls(|c| matches!(c, EngineCall::Camera(_))), 0);
    }

    #[test]
    fn filter_all_twice_targets_same_camera() {
        let (session, queue) = ready_session();
        let first = session.borrow_mut().set_filter("all");
        emit(pointer(PointerKind::Enter, "project-point:del-001"));
        drain(&session, &queue);
        let second = session.borrow_mut().set_filter("all");
        assert_eq!(first, second);

        let cameras: Vec<CameraMove> = crate::testing::engine_calls()
            .into_iter()
            .filter_map(|c| match c {
                EngineCall::Camera(camera) => Some(camera),
                _ => None,
            })
            .collect();
        assert_eq!(cameras.len(), 2);
        assert_eq!(cameras[0], cameras[1]);
    }

    #[test]
    fn click_returns_navigation_target() {
        let (session, queue) = ready_session();
        emit(pointer(PointerKind::Click, "project-point:wil-001"));
        let urls = drain(&session, &queue);
        assert_eq!(urls, vec!["/contact?basin=williston&project=wil-001".to_string()]);
    }

    #[test]
    fn pointer_events_before_ready_are_dropped() {
        let s = session(config());
        let queue = start(&s, &FakeHost::preinstalled());
        emit(pointer(PointerKind::Enter, "basin-fill:williston"));
        drain(&s, &queue);
        assert_eq!(s.borrow().interaction().hovered, None);
    }

    #[test]
    fn destroy_releases_instance() {
        let (session, _) = ready_session();
        session.borrow_mut().destroy();
        session.borrow_mut().destroy();
        assert_eq!(count_calls(|c| *c == EngineCall::Remove), 1);
    }

    #[test]
    fn dismiss_clears_hover_flag() {
        let (session, queue) = ready_session();
        emit(pointer(PointerKind::Enter, "basin-fill:delaware"));
        drain(&session, &queue);
        session.borrow_mut().dismiss_hover();
        assert!(hover_flags().values().all(|hover| !hover));
        assert_eq!(session.borrow().interaction().hovered, None);
    }
}

//! Lifecycle of one map instance.

use crate::engine::{CameraMove, EventSink, MapEngine};
use crate::error::{EngineLoadError, MapError};
use crate::interaction::InteractionEffect;
use crate::layers::LayerPlan;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstancePhase {
    /// Constructed, waiting for the ready event. Nothing is registered yet.
    Constructing,
    Ready,
    Failed,
    Destroyed,
}

/// Owns the engine instance and registers the layer plan once it is ready.
pub struct MapController<E: MapEngine> {
    engine: Option<E>,
    plan: LayerPlan,
    phase: InstancePhase,
}

impl<E: MapEngine> MapController<E> {
    pub fn create_instance(options: &Value, plan: LayerPlan, events: EventSink) -> Result<Self, MapError> {
        let engine = E::create(options, events)?;
        log::info!("[MRM] map instance constructed, waiting for ready");
        Ok(Self {
            engine: Some(engine),
            plan,
            phase: InstancePhase::Constructing,
        })
    }

    pub fn phase(&self) -> InstancePhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == InstancePhase::Ready
    }

    pub fn plan(&self) -> &LayerPlan {
        &self.plan
    }

    /// Register every source and layer, then watch the interactive layers.
    ///
    /// Returns the number of layers registered. A rejected registration
    /// fails the instance; it is never retried.
    pub fn on_ready(&mut self) -> Result<usize, MapError> {
        if self.phase != InstancePhase::Constructing {
            return Ok(0);
        }
        let Some(engine) = self.engine.as_mut() else {
            return Ok(0);
        };
        match register(engine, &self.plan) {
            Ok(count) => {
                self.phase = InstancePhase::Ready;
                log::info!(
                    "[MRM] map ready: {} sources, {} layers",
                    self.plan.sources.len(),
                    count
                );
                Ok(count)
            }
            Err(err) => {
                self.fail();
                Err(err)
            }
        }
    }

    /// Error event from the instance. Terminal before ready, logged after.
    pub fn on_error(&mut self, message: &str) -> Option<MapError> {
        match self.phase {
            InstancePhase::Constructing => {
                self.fail();
                Some(MapError::Construction(message.to_string()))
            }
            InstancePhase::Ready => {
                log::warn!("[MRM] map engine error after ready ignored: {}", message);
                None
            }
            InstancePhase::Failed | InstancePhase::Destroyed => None,
        }
    }

    /// The ready watchdog fired.
    pub fn on_ready_timeout(&mut self, timeout_ms: u32) -> Option<MapError> {
        if self.phase != InstancePhase::Constructing {
            return None;
        }
        self.fail();
        Some(EngineLoadError::TimedOut(timeout_ms).into())
    }

    pub fn apply(&mut self, effects: &[InteractionEffect]) {
        if self.phase != InstancePhase::Ready {
            return;
        }
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        for effect in effects {
            match effect {
                InteractionEffect::SetHover { feature, hover } => engine.set_feature_state(feature, *hover),
                InteractionEffect::SetCursor(cursor) => engine.set_cursor(*cursor),
                InteractionEffect::Navigate(_) => {}
            }
        }
    }

    /// Returns `false` when there is no ready instance to move.
    pub fn move_camera(&mut self, camera: &CameraMove) -> bool {
        match (self.phase, self.engine.as_mut()) {
            (InstancePhase::Ready, Some(engine)) => {
                engine.move_camera(camera);
                true
            }
            _ => false,
        }
    }

    /// Release the instance and its listeners. Safe in any phase.
    pub fn destroy(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.remove();
            log::info!("[MRM] map instance destroyed");
        }
        self.phase = InstancePhase::Destroyed;
    }

    fn fail(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.remove();
        }
        self.phase = InstancePhase::Failed;
    }
}

impl<E: MapEngine> Drop for MapController<E> {
    fn drop(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.remove();
        }
    }
}

fn register<E: MapEngine>(engine: &mut E, plan: &LayerPlan) -> Result<usize, MapError> {
    for source in &plan.sources {
        engine.add_source(source)?;
    }
    for layer in &plan.layers {
        engine.add_layer(layer)?;
    }
    for layer in plan.interactive_layers() {
        engine.watch_layer(&layer.id)?;
    }
    Ok(plan.layers.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineEvent;
    use crate::testing::{count_calls, engine_calls, fail_layer, two_basin_dataset, EngineCall, FakeEngine};
    use std::rc::Rc;

    fn controller() -> MapController<FakeEngine> {
        let plan = LayerPlan::build(&two_basin_dataset());
        MapController::create_instance(&serde_json::json!({}), plan, Rc::new(|_: EngineEvent| {})).unwrap()
    }

    #[test]
    fn nothing_is_registered_before_ready() {
        let c = controller();
        assert_eq!(c.phase(), InstancePhase::Constructing);
        assert_eq!(engine_calls(), vec![EngineCall::Create]);
    }

    #[test]
    fn ready_registers_plan_and_watches_interactive_layers() {
        let mut c = controller();
        let count = c.on_ready().unwrap();
        assert_eq!(count, c.plan().layers.len());
        assert!(c.is_ready());
        assert_eq!(count_calls(|call| matches!(call, EngineCall::AddSource(_))), c.plan().sources.len());
        assert_eq!(count_calls(|call| matches!(call, EngineCall::Watch(_))), 4);

        // A second ready event registers nothing.
        assert_eq!(c.on_ready().unwrap(), 0);
    }

    #[test]
    fn rejected_layer_fails_the_instance() {
        fail_layer("basin-label:delaware");
        let mut c = controller();
        assert!(matches!(c.on_ready(), Err(MapError::Construction(_))));
        assert_eq!(c.phase(), InstancePhase::Failed);
        assert_eq!(count_calls(|call| *call == EngineCall::Remove), 1);
    }

    #[test]
    fn error_before_ready_is_terminal() {
        let mut c = controller();
        assert!(c.on_error("401 Unauthorized").is_some());
        assert_eq!(c.phase(), InstancePhase::Failed);
        assert!(c.on_error("again").is_none());
        assert_eq!(c.on_ready().unwrap(), 0);
    }

    #[test]
    fn error_after_ready_is_ignored() {
        let mut c = controller();
        c.on_ready().unwrap();
        assert!(c.on_error("tile failed").is_none());
        assert!(c.is_ready());
    }

    #[test]
    fn ready_timeout_only_fails_a_constructing_instance() {
        let mut c = controller();
        c.on_ready().unwrap();
        assert!(c.on_ready_timeout(5000).is_none());

        let mut slow = controller();
        assert_eq!(
            slow.on_ready_timeout(5000),
            Some(MapError::Load(EngineLoadError::TimedOut(5000)))
        );
    }

    #[test]
    fn camera_moves_need_a_ready_instance() {
        let camera = CameraMove::FlyTo {
            center: [-100.0, 40.0],
            zoom: 4.0,
            duration_ms: 1000,
        };
        let mut c = controller();
        assert!(!c.move_camera(&camera));
        c.on_ready().unwrap();
        assert!(c.move_camera(&camera));
    }

    #[test]
    fn destroy_before_ready_releases_once() {
        let mut c = controller();
        c.destroy();
        c.destroy();
        drop(c);
        assert_eq!(count_calls(|call| *call == EngineCall::Remove), 1);
        assert_eq!(count_calls(|call| matches!(call, EngineCall::AddLayer(_))), 0);
    }
}

//! Engine lifecycle as seen by the page.

use serde::Serialize;

/// `loading -> ready`, `loading -> failed`. `failed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    #[default]
    Loading,
    Ready,
    Failed,
}

impl EngineState {
    /// Apply a transition, returning `true` only if the state changed.
    ///
    /// Nothing leaves `Failed`, and `Ready` can only fall to `Failed`.
    pub fn transition(&mut self, to: EngineState) -> bool {
        let allowed = matches!(
            (*self, to),
            (EngineState::Loading, EngineState::Ready)
                | (EngineState::Loading, EngineState::Failed)
                | (EngineState::Ready, EngineState::Failed)
        );
        if allowed {
            log::info!("[MRM] engine state {:?} -> {:?}", self, to);
            *self = to;
        }
        allowed
    }

    pub fn is_failed(self) -> bool {
        self == EngineState::Failed
    }
}

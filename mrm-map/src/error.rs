use thiserror::Error;

/// The engine script/stylesheet could not be made available.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineLoadError {
    #[error("map engine access token is missing or invalid")]
    MissingToken,

    #[error("failed to load map engine script from {0}")]
    ScriptFailed(String),

    #[error("map engine did not become available within {0} ms")]
    TimedOut(u32),

    #[error("map engine script loaded but the engine global is missing")]
    EngineMissing,
}

/// Failures that move the map to the fallback renderer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    #[error(transparent)]
    Load(#[from] EngineLoadError),

    #[error("map engine error: {0}")]
    Construction(String),

    #[error("geographic dataset unavailable: {0}")]
    DatasetUnavailable(String),
}

impl From<mrm_geo::DatasetError> for MapError {
    fn from(err: mrm_geo::DatasetError) -> Self {
        MapError::DatasetUnavailable(err.to_string())
    }
}

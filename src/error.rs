use thiserror::Error;

/// A single drawing call failed.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("surface error: {0}")]
pub struct SurfaceError(pub String);

/// Errors that can occur while driving the particle engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("mount point unavailable")]
    MountUnavailable,

    #[error("failed to create drawing surface: {0}")]
    SurfaceCreation(String),

    #[error("frame failed: {0}")]
    Frame(#[from] SurfaceError),

    #[error("engine is already running; tear it down first")]
    AlreadyRunning,

    #[error("failed to schedule frame: {0}")]
    Scheduler(String),
}

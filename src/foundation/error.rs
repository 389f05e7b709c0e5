/// Convenience result type used across the engine.
pub type PrimeWheelResult<T> = Result<T, PrimeWheelError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Control-surface conditions (capacity, bad index, not ready, already running) are local and
/// leave the engine state untouched; see [`PrimeWheelError::is_recoverable`].
#[derive(thiserror::Error, Debug)]
pub enum PrimeWheelError {
    /// The registry already holds its maximum number of wheels.
    #[error("capacity exceeded: registry holds the maximum of {max} wheels")]
    CapacityExceeded {
        /// Registry capacity at the time of the rejected add.
        max: usize,
    },

    /// A wheel index fell outside `[0, count)`.
    #[error("wheel index {index} out of range (count {count})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of registered wheels.
        count: usize,
    },

    /// The engine cannot run yet (no surface attached).
    #[error("not ready: {0}")]
    NotReady(String),

    /// `start` while the engine is already running or paused.
    #[error("already running")]
    AlreadyRunning,

    /// A surface is already attached.
    #[error("already initialized")]
    AlreadyInitialized,

    /// `pause` while the engine is stopped.
    #[error("not running")]
    NotRunning,

    /// Registry capacity is frozen once the engine has been started.
    #[error("configuration is frozen after the first start")]
    ConfigFrozen,

    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Raster or encoding failures.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PrimeWheelError {
    /// Build a [`PrimeWheelError::NotReady`] value.
    pub fn not_ready(msg: impl Into<String>) -> Self {
        Self::NotReady(msg.into())
    }

    /// Build a [`PrimeWheelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PrimeWheelError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PrimeWheelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether this is a reported control-surface condition rather than a failure.
    ///
    /// Recoverable errors never change engine state; callers may log them and carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::CapacityExceeded { .. }
                | Self::IndexOutOfRange { .. }
                | Self::NotReady(_)
                | Self::AlreadyRunning
                | Self::AlreadyInitialized
                | Self::NotRunning
                | Self::ConfigFrozen
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

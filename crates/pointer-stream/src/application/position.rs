//! The pointer/display capability the streaming session samples from.

use thiserror::Error;

use crate::domain::{DisplayBounds, RawPosition, SampleError};

/// Error type for pointer and display queries.
#[derive(Debug, Error)]
pub enum PositionError {
    /// The OS call failed or the platform has no usable display.
    ///
    /// The inner string is a human-readable description, e.g.
    /// "XOpenDisplay failed; DISPLAY=<unset>".
    #[error("platform error while reading pointer state: {0}")]
    Platform(String),

    /// The OS reported a zero-sized display.
    #[error("host reported an unusable display size: {0}")]
    InvalidBounds(#[from] SampleError),
}

/// Read-only access to the host's pointer position and display size.
///
/// Both methods are pure queries with no side effects and may be called at
/// any rate.  Implementations are shared across sessions as
/// `Arc<dyn PositionSource>`, hence `Send + Sync`.
pub trait PositionSource: Send + Sync {
    /// Returns the current pointer position in display pixels.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError::Platform`] if the OS query fails.
    fn current_position(&self) -> Result<RawPosition, PositionError>;

    /// Returns the pixel size of the display positions are relative to.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError::Platform`] if the OS query fails, or
    /// [`PositionError::InvalidBounds`] if the display reports a zero size.
    fn display_size(&self) -> Result<DisplayBounds, PositionError>;
}

//! Pointer sample types and the normalization rule.
//!
//! A raw pointer position is expressed in display pixels.  Clients receive it
//! divided by the display width and height, so the top-left corner is
//! `(0.0, 0.0)` and the bottom-right corner is `(1.0, 1.0)` regardless of the
//! host's resolution.
//!
//! # Wire format
//!
//! Every sample is sent as one WebSocket text message:
//!
//! ```text
//! {"x":0.5,"y":0.25}
//! ```
//!
//! No envelope, sequence number, or timestamp.  Key order is always `x`, `y`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for constructing domain values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SampleError {
    /// A display dimension was zero, which would make normalization divide by zero.
    #[error("display bounds must be non-zero, got {width}x{height}")]
    EmptyDisplay { width: u32, height: u32 },
}

/// Pointer position in display pixels, as reported by the host.
///
/// Signed because multi-monitor layouts can place the pointer left of or
/// above the primary display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPosition {
    pub x: i32,
    pub y: i32,
}

impl RawPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Pixel size of the display that raw positions are normalized against.
///
/// Both dimensions are guaranteed non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayBounds {
    width: u32,
    height: u32,
}

impl DisplayBounds {
    /// Creates a `DisplayBounds`.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::EmptyDisplay`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, SampleError> {
        if width == 0 || height == 0 {
            return Err(SampleError::EmptyDisplay { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Scales `position` into display-relative coordinates.
    ///
    /// The result is a plain division: positions outside the bounds produce
    /// values outside `[0, 1]`.
    pub fn normalize(&self, position: RawPosition) -> CoordinateSample {
        CoordinateSample {
            x: f64::from(position.x) / f64::from(self.width),
            y: f64::from(position.y) / f64::from(self.height),
        }
    }
}

/// One normalized pointer sample, the unit sent on the wire.
///
/// Field declaration order fixes the JSON key order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSample {
    pub x: f64,
    pub y: f64,
}

impl CoordinateSample {
    /// Serializes the sample to its JSON text form.
    ///
    /// # Errors
    ///
    /// Propagates the `serde_json` error; with finite fields this does not
    /// happen in practice.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

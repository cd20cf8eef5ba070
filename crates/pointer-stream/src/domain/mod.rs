//! Domain layer for pointer-stream.
//!
//! Pure types with no dependencies on I/O, networking, or the async runtime:
//! the sample wire type, the normalization rule, and the runtime
//! configuration.

pub mod config;
pub mod sample;

pub use config::{ConfigError, StreamConfig};
pub use sample::{CoordinateSample, DisplayBounds, RawPosition, SampleError};

//! Streaming configuration types.
//!
//! [`StreamConfig`] is the single source of truth for all runtime settings.
//! `main.rs` builds it from defaults, an optional TOML file, and CLI/env
//! overrides; tests build it directly.

use std::net::{Ipv4Addr, SocketAddr};
use std::ops::RangeInclusive;
use std::time::Duration;

use thiserror::Error;

/// Default WebSocket port.
pub const DEFAULT_PORT: u16 = 8765;

/// Default sampling frequency in Hz.
pub const DEFAULT_FREQUENCY_HZ: u32 = 60;

/// Accepted sampling frequencies.
pub const FREQUENCY_RANGE_HZ: RangeInclusive<u32> = 1..=1000;

/// Error type for invalid configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("sampling frequency must be between 1 and 1000 Hz, got {0}")]
    FrequencyOutOfRange(u32),
}

/// All runtime configuration for the pointer stream server.
///
/// # Example
///
/// ```rust
/// use pointer_stream::domain::StreamConfig;
///
/// let cfg = StreamConfig::default();
/// assert_eq!(cfg.bind_addr.port(), 8765);
/// assert_eq!(cfg.frequency_hz(), 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConfig {
    /// Address the WebSocket listener binds to.
    ///
    /// Defaults to loopback: the stream is meant for a local consumer.
    pub bind_addr: SocketAddr,

    frequency_hz: u32,
}

impl StreamConfig {
    /// Creates a config after validating the sampling frequency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FrequencyOutOfRange`] if `frequency_hz` is
    /// outside [`FREQUENCY_RANGE_HZ`].
    pub fn new(bind_addr: SocketAddr, frequency_hz: u32) -> Result<Self, ConfigError> {
        if !FREQUENCY_RANGE_HZ.contains(&frequency_hz) {
            return Err(ConfigError::FrequencyOutOfRange(frequency_hz));
        }
        Ok(Self {
            bind_addr,
            frequency_hz,
        })
    }

    pub fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }

    /// Time between two consecutive samples (`1 / frequency_hz` seconds).
    pub fn sample_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frequency_hz))
    }
}

impl Default for StreamConfig {
    /// | Field        | Default          |
    /// |--------------|------------------|
    /// | bind_addr    | `127.0.0.1:8765` |
    /// | frequency_hz | `60`             |
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            frequency_hz: DEFAULT_FREQUENCY_HZ,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

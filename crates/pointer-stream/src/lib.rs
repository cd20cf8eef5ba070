//! pointer-stream library crate.
//!
//! Samples the host pointer at a fixed rate and streams each position,
//! normalized to the display size, to WebSocket clients as
//! `{"x":<f64>,"y":<f64>}` text messages.
//!
//! # Architecture
//!
//! ```text
//! WebSocket client (JSON text messages)
//!         ↑
//! [pointer-stream]
//!   ├── domain/           Pure types: CoordinateSample, DisplayBounds, StreamConfig
//!   ├── application/      Streaming session loop + PositionSource/Ticker/SampleChannel seams
//!   └── infrastructure/
//!         ├── position_source/  X11 / Win32 / Core Graphics pointer readers
//!         ├── ticker            tokio interval
//!         ├── ws_server         accept loop (tokio-tungstenite)
//!         └── config_file       optional TOML file
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O and no async.
//! - `application` depends on `domain` only; it reaches the outside world
//!   through traits.
//! - `infrastructure` implements those traits with `tokio`, `tungstenite`,
//!   and the platform APIs.

/// Domain layer: pure types (no I/O).
pub mod domain;

/// Application layer: the streaming session.
pub mod application;

/// Infrastructure layer: OS pointer access, WebSocket server, config file.
pub mod infrastructure;

//! Infrastructure layer for pointer-stream.
//!
//! Everything that touches the OS or the network:
//!
//! - Reading the pointer and display size on each platform
//! - The tokio interval that paces sampling
//! - Accepting WebSocket connections and spawning per-session tasks
//! - Loading the optional TOML configuration file

pub mod config_file;
pub mod position_source;
pub mod ticker;
pub mod ws_server;

pub use position_source::NativePositionSource;
pub use ws_server::{run_server, serve};

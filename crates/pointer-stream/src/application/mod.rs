//! Application layer for pointer-stream.
//!
//! Knows *what* a streaming session does and delegates *how* to the
//! infrastructure layer through three seams:
//!
//! - [`PositionSource`]: reads the pointer and the display size
//! - [`Ticker`]: paces the loop
//! - [`SampleChannel`]: carries messages to the peer
//!
//! Nothing here opens sockets, spawns tasks, or touches OS APIs.

pub mod position;
pub mod stream_session;

pub use position::{PositionError, PositionSource};
pub use stream_session::{
    run_session, ChannelError, SampleChannel, SessionError, SessionStats, Ticker,
};

//! Streaming session: the per-connection sampling loop.
//!
//! For one connection the session repeatedly waits for the next tick, reads
//! the pointer position, normalizes it against the display bounds captured at
//! session start, and sends it as one JSON text message.  The loop ends when
//! the peer closes the connection.
//!
//! ```text
//!   display_size()  ── once
//!        │
//!   ┌────▼─────────────────────────────────────────────┐
//!   │ tick ──► current_position ──► normalize ──► send │ ◄─ repeat
//!   └──────────────────────────────────────────────────┘
//!        │ peer closed            │ other failure
//!        ▼                        ▼
//!   Ok(SessionStats)        Err(SessionError)
//! ```
//!
//! The wait, the pointer, and the connection are all reached through traits
//! ([`Ticker`], [`PositionSource`], [`SampleChannel`]) so the loop runs
//! unchanged against fakes and paused tokio time in tests.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::application::position::{PositionError, PositionSource};

/// Paces the sampling loop.
#[async_trait]
pub trait Ticker: Send {
    /// Waits until the next sample is due.
    async fn tick(&mut self);
}

/// Error type for [`SampleChannel`] operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChannelError {
    /// The peer closed the connection, or it was reset.  A normal way for a
    /// session to end.
    #[error("connection closed by peer")]
    Closed,

    /// Any other transport failure.
    #[error("transport error: {0}")]
    Transport(String),
}

/// The outbound message channel of one session.
#[async_trait]
pub trait SampleChannel: Send {
    /// Sends one text message and waits until the transport has accepted it.
    ///
    /// # Errors
    ///
    /// [`ChannelError::Closed`] if the peer is gone, otherwise
    /// [`ChannelError::Transport`].
    async fn send_text(&mut self, text: String) -> Result<(), ChannelError>;

    /// Resolves once the peer has closed the connection.
    ///
    /// Must be cancel-safe: the session races it against the ticker and
    /// drops it whenever a tick wins.
    ///
    /// # Errors
    ///
    /// [`ChannelError::Transport`] if reading the inbound side fails for a
    /// reason other than a close.
    async fn closed(&mut self) -> Result<(), ChannelError>;
}

/// Error type for a session that ended abnormally.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("position source failed: {0}")]
    Position(#[from] PositionError),

    #[error("failed to encode sample: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("transport failed: {0}")]
    Transport(String),
}

/// Summary of a session that ended because the peer left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Number of samples the transport accepted.
    pub samples_sent: u64,
}

/// Runs one streaming session until the connection closes.
///
/// Display bounds are queried once, before the first sample.  The first tick
/// of a fresh [`Ticker`] is expected to complete immediately, so a client
/// receives its first sample right after connecting.
///
/// # Errors
///
/// - [`SessionError::Position`] if the position source fails.
/// - [`SessionError::Transport`] on a transport failure other than a close.
/// - [`SessionError::Encode`] if a sample cannot be serialized.
///
/// A peer close is not an error: it returns `Ok` with the session's stats.
///
/// The close check only runs between samples.  While `send_text` is blocked
/// on a peer that stopped reading, a close frame from that peer goes unseen
/// until the send fails or the TCP connection is torn down.
pub async fn run_session<T, C>(
    session_id: &str,
    source: &dyn PositionSource,
    ticker: &mut T,
    channel: &mut C,
) -> Result<SessionStats, SessionError>
where
    T: Ticker + ?Sized,
    C: SampleChannel + ?Sized,
{
    let bounds = source.display_size()?;
    debug!(
        "session {session_id}: display bounds {}x{}",
        bounds.width(),
        bounds.height()
    );

    let mut stats = SessionStats::default();

    loop {
        // A close must win over a due tick, otherwise one more sample would
        // be written to a closing connection.
        tokio::select! {
            biased;
            closed = channel.closed() => {
                return match closed {
                    Ok(()) | Err(ChannelError::Closed) => {
                        debug!("session {session_id}: peer closed while idle");
                        Ok(stats)
                    }
                    Err(ChannelError::Transport(e)) => Err(SessionError::Transport(e)),
                };
            }
            () = ticker.tick() => {}
        }

        let position = source.current_position()?;
        let text = bounds.normalize(position).to_json()?;

        match channel.send_text(text).await {
            Ok(()) => stats.samples_sent += 1,
            Err(ChannelError::Closed) => {
                debug!("session {session_id}: peer closed during send");
                return Ok(stats);
            }
            Err(ChannelError::Transport(e)) => return Err(SessionError::Transport(e)),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

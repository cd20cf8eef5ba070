//! WebSocket server: accept loop and per-session task management.
//!
//! This module is responsible for:
//!
//! 1. Binding a TCP listener on the configured address.
//! 2. Accepting incoming TCP connections.
//! 3. Upgrading each connection to a WebSocket session.
//! 4. Running one streaming session per connection in its own Tokio task.
//! 5. Stopping the accept loop when the `running` flag is cleared.
//!
//! # Scalability
//!
//! Sessions are independent: each one samples the shared position source on
//! its own schedule and writes only to its own socket.  A failing session is
//! logged and dropped; it never affects the accept loop or other sessions.
//! In-flight sessions are not drained on shutdown.

use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::{
    accept_async,
    tungstenite::{error::ProtocolError, Error as WsError, Message as WsMessage},
    WebSocketStream,
};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::application::{
    run_session, ChannelError, PositionSource, SampleChannel, SessionStats,
};
use crate::domain::StreamConfig;
use crate::infrastructure::ticker::IntervalTicker;

/// How long one `accept()` may block before the `running` flag is rechecked.
const ACCEPT_POLL: Duration = Duration::from_millis(200);

// ── Public API ────────────────────────────────────────────────────────────────

/// Binds `config.bind_addr` and serves sessions until `running` is cleared.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot be bound (e.g., the port is
/// already in use or the process lacks permission to bind).
pub async fn run_server(
    config: StreamConfig,
    source: Arc<dyn PositionSource>,
    running: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind WebSocket listener on {}", config.bind_addr))?;

    info!(
        "pointer stream listening on ws://{} at {} Hz",
        config.bind_addr,
        config.frequency_hz()
    );

    serve(listener, config, source, running).await;
    Ok(())
}

/// Runs the accept loop on an already bound listener.
///
/// Split out from [`run_server`] so tests can bind port 0 and learn the real
/// address before serving.
pub async fn serve(
    listener: TcpListener,
    config: StreamConfig,
    source: Arc<dyn PositionSource>,
    running: Arc<AtomicBool>,
) {
    let config = Arc::new(config);

    loop {
        if !running.load(Ordering::Relaxed) {
            info!("shutdown flag set; stopping accept loop");
            break;
        }

        match timeout(ACCEPT_POLL, listener.accept()).await {
            Ok(Ok((stream, peer_addr))) => {
                debug!("new connection from {peer_addr}");
                let cfg = Arc::clone(&config);
                let src = Arc::clone(&source);
                tokio::spawn(async move {
                    handle_connection(stream, peer_addr, cfg, src).await;
                });
            }
            Ok(Err(e)) => {
                // Transient accept error (e.g., too many open file descriptors).
                error!("accept error: {e}");
            }
            Err(_) => {}
        }
    }
}

// ── Per-session handler ───────────────────────────────────────────────────────

/// Top-level handler for one connection; logs how the session ended.
async fn handle_connection(
    raw_stream: TcpStream,
    peer_addr: SocketAddr,
    config: Arc<StreamConfig>,
    source: Arc<dyn PositionSource>,
) {
    let session_id = Uuid::new_v4().to_string();

    match run_connection(raw_stream, peer_addr, &session_id, &config, source).await {
        Ok(stats) => info!(
            "session {session_id} ({peer_addr}) closed by peer after {} samples",
            stats.samples_sent
        ),
        Err(e) => warn!("session {session_id} ({peer_addr}) ended with error: {e:#}"),
    }
}

/// Completes the WebSocket handshake and streams samples until the peer leaves.
///
/// # Errors
///
/// Returns an error if the handshake fails or the session ends abnormally.
async fn run_connection(
    raw_stream: TcpStream,
    peer_addr: SocketAddr,
    session_id: &str,
    config: &StreamConfig,
    source: Arc<dyn PositionSource>,
) -> anyhow::Result<SessionStats> {
    // Samples are tiny and latency-sensitive.
    if let Err(e) = raw_stream.set_nodelay(true) {
        debug!("session {session_id}: could not set TCP_NODELAY: {e}");
    }

    let ws_stream = accept_async(raw_stream)
        .await
        .with_context(|| format!("WebSocket handshake failed with {peer_addr}"))?;

    let mut channel = WsChannel::new(ws_stream, session_id);
    let mut ticker = IntervalTicker::new(config.sample_interval());

    info!(
        "session {session_id}: WebSocket session with {peer_addr}, sampling every {:?}",
        ticker.period()
    );

    let result = run_session(session_id, source.as_ref(), &mut ticker, &mut channel).await;
    channel.shutdown().await;

    Ok(result?)
}

// ── WebSocket channel ─────────────────────────────────────────────────────────

/// [`SampleChannel`] over a tokio-tungstenite WebSocket.
///
/// Inbound messages are read only to notice a close; their content is ignored.
pub struct WsChannel<S> {
    stream: WebSocketStream<S>,
    session_id: String,
}

impl<S> WsChannel<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    pub fn new(stream: WebSocketStream<S>, session_id: &str) -> Self {
        Self {
            stream,
            session_id: session_id.to_string(),
        }
    }

    /// Completes the closing handshake if the peer started one.  Errors are
    /// ignored: the peer may already be gone.
    pub async fn shutdown(&mut self) {
        if let Err(e) = self.stream.close(None).await {
            debug!("session {}: close handshake not completed: {e}", self.session_id);
        }
    }
}

#[async_trait]
impl<S> SampleChannel for WsChannel<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn send_text(&mut self, text: String) -> Result<(), ChannelError> {
        self.stream
            .send(WsMessage::Text(text))
            .await
            .map_err(|e| classify_ws_error(&e))
    }

    async fn closed(&mut self) -> Result<(), ChannelError> {
        loop {
            match self.stream.next().await {
                None => return Ok(()),
                Some(Ok(WsMessage::Close(frame))) => {
                    debug!("session {}: close frame received: {frame:?}", self.session_id);
                    return Ok(());
                }
                Some(Ok(msg)) => {
                    debug!(
                        "session {}: ignoring inbound message ({} bytes)",
                        self.session_id,
                        msg.len()
                    );
                }
                Some(Err(e)) => {
                    return match classify_ws_error(&e) {
                        ChannelError::Closed => Ok(()),
                        other => Err(other),
                    };
                }
            }
        }
    }
}

/// Sorts a tungstenite error into "peer went away" or "real transport fault".
pub fn classify_ws_error(err: &WsError) -> ChannelError {
    use std::io::ErrorKind;

    match err {
        WsError::ConnectionClosed | WsError::AlreadyClosed => ChannelError::Closed,
        WsError::Protocol(
            ProtocolError::ResetWithoutClosingHandshake | ProtocolError::SendAfterClosing,
        ) => ChannelError::Closed,
        WsError::Io(e)
            if matches!(
                e.kind(),
                ErrorKind::BrokenPipe
                    | ErrorKind::ConnectionReset
                    | ErrorKind::ConnectionAborted
                    | ErrorKind::UnexpectedEof
            ) =>
        {
            ChannelError::Closed
        }
        other => ChannelError::Transport(other.to_string()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! pointer-stream entry point.
//!
//! Streams the local pointer position to WebSocket clients.  Each connected
//! client receives `{"x":<f64>,"y":<f64>}` text messages, normalized to the
//! display size, at the configured frequency until it disconnects.
//!
//! # Usage
//!
//! ```text
//! pointer-stream [OPTIONS]
//!
//! Options:
//!   --config    <PATH>  TOML configuration file
//!   --bind      <IP>    Listener IP address [default: 127.0.0.1]
//!   --port      <PORT>  Listener port [default: 8765]
//!   --frequency <HZ>    Samples per second per client [default: 60]
//! ```
//!
//! # Configuration precedence
//!
//! CLI flag > environment variable > config file > built-in default.
//!
//! | Variable                      | Default     | Description              |
//! |-------------------------------|-------------|--------------------------|
//! | `POINTER_STREAM_BIND`         | `127.0.0.1` | Listener IP address      |
//! | `POINTER_STREAM_PORT`         | `8765`      | Listener port            |
//! | `POINTER_STREAM_FREQUENCY_HZ` | `60`        | Samples per second       |
//! | `POINTER_STREAM_CONFIG`       | (none)      | TOML configuration file  |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pointer_stream::application::PositionSource;
use pointer_stream::domain::StreamConfig;
use pointer_stream::infrastructure::config_file::ConfigFile;
use pointer_stream::infrastructure::{run_server, NativePositionSource};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Streams normalized pointer coordinates to WebSocket clients.
#[derive(Debug, Parser)]
#[command(
    name = "pointer-stream",
    about = "Streams normalized pointer coordinates to WebSocket clients",
    version
)]
struct Cli {
    /// TOML configuration file with a `[server]` table.
    #[arg(long, env = "POINTER_STREAM_CONFIG")]
    config: Option<PathBuf>,

    /// IP address to bind the WebSocket listener to (`localhost` is accepted).
    #[arg(long, env = "POINTER_STREAM_BIND")]
    bind: Option<String>,

    /// TCP port of the WebSocket listener.
    #[arg(long, env = "POINTER_STREAM_PORT")]
    port: Option<u16>,

    /// Samples sent per second to each client (1-1000).
    #[arg(long, env = "POINTER_STREAM_FREQUENCY_HZ")]
    frequency: Option<u32>,
}

impl Cli {
    /// Merges CLI/env values over the config file over the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded, the bind address
    /// is not an IP address, or the frequency is out of range.
    fn into_stream_config(self) -> anyhow::Result<StreamConfig> {
        let file = match &self.config {
            Some(path) => ConfigFile::load(path)
                .with_context(|| format!("failed to load config file {}", path.display()))?,
            None => ConfigFile::default(),
        };
        let defaults = StreamConfig::default();

        let bind = self.bind.or(file.server.bind);
        let ip = match bind.as_deref() {
            None => defaults.bind_addr.ip(),
            Some(text) => parse_bind_ip(text)?,
        };
        let port = self
            .port
            .or(file.server.port)
            .unwrap_or(defaults.bind_addr.port());
        let frequency_hz = self
            .frequency
            .or(file.server.frequency_hz)
            .unwrap_or(defaults.frequency_hz());

        Ok(StreamConfig::new(SocketAddr::new(ip, port), frequency_hz)?)
    }
}

fn parse_bind_ip(text: &str) -> anyhow::Result<IpAddr> {
    if text.eq_ignore_ascii_case("localhost") {
        return Ok(IpAddr::V4(Ipv4Addr::LOCALHOST));
    }
    text.parse::<IpAddr>()
        .with_context(|| format!("invalid bind address: '{text}'"))
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// 1. Logging is initialised from `RUST_LOG` (default `info`).
/// 2. CLI/env/file configuration is resolved into a [`StreamConfig`].
/// 3. The native pointer source is opened and the display size probed once;
///    a host without a usable display aborts here.
/// 4. A Ctrl+C handler clears the `running` flag.
/// 5. [`run_server`] accepts clients until the flag is cleared.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_stream_config()?;

    let source = NativePositionSource::new().context("failed to open the pointer source")?;
    let bounds = source
        .display_size()
        .context("failed to query the display size")?;

    info!(
        "pointer-stream starting: ws={}, frequency={} Hz, display={}x{}",
        config.bind_addr,
        config.frequency_hz(),
        bounds.width(),
        bounds.height()
    );

    let source: Arc<dyn PositionSource> = Arc::new(source);

    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C, stopping");
                running_clone.store(false, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::error!("failed to listen for Ctrl+C signal: {e}");
            }
        }
    });

    run_server(config, source, running).await?;

    info!("pointer-stream stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(bind: Option<&str>, port: Option<u16>, frequency: Option<u32>) -> Cli {
        Cli {
            config: None,
            bind: bind.map(str::to_string),
            port,
            frequency,
        }
    }

    fn temp_config(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "pointer-stream-main-{}.toml",
            uuid::Uuid::new_v4()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_cli_flags_are_parsed() {
        let cli = Cli::parse_from([
            "pointer-stream",
            "--bind",
            "0.0.0.0",
            "--port",
            "9999",
            "--frequency",
            "30",
        ]);
        assert_eq!(cli.bind.as_deref(), Some("0.0.0.0"));
        assert_eq!(cli.port, Some(9999));
        assert_eq!(cli.frequency, Some(30));
    }

    #[test]
    fn test_cli_rejects_non_numeric_port() {
        let result = Cli::try_parse_from(["pointer-stream", "--port", "http"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_into_stream_config_defaults() {
        // Arrange: nothing set anywhere
        let config = cli(None, None, None).into_stream_config().unwrap();

        // Assert
        assert_eq!(config, StreamConfig::default());
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8765");
        assert_eq!(config.frequency_hz(), 60);
    }

    #[test]
    fn test_into_stream_config_cli_values() {
        let config = cli(Some("0.0.0.0"), Some(8080), Some(120))
            .into_stream_config()
            .unwrap();
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.frequency_hz(), 120);
    }

    #[test]
    fn test_into_stream_config_accepts_localhost() {
        let config = cli(Some("localhost"), None, None)
            .into_stream_config()
            .unwrap();
        assert_eq!(config.bind_addr.ip(), IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn test_into_stream_config_accepts_ipv6() {
        let config = cli(Some("::1"), Some(9000), None)
            .into_stream_config()
            .unwrap();
        assert_eq!(config.bind_addr.to_string(), "[::1]:9000");
    }

    #[test]
    fn test_into_stream_config_invalid_bind_returns_error() {
        let result = cli(Some("not.an.ip"), None, None).into_stream_config();
        assert!(result.is_err());
    }

    #[test]
    fn test_into_stream_config_zero_frequency_returns_error() {
        let result = cli(None, None, Some(0)).into_stream_config();
        assert!(result.is_err());
    }

    #[test]
    fn test_into_stream_config_file_fills_unset_values() {
        // Arrange
        let path = temp_config("[server]\nport = 7000\nfrequency_hz = 10\n");
        let mut args = cli(None, None, None);
        args.config = Some(path.clone());

        // Act
        let config = args.into_stream_config();
        let _ = std::fs::remove_file(&path);

        // Assert
        let config = config.unwrap();
        assert_eq!(config.bind_addr.port(), 7000);
        assert_eq!(config.frequency_hz(), 10);
    }

    #[test]
    fn test_into_stream_config_cli_overrides_file() {
        let path = temp_config("[server]\nbind = \"0.0.0.0\"\nport = 7000\n");
        let mut args = cli(None, Some(7100), None);
        args.config = Some(path.clone());

        let config = args.into_stream_config();
        let _ = std::fs::remove_file(&path);

        let config = config.unwrap();
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:7100");
    }

    #[test]
    fn test_into_stream_config_missing_file_returns_error() {
        let mut args = cli(None, None, None);
        args.config = Some(PathBuf::from("/definitely/not/here.toml"));

        assert!(args.into_stream_config().is_err());
    }
}

//! Server configuration types.
//!
//! [`ServerConfig`] is the single source of truth for all runtime settings.
//! It is built once at startup from CLI arguments (see `main.rs`) or from
//! [`Default`], which reproduces the fixed constants the server has always
//! used, so running with no flags at all behaves exactly like the classic
//! deployment.
//!
//! Keeping configuration as a plain struct (no global state, no environment
//! reads inside the domain) makes every component easy to build in tests.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use deskcast_core::encoding::{EncodeError, EncodeSettings};
use thiserror::Error;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 5005;
/// Default capture cadence in frames per second.
pub const DEFAULT_FRAME_RATE: u32 = 30;
/// Default number of HTTP worker threads.
pub const DEFAULT_HTTP_WORKERS: usize = 4;
/// Default pause after a failed capture or encode.
pub const DEFAULT_CAPTURE_BACKOFF: Duration = Duration::from_millis(100);
/// Default pointer replay cadence (~60 Hz).
pub const DEFAULT_POINTER_REPLAY: Duration = Duration::from_millis(16);

/// Errors returned by [`ServerConfig::validate`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("frame rate must be at least 1 fps")]
    ZeroFrameRate,

    #[error("at least one HTTP worker thread is required")]
    ZeroWorkers,

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("invalid encoding settings: {0}")]
    Encoding(#[from] EncodeError),
}

/// All runtime configuration for the server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    ///
    /// `0.0.0.0` accepts connections from any interface.  There is no
    /// authentication, so bind to `127.0.0.1` on untrusted networks.
    pub bind_addr: SocketAddr,

    /// Target capture rate.  Best effort: a slow grab or encode lowers it.
    pub frame_rate: u32,

    /// Downscale factor and JPEG quality.
    pub encode: EncodeSettings,

    /// Size of the request-handling pool.
    ///
    /// Caps both the async worker threads and the blocking threads that run
    /// clicks and key presses, so at most this many synchronous input calls
    /// are in flight at once.
    pub http_workers: usize,

    /// Pause after a failed capture or encode before the next attempt.
    pub capture_backoff: Duration,

    /// How often the newest pending pointer move is replayed.
    pub pointer_replay_interval: Duration,
}

impl Default for ServerConfig {
    /// | Field                    | Default        |
    /// |--------------------------|----------------|
    /// | bind_addr                | `0.0.0.0:5005` |
    /// | frame_rate               | 30             |
    /// | encode.scale_factor      | 0.75           |
    /// | encode.jpeg_quality      | 30             |
    /// | http_workers             | 4              |
    /// | capture_backoff          | 100 ms         |
    /// | pointer_replay_interval  | 16 ms          |
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            frame_rate: DEFAULT_FRAME_RATE,
            encode: EncodeSettings::default(),
            http_workers: DEFAULT_HTTP_WORKERS,
            capture_backoff: DEFAULT_CAPTURE_BACKOFF,
            pointer_replay_interval: DEFAULT_POINTER_REPLAY,
        }
    }
}

impl ServerConfig {
    /// Minimum time between two captures, `1 / frame_rate`.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }

    /// Rejects settings the server cannot run with.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        if self.http_workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        if self.capture_backoff.is_zero() {
            return Err(ConfigError::ZeroDuration("capture backoff"));
        }
        if self.pointer_replay_interval.is_zero() {
            return Err(ConfigError::ZeroDuration("pointer replay interval"));
        }
        self.encode.validate()?;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

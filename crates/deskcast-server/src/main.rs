//! deskcast server: entry point.
//!
//! Captures the local display, serves it to browsers over HTTP, and replays
//! their pointer and keyboard input.
//!
//! # Usage
//!
//! ```text
//! deskcast-server [OPTIONS]
//!
//! Options:
//!   --bind <ADDR>                  Interface to listen on [default: 0.0.0.0]
//!   --port <PORT>                  HTTP port [default: 5005]
//!   --fps <FPS>                    Target capture rate [default: 30]
//!   --jpeg-quality <1-100>         JPEG quality [default: 30]
//!   --scale <FACTOR>               Downscale factor in (0, 1] [default: 0.75]
//!   --http-workers <N>             HTTP worker threads [default: 4]
//!   --capture-backoff-ms <MS>      Pause after a failed capture [default: 100]
//!   --pointer-interval-ms <MS>     Pointer replay cadence [default: 16]
//!   --log-level <FILTER>           Log filter when RUST_LOG is unset [default: info]
//!   --test-pattern                 Serve a synthetic pattern and only log input
//! ```
//!
//! # Environment variable overrides
//!
//! Every option can also be set through a `DESKCAST_*` variable (for example
//! `DESKCAST_PORT=8080`).  CLI args take precedence when both are present.
//! `RUST_LOG`, when set, takes precedence over `--log-level`.
//!
//! # Threads
//!
//! ```text
//! frame-producer   capture → encode → FrameStore, ~30 Hz
//! pointer-replay   PointerQueue → emulator, every 16 ms
//! deskcast-http    Tokio workers serving the HTTP API, plus at most
//!                  --http-workers blocking threads for clicks and keys
//! ```
//!
//! Ctrl+C clears a shared running flag; both loops and the HTTP server
//! notice it within a fraction of a second, and `main` joins everything
//! before exiting.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use deskcast_core::encoding::EncodeSettings;
use deskcast_core::FrameStore;
use deskcast_server::application::{
    ControlService, FrameProducer, InputCoalescer, PlatformInputEmulator, ScreenCapturer,
};
use deskcast_server::domain::ServerConfig;
use deskcast_server::infrastructure::input_emulation::LoggingInputEmulator;
use deskcast_server::infrastructure::screen_capture::TestPatternCapturer;
use deskcast_server::infrastructure::{run_server, AppState};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// deskcast: view and control this desktop from a browser.
#[derive(Debug, Parser)]
#[command(
    name = "deskcast-server",
    about = "Serves the local screen over HTTP and relays browser input",
    version
)]
struct Cli {
    /// IP address to bind the HTTP server to.
    ///
    /// There is no authentication; use `127.0.0.1` on untrusted networks.
    #[arg(long, default_value = "0.0.0.0", env = "DESKCAST_BIND")]
    bind: String,

    /// TCP port for the HTTP server.
    #[arg(long, default_value_t = 5005, env = "DESKCAST_PORT")]
    port: u16,

    /// Target capture rate in frames per second.
    #[arg(long, default_value_t = 30, env = "DESKCAST_FPS")]
    fps: u32,

    /// JPEG quality, 1 (smallest) to 100 (best).
    #[arg(long, default_value_t = 30, env = "DESKCAST_JPEG_QUALITY")]
    jpeg_quality: u8,

    /// Linear downscale factor applied before encoding.
    #[arg(long, default_value_t = 0.75, env = "DESKCAST_SCALE")]
    scale: f32,

    /// Number of HTTP worker threads.
    #[arg(long, default_value_t = 4, env = "DESKCAST_HTTP_WORKERS")]
    http_workers: usize,

    /// Pause in milliseconds after a failed capture before retrying.
    #[arg(long, default_value_t = 100, env = "DESKCAST_CAPTURE_BACKOFF_MS")]
    capture_backoff_ms: u64,

    /// Pointer replay cadence in milliseconds.
    #[arg(long, default_value_t = 16, env = "DESKCAST_POINTER_INTERVAL_MS")]
    pointer_interval_ms: u64,

    /// Log filter used when `RUST_LOG` is not set (e.g. `debug`,
    /// `deskcast_server=trace`).
    #[arg(long, default_value = "info", env = "DESKCAST_LOG_LEVEL")]
    log_level: String,

    /// Serve a moving test pattern and log input instead of touching the
    /// real display.
    #[arg(long, env = "DESKCAST_TEST_PATTERN")]
    test_pattern: bool,
}

impl Cli {
    /// Converts the parsed CLI arguments into a validated [`ServerConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if `--bind` is not an IP address or any value is out
    /// of range.
    fn into_server_config(self) -> anyhow::Result<ServerConfig> {
        let bind_addr: SocketAddr = format!("{}:{}", self.bind, self.port)
            .parse()
            .with_context(|| format!("invalid bind address: '{}:{}'", self.bind, self.port))?;

        let config = ServerConfig {
            bind_addr,
            frame_rate: self.fps,
            encode: EncodeSettings {
                scale_factor: self.scale,
                jpeg_quality: self.jpeg_quality,
            },
            http_workers: self.http_workers,
            capture_backoff: Duration::from_millis(self.capture_backoff_ms),
            pointer_replay_interval: Duration::from_millis(self.pointer_interval_ms),
        };
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

// ── Backends ──────────────────────────────────────────────────────────────────

type Backends = (Box<dyn ScreenCapturer>, Arc<dyn PlatformInputEmulator>);

/// Opens the native X11 backends unless `test_pattern` asks for the
/// synthetic ones.
fn open_backends(test_pattern: bool) -> anyhow::Result<Backends> {
    if test_pattern {
        info!("test pattern mode: the real display is neither captured nor driven");
        return Ok(synthetic_backends());
    }
    native_backends()
}

fn synthetic_backends() -> Backends {
    (
        Box::new(TestPatternCapturer::default()),
        Arc::new(LoggingInputEmulator::new()),
    )
}

#[cfg(all(feature = "x11", target_os = "linux"))]
fn native_backends() -> anyhow::Result<Backends> {
    use deskcast_server::infrastructure::input_emulation::XTestEmulator;
    use deskcast_server::infrastructure::screen_capture::X11Capturer;

    let capturer = X11Capturer::open().context("failed to open the X display for capture")?;
    let emulator = XTestEmulator::open().context("failed to initialise XTest input emulation")?;
    Ok((Box::new(capturer), Arc::new(emulator)))
}

#[cfg(not(all(feature = "x11", target_os = "linux")))]
fn native_backends() -> anyhow::Result<Backends> {
    tracing::warn!("built without the `x11` feature: serving a test pattern, input is logged only");
    Ok(synthetic_backends())
}

// ── HTTP runtime ──────────────────────────────────────────────────────────────

/// Builds the Tokio runtime serving HTTP.
///
/// Both pools are bounded by `http_workers`: the async workers that answer
/// requests and the blocking threads that run synchronous clicks and key
/// presses.
fn build_runtime(config: &ServerConfig) -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.http_workers)
        .max_blocking_threads(config.http_workers)
        .thread_name("deskcast-http")
        .enable_all()
        .build()
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// The Tokio runtime is built by hand instead of with `#[tokio::main]` so the
/// number of HTTP worker threads comes from the configuration.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ─────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let test_pattern = cli.test_pattern;
    let config = cli.into_server_config()?;
    info!(
        addr = %config.bind_addr,
        fps = config.frame_rate,
        scale = config.encode.scale_factor,
        quality = config.encode.jpeg_quality,
        "deskcast server starting"
    );

    // ── Shared state and background threads ───────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    let store = Arc::new(FrameStore::new());
    let (capturer, emulator) = open_backends(test_pattern)?;

    let input = Arc::new(
        InputCoalescer::new(emulator).with_interval(config.pointer_replay_interval),
    );
    let producer = FrameProducer::new(capturer, Arc::clone(&store), config.encode)
        .with_interval(config.frame_interval())
        .with_backoff(config.capture_backoff);

    let producer_thread = producer
        .spawn(Arc::clone(&running))
        .context("failed to spawn frame producer thread")?;
    let replay_thread = input
        .spawn(Arc::clone(&running))
        .context("failed to spawn pointer replay thread")?;

    // ── HTTP runtime ──────────────────────────────────────────────────────────
    let runtime = build_runtime(&config).context("failed to build the HTTP runtime")?;

    let state = AppState::new(store, ControlService::new(input));
    let result = runtime.block_on(async {
        let flag = Arc::clone(&running);
        // When Ctrl+C arrives the flag is cleared; every loop polls it.
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("received Ctrl+C, initiating graceful shutdown");
                    flag.store(false, Ordering::Relaxed);
                }
                Err(e) => error!("failed to listen for Ctrl+C signal: {e}"),
            }
        });
        run_server(config.bind_addr, state, Arc::clone(&running)).await
    });

    // Stop the background loops even when the server exited with an error.
    running.store(false, Ordering::Relaxed);
    for (name, handle) in [("frame producer", producer_thread), ("pointer replay", replay_thread)] {
        if handle.join().is_err() {
            error!("{name} thread panicked");
        }
    }

    info!("deskcast server stopped");
    result
}

// ── Tests ─────────────────────────────────────────────────────────────────────

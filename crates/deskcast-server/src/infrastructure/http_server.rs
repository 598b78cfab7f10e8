//! HTTP server: routes, handlers, and the serve loop.
//!
//! | Route            | Behaviour                                              |
//! |------------------|--------------------------------------------------------|
//! | `GET /screen`    | newest frame as `{"image": …}`, or 404 before the first |
//! | `POST /mouse`    | move (queued) or click (immediate); always `200 OK`    |
//! | `POST /keyboard` | key press (immediate); always `200 OK`                 |
//!
//! Every route carries a permissive CORS policy so a web client served from
//! another origin can poll and post freely.
//!
//! # Blocking calls
//!
//! Clicks and key presses are synchronous X11 round trips.  They run on
//! Tokio's blocking pool via `spawn_blocking` and the handler awaits them, so
//! the response is only sent once the input has been injected, while the
//! async worker threads stay free for `/screen` polls.  The binary caps that
//! pool at `ServerConfig::http_workers` threads; a burst beyond it queues
//! instead of growing the thread count.  Pointer moves only touch the
//! in-memory queue and are handled inline.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use deskcast_core::FrameStore;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

use crate::application::control::{ControlOutcome, ControlService, IgnoreReason};
use crate::domain::messages::{KeyboardRequest, MouseAction, MouseRequest, ScreenResponse};

/// Publish counter of the served frame, so a client can spot repeats and gaps.
pub const FRAME_SEQUENCE_HEADER: &str = "x-frame-sequence";

/// Body of every control response.
const OK_BODY: &str = "OK";

/// How often the shutdown watcher looks at the running flag.
const SHUTDOWN_POLL: Duration = Duration::from_millis(200);

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FrameStore>,
    pub control: ControlService,
}

impl AppState {
    pub fn new(store: Arc<FrameStore>, control: ControlService) -> Self {
        Self { store, control }
    }
}

/// Builds the router with all routes and the CORS layer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/screen", get(get_screen))
        .route("/mouse", post(post_mouse))
        .route("/keyboard", post(post_keyboard))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves the API on `addr` until `running` is cleared.
///
/// In-flight requests are allowed to finish before this returns.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound (port in use, missing
/// permission) or the server fails while accepting connections.
pub async fn run_server(
    addr: SocketAddr,
    state: AppState,
    running: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind HTTP listener on {addr}"))?;
    let local = listener
        .local_addr()
        .context("failed to read HTTP listener address")?;
    info!(addr = %local, "HTTP server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(wait_for_shutdown(running))
        .await
        .context("HTTP server terminated with an error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn wait_for_shutdown(running: Arc<AtomicBool>) {
    while running.load(Ordering::Relaxed) {
        tokio::time::sleep(SHUTDOWN_POLL).await;
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

async fn get_screen(State(state): State<AppState>) -> Response {
    let Some(published) = state.store.read() else {
        return (StatusCode::NOT_FOUND, "No frame available").into_response();
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    headers.insert(
        HeaderName::from_static(FRAME_SEQUENCE_HEADER),
        HeaderValue::from(published.sequence),
    );

    (
        headers,
        Json(ScreenResponse {
            image: published.frame.payload(),
        }),
    )
        .into_response()
}

async fn post_mouse(State(state): State<AppState>, body: Bytes) -> &'static str {
    let req: MouseRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            log_outcome("mouse", &malformed(e));
            return OK_BODY;
        }
    };

    let outcome = if req.action() == Some(MouseAction::Move) {
        state.control.handle_mouse(&req)
    } else {
        let control = state.control.clone();
        run_blocking(move || control.handle_mouse(&req)).await
    };
    log_outcome("mouse", &outcome);
    OK_BODY
}

async fn post_keyboard(State(state): State<AppState>, body: Bytes) -> &'static str {
    let req: KeyboardRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            log_outcome("keyboard", &malformed(e));
            return OK_BODY;
        }
    };

    let control = state.control.clone();
    let outcome = run_blocking(move || control.handle_keyboard(&req)).await;
    log_outcome("keyboard", &outcome);
    OK_BODY
}

// ── Helpers ───────────────────────────────────────────────────────────────────

async fn run_blocking<F>(f: F) -> ControlOutcome
where
    F: FnOnce() -> ControlOutcome + Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(outcome) => outcome,
        Err(e) => ControlOutcome::Ignored(IgnoreReason::EmulationFailed(format!(
            "input task failed: {e}"
        ))),
    }
}

fn malformed(e: serde_json::Error) -> ControlOutcome {
    ControlOutcome::Ignored(IgnoreReason::MalformedBody(e.to_string()))
}

fn log_outcome(route: &'static str, outcome: &ControlOutcome) {
    match outcome {
        ControlOutcome::Enqueued(event) => debug!(route, %event, "pointer move queued"),
        ControlOutcome::Clicked(click) => {
            debug!(route, button = %click.button, at = ?click.at, "click injected")
        }
        ControlOutcome::KeyPressed(cmd) => debug!(route, key = %cmd, "key injected"),
        ControlOutcome::Ignored(reason @ IgnoreReason::EmulationFailed(_)) => {
            warn!(route, %reason, "control request dropped")
        }
        ControlOutcome::Ignored(reason) => debug!(route, %reason, "control request ignored"),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

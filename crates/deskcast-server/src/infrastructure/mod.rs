//! Infrastructure layer for deskcast-server.
//!
//! Everything that touches the outside world lives here:
//!
//! - the axum HTTP server and its handlers;
//! - screen capture backends (X11 grab, synthetic test pattern, test mock);
//! - input emulation backends (XTest, logging sink, recording mock).
//!
//! Business rules (what a request means, how often to capture) stay in the
//! application layer; this layer only adapts them to real I/O.

pub mod http_server;
pub mod input_emulation;
pub mod screen_capture;

pub use http_server::{router, run_server, AppState};

//! deskcast-server library crate.
//!
//! Serves the local desktop to browsers over plain HTTP and relays their
//! pointer and keyboard commands back into the X session.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Browser (polls GET /screen, posts /mouse and /keyboard)
//!         ↕ HTTP/JSON
//! [deskcast-server]
//!   ├── domain/           ServerConfig, JSON request/response bodies
//!   ├── application/
//!   │     ├── produce_frames   capture → encode → FrameStore   (own thread)
//!   │     ├── coalesce_input   PointerQueue → replay every 16 ms (own thread)
//!   │     └── control          request body → move / click / key
//!   └── infrastructure/
//!         ├── http_server      axum routes, CORS, graceful shutdown
//!         ├── screen_capture   XGetImage, test pattern, mock
//!         └── input_emulation  XTest, logging sink, mock
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O and no threads.
//! - `application` depends on `domain` and `deskcast-core`, and talks to the
//!   OS only through the `ScreenCapturer` and `PlatformInputEmulator` traits.
//! - `infrastructure` implements those traits and owns the HTTP server.

/// Domain layer: configuration and message bodies (no I/O).
pub mod domain;

/// Application layer: frame production, input coalescing, request routing.
pub mod application;

/// Infrastructure layer: HTTP server and platform backends.
pub mod infrastructure;

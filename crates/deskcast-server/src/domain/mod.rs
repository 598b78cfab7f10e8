//! Domain layer for deskcast-server.
//!
//! Pure types with no dependencies on I/O, threads, or HTTP frameworks:
//!
//! - the JSON request and response bodies of the HTTP API;
//! - the server configuration and its validation rules.
//!
//! Anything that could block or fail because of external state (sockets,
//! the X server, environment variables) belongs in the outer layers.

pub mod config;
pub mod messages;

pub use config::{ConfigError, ServerConfig};
pub use messages::{KeyboardRequest, MouseAction, MouseRequest, ScreenResponse};

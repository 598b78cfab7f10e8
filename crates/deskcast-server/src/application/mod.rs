//! Application layer for deskcast-server.
//!
//! The application layer knows *what* to do and delegates *how* to the
//! infrastructure layer through two traits:
//!
//! - [`ScreenCapturer`] grabs the display for the [`FrameProducer`];
//! - [`PlatformInputEmulator`] injects input for the [`InputCoalescer`].
//!
//! Neither the producer nor the coalescer knows about HTTP; the
//! [`ControlService`] is the seam the HTTP handlers call into.

pub mod coalesce_input;
pub mod control;
pub mod produce_frames;

pub use coalesce_input::{EmulationError, InputCoalescer, PlatformInputEmulator};
pub use control::{ControlOutcome, ControlService, IgnoreReason};
pub use produce_frames::{CaptureError, FrameProducer, ProduceError, ScreenCapturer};

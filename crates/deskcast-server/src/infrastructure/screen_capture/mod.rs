//! Screen capture backends.
//!
//! The native X11 grabber is compiled only with the `x11` feature on Linux.
//! Every build has the synthetic test pattern and the test mock.

pub mod mock;
pub mod test_pattern;

#[cfg(all(feature = "x11", target_os = "linux"))]
pub mod x11_grab;

pub use test_pattern::TestPatternCapturer;

#[cfg(all(feature = "x11", target_os = "linux"))]
pub use x11_grab::X11Capturer;

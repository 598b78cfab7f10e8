//! Input emulation backends.
//!
//! The XTest emulator is compiled only with the `x11` feature on Linux.

pub mod logging;
pub mod mock;

#[cfg(all(feature = "x11", target_os = "linux"))]
pub mod xtest;

pub use logging::LoggingInputEmulator;

#[cfg(all(feature = "x11", target_os = "linux"))]
pub use xtest::XTestEmulator;

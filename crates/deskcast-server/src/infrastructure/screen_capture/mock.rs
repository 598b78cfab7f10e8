//! Mock screen capturer for unit and integration tests.
//!
//! Returns a fixed solid-colour frame (or an error) without touching any
//! display server, and counts every call so tests can assert on how often
//! the producer tried to capture.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use deskcast_core::{PixelLayout, RawFrame};

use crate::application::produce_frames::{CaptureError, ScreenCapturer};

/// A capturer that records attempts and returns a canned result.
pub struct MockScreenCapturer {
    frame: Option<RawFrame>,
    fail_first: usize,
    attempts: Arc<AtomicUsize>,
}

impl MockScreenCapturer {
    /// Always returns a `width` x `height` mid-grey BGRA frame.
    pub fn solid(width: u32, height: u32) -> Self {
        let data = vec![0x80; width as usize * height as usize * 4];
        Self::with_frame(RawFrame::packed(width, height, PixelLayout::Bgra8, data))
    }

    /// Always returns a clone of `frame`.
    pub fn with_frame(frame: RawFrame) -> Self {
        Self {
            frame: Some(frame),
            fail_first: 0,
            attempts: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Fails every capture.
    pub fn failing() -> Self {
        Self {
            frame: None,
            fail_first: 0,
            attempts: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Makes the first `n` captures fail before the canned frame is served.
    pub fn failing_first(mut self, n: usize) -> Self {
        self.fail_first = n;
        self
    }

    /// Shared counter of `capture` calls, readable after the capturer has
    /// been moved onto the producer thread.
    pub fn attempts(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.attempts)
    }
}

impl ScreenCapturer for MockScreenCapturer {
    fn capture(&mut self) -> Result<RawFrame, CaptureError> {
        let n = self.attempts.fetch_add(1, Ordering::Relaxed);
        if n < self.fail_first {
            return Err(CaptureError::Platform(format!("mock failure #{}", n + 1)));
        }
        self.frame
            .clone()
            .ok_or_else(|| CaptureError::DisplayUnavailable("mock display".into()))
    }
}

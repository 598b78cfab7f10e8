//! FrameProducer: the capture → encode → publish loop.
//!
//! The producer owns a [`ScreenCapturer`] and runs on its own OS thread.
//! Every cycle it grabs the display, pushes the pixels through
//! [`encode_frame`], and overwrites the shared [`FrameStore`].  HTTP handlers
//! never wait for it; they just read whatever frame is current.
//!
//! # Cadence
//!
//! Captures are spaced at least `interval` apart, measured from the *start*
//! of the previous successful cycle.  If a cycle takes longer than the
//! interval (a slow grab on a 4K screen, say) the next one starts right away,
//! so the effective rate degrades gracefully instead of queueing up work.
//!
//! # Failure handling
//!
//! A failed capture or encode is never fatal.  The error is logged, the
//! thread pauses for `backoff`, and the loop tries again, forever, until the
//! running flag is cleared.  Browsers keep seeing the last good frame
//! meanwhile.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use deskcast_core::encoding::{encode_frame, EncodeError, EncodeSettings, RawFrame};
use deskcast_core::pacing::{sleep_for, sleep_until};
use deskcast_core::FrameStore;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::domain::config::{DEFAULT_CAPTURE_BACKOFF, DEFAULT_FRAME_RATE};

/// Error type for screen capture backends.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The display could not be opened (no `DISPLAY`, X server gone, ...).
    #[error("display unavailable: {0}")]
    DisplayUnavailable(String),
    /// The backend returned an error for this particular grab.
    #[error("platform error: {0}")]
    Platform(String),
}

/// Anything that can go wrong in one producer cycle.
#[derive(Debug, Error)]
pub enum ProduceError {
    #[error("capture failed: {0}")]
    Capture(#[from] CaptureError),
    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),
}

/// Platform-agnostic screen grabber.
///
/// Implementations live in the infrastructure layer.  `capture` takes
/// `&mut self` because grabbers usually keep reusable buffers or a display
/// handle that must not be used from two threads at once.
pub trait ScreenCapturer: Send {
    /// Grabs the whole primary display.
    fn capture(&mut self) -> Result<RawFrame, CaptureError>;
}

impl<T: ScreenCapturer + ?Sized> ScreenCapturer for Box<T> {
    fn capture(&mut self) -> Result<RawFrame, CaptureError> {
        (**self).capture()
    }
}

/// The frame producer use case.
pub struct FrameProducer<C> {
    capturer: C,
    store: Arc<FrameStore>,
    settings: EncodeSettings,
    interval: Duration,
    backoff: Duration,
    last_capture: Option<Instant>,
}

impl<C: ScreenCapturer> FrameProducer<C> {
    /// Creates a producer with the default 30 fps cadence and 100 ms backoff.
    pub fn new(capturer: C, store: Arc<FrameStore>, settings: EncodeSettings) -> Self {
        Self {
            capturer,
            store,
            settings,
            interval: Duration::from_secs(1) / DEFAULT_FRAME_RATE,
            backoff: DEFAULT_CAPTURE_BACKOFF,
            last_capture: None,
        }
    }

    /// Sets the minimum spacing between two captures.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the pause after a failed cycle.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Start time of the most recent successful cycle.
    pub fn last_capture(&self) -> Option<Instant> {
        self.last_capture
    }

    /// Runs exactly one capture, encode and publish.
    ///
    /// Returns the sequence number the frame was published under.
    ///
    /// # Errors
    ///
    /// Returns [`ProduceError`] if the capture or the encode fails.  Nothing
    /// is published in that case.
    pub fn produce_once(&mut self) -> Result<u64, ProduceError> {
        let started = Instant::now();
        let raw = self.capturer.capture()?;
        let frame = encode_frame(&raw, &self.settings)?;
        let (width, height) = (frame.width(), frame.height());
        let bytes = frame.payload().len();

        let sequence = self.store.publish(frame);
        self.last_capture = Some(started);

        trace!(
            sequence,
            width,
            height,
            bytes,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "frame published"
        );
        Ok(sequence)
    }

    /// Runs the capture loop until `running` is cleared.
    pub fn run(&mut self, running: &AtomicBool) {
        info!(
            interval_ms = self.interval.as_millis() as u64,
            scale = self.settings.scale_factor,
            quality = self.settings.jpeg_quality,
            "frame producer started"
        );
        let mut failures: u64 = 0;

        while running.load(Ordering::Relaxed) {
            if let Some(last) = self.last_capture {
                let deadline = last + self.interval;
                if Instant::now() < deadline {
                    if !sleep_until(deadline, running) {
                        break;
                    }
                    continue;
                }
            }

            match self.produce_once() {
                Ok(_) => {
                    if failures > 0 {
                        info!(failures, "frame capture recovered");
                        failures = 0;
                    }
                }
                Err(e) => {
                    failures += 1;
                    // One warning per failure streak; the rest would flood the log
                    // at 10 lines per second.
                    if failures == 1 {
                        warn!(error = %e, "frame capture failed; retrying");
                    } else {
                        debug!(error = %e, failures, "frame capture still failing");
                    }
                    if !sleep_for(self.backoff, running) {
                        break;
                    }
                }
            }
        }

        info!(published = self.store.sequence(), "frame producer stopped");
    }
}

impl<C: ScreenCapturer + 'static> FrameProducer<C> {
    /// Moves the producer onto a named OS thread running [`run`](Self::run).
    ///
    /// # Errors
    ///
    /// Returns the OS error if the thread cannot be spawned.
    pub fn spawn(mut self, running: Arc<AtomicBool>) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("frame-producer".into())
            .spawn(move || self.run(&running))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::screen_capture::mock::MockScreenCapturer;
    use std::sync::atomic::AtomicUsize;

    fn store() -> Arc<FrameStore> {
        Arc::new(FrameStore::new())
    }

    #[test]
    fn test_produce_once_publishes_a_frame() {
        // Arrange
        let store = store();
        let capturer = MockScreenCapturer::solid(40, 20);
        let mut producer =
            FrameProducer::new(capturer, Arc::clone(&store), EncodeSettings::default());

        // Act
        let seq = producer.produce_once().unwrap();

        // Assert
        assert_eq!(seq, 1);
        let published = store.read().unwrap();
        assert_eq!((published.frame.width(), published.frame.height()), (30, 15));
        assert!(producer.last_capture().is_some());
    }

    #[test]
    fn test_failed_capture_publishes_nothing() {
        let store = store();
        let mut producer = FrameProducer::new(
            MockScreenCapturer::failing(),
            Arc::clone(&store),
            EncodeSettings::default(),
        );

        let result = producer.produce_once();

        assert!(matches!(result, Err(ProduceError::Capture(_))));
        assert!(store.read().is_none());
        assert!(producer.last_capture().is_none());
    }

    #[test]
    fn test_encode_failure_is_reported_as_encode_error() {
        let store = store();
        let mut producer = FrameProducer::new(
            MockScreenCapturer::solid(1, 1),
            Arc::clone(&store),
            EncodeSettings::default(),
        );

        // 1x1 scaled by 0.75 leaves no pixels
        assert!(matches!(
            producer.produce_once(),
            Err(ProduceError::Encode(EncodeError::ScaledToNothing { .. }))
        ));
    }

    #[test]
    fn test_always_failing_capturer_keeps_retrying() {
        // Arrange
        let capturer = MockScreenCapturer::failing();
        let attempts: Arc<AtomicUsize> = capturer.attempts();
        let running = Arc::new(AtomicBool::new(true));
        let producer = FrameProducer::new(capturer, store(), EncodeSettings::default())
            .with_backoff(Duration::from_millis(10));

        // Act
        let handle = producer.spawn(Arc::clone(&running)).unwrap();
        thread::sleep(Duration::from_millis(200));
        let alive = !handle.is_finished();
        running.store(false, Ordering::Relaxed);
        handle.join().unwrap();

        // Assert: the loop outlived many failures and only stopped when told to
        assert!(alive);
        assert!(attempts.load(Ordering::Relaxed) >= 5);
    }

    #[test]
    fn test_capture_rate_is_limited_by_interval() {
        // Arrange: 10 fps for ~250 ms allows at most 3-4 captures
        let capturer = MockScreenCapturer::solid(8, 8);
        let attempts = capturer.attempts();
        let running = Arc::new(AtomicBool::new(true));
        let store = store();
        let producer = FrameProducer::new(capturer, Arc::clone(&store), EncodeSettings::default())
            .with_interval(Duration::from_millis(100));

        // Act
        let handle = producer.spawn(Arc::clone(&running)).unwrap();
        thread::sleep(Duration::from_millis(250));
        running.store(false, Ordering::Relaxed);
        handle.join().unwrap();

        // Assert
        let n = attempts.load(Ordering::Relaxed);
        assert!((1..=4).contains(&n), "unexpected capture count {n}");
        assert_eq!(store.sequence() as usize, n);
    }

    #[test]
    fn test_recovers_after_transient_failures() {
        // Arrange: two failures, then good frames
        let capturer = MockScreenCapturer::solid(8, 8).failing_first(2);
        let running = Arc::new(AtomicBool::new(true));
        let store = store();
        let producer = FrameProducer::new(capturer, Arc::clone(&store), EncodeSettings::default())
            .with_interval(Duration::from_millis(5))
            .with_backoff(Duration::from_millis(5));

        // Act
        let handle = producer.spawn(Arc::clone(&running)).unwrap();
        thread::sleep(Duration::from_millis(150));
        running.store(false, Ordering::Relaxed);
        handle.join().unwrap();

        // Assert
        assert!(store.read().is_some());
    }

    #[test]
    fn test_run_returns_promptly_when_flag_is_cleared() {
        let running = AtomicBool::new(false);
        let mut producer = FrameProducer::new(
            MockScreenCapturer::solid(8, 8),
            store(),
            EncodeSettings::default(),
        );

        producer.run(&running);

        assert!(producer.last_capture().is_none());
    }
}

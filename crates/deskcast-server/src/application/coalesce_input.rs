//! InputCoalescer: collapses pointer moves and forwards commands to the OS.
//!
//! This use case sits at the application layer and delegates to a
//! [`PlatformInputEmulator`] trait object for OS-level event injection.
//! The platform-specific implementations are in the infrastructure layer.
//!
//! # Two paths
//!
//! ```text
//! POST /mouse move   → enqueue_move ─► PointerQueue ─► replay thread (16 ms) ─► emit_mouse_move
//! POST /mouse click  → click       ─────────────────────────────────────────► emit_click
//! POST /keyboard     → press_key   ─────────────────────────────────────────► emit_key_press
//! ```
//!
//! Moves are asynchronous and lossy: only the newest unconsumed position is
//! replayed.  Clicks and key presses are synchronous and never dropped.  There
//! is no ordering guarantee between a click and a move still sitting in the
//! queue.

use std::io;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use deskcast_core::keymap::HidKeyCode;
use deskcast_core::pacing::Ticker;
use deskcast_core::{ClickCommand, KeyCommand, PointerEvent, PointerQueue};
use thiserror::Error;
use tracing::{info, trace, warn};

use crate::domain::config::DEFAULT_POINTER_REPLAY;

/// Error type for input emulation operations.
#[derive(Debug, Error)]
pub enum EmulationError {
    #[error("platform error: {0}")]
    Platform(String),
    #[error("no native key for {0:?}")]
    InvalidKeyCode(HidKeyCode),
    #[error("emulator not initialized")]
    NotInitialized,
}

/// Platform-agnostic input emulation trait.
///
/// Each supported backend provides an implementation in the infrastructure
/// layer.  Methods take `&self` because the replay thread and the HTTP
/// handlers share one emulator.
pub trait PlatformInputEmulator: Send + Sync {
    /// Moves the cursor to an absolute position on the screen.
    fn emit_mouse_move(&self, x: i32, y: i32) -> Result<(), EmulationError>;

    /// Presses and releases a mouse button, first moving to `click.at` if set.
    fn emit_click(&self, click: ClickCommand) -> Result<(), EmulationError>;

    /// Presses and releases one key, holding Shift around it when
    /// `key.shift` is set.
    fn emit_key_press(&self, key: KeyCommand) -> Result<(), EmulationError>;
}

/// The input coalescing use case.
pub struct InputCoalescer {
    queue: PointerQueue,
    emulator: Arc<dyn PlatformInputEmulator>,
    interval: Duration,
}

impl InputCoalescer {
    /// Creates a coalescer replaying every 16 ms.
    pub fn new(emulator: Arc<dyn PlatformInputEmulator>) -> Self {
        Self {
            queue: PointerQueue::new(),
            emulator,
            interval: DEFAULT_POINTER_REPLAY,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Stores a move, replacing any move not yet replayed.
    ///
    /// Returns `true` if an unconsumed move was overwritten.
    pub fn enqueue_move(&self, x: i32, y: i32) -> bool {
        let event = PointerEvent::new(x, y);
        let replaced = self.queue.enqueue(event);
        if replaced {
            trace!(%event, "pending pointer move superseded");
        }
        replaced
    }

    /// Takes the pending move out of the queue.
    pub fn drain_latest(&self) -> Option<PointerEvent> {
        self.queue.drain_latest()
    }

    /// One replay tick: forwards the pending move, if any.
    ///
    /// # Errors
    ///
    /// Returns [`EmulationError`] if the OS rejects the move.  The move is
    /// consumed either way.
    pub fn replay_once(&self) -> Result<Option<PointerEvent>, EmulationError> {
        match self.queue.drain_latest() {
            Some(event) => {
                self.emulator.emit_mouse_move(event.x, event.y)?;
                Ok(Some(event))
            }
            None => Ok(None),
        }
    }

    /// Executes a click right away, on the caller's thread.
    ///
    /// # Errors
    ///
    /// Returns [`EmulationError`] if the OS event injection fails.
    pub fn click(&self, click: ClickCommand) -> Result<(), EmulationError> {
        self.emulator.emit_click(click)
    }

    /// Presses a key right away, on the caller's thread.
    ///
    /// # Errors
    ///
    /// Returns [`EmulationError`] if the OS event injection fails.
    pub fn press_key(&self, key: KeyCommand) -> Result<(), EmulationError> {
        self.emulator.emit_key_press(key)
    }

    /// Runs the replay loop until `running` is cleared.
    pub fn run(&self, running: &AtomicBool) {
        info!(
            interval_ms = self.interval.as_millis() as u64,
            "pointer replay started"
        );
        let mut ticker = Ticker::new(self.interval);
        while ticker.tick(running) {
            if let Err(e) = self.replay_once() {
                warn!(error = %e, "pointer move failed");
            }
        }
        info!("pointer replay stopped");
    }

    /// Runs [`run`](Self::run) on a named OS thread.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the thread cannot be spawned.
    pub fn spawn(self: &Arc<Self>, running: Arc<AtomicBool>) -> io::Result<JoinHandle<()>> {
        let this = Arc::clone(self);
        thread::Builder::new()
            .name("pointer-replay".into())
            .spawn(move || this.run(&running))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::input_emulation::mock::{MockInputEmulator, RecordedInput};
    use deskcast_core::MouseButton;
    use std::sync::atomic::Ordering;

    fn coalescer() -> (Arc<MockInputEmulator>, InputCoalescer) {
        let emulator = Arc::new(MockInputEmulator::new());
        let coalescer = InputCoalescer::new(Arc::clone(&emulator) as Arc<dyn PlatformInputEmulator>);
        (emulator, coalescer)
    }

    #[test]
    fn test_enqueue_then_drain_returns_latest_once() {
        // Arrange
        let (_, c) = coalescer();

        // Act
        c.enqueue_move(1, 1);
        c.enqueue_move(2, 2);

        // Assert
        assert_eq!(c.drain_latest(), Some(PointerEvent::new(2, 2)));
        assert_eq!(c.drain_latest(), None);
    }

    #[test]
    fn test_replay_once_forwards_single_move() {
        // Arrange
        let (emulator, c) = coalescer();
        c.enqueue_move(500, 300);

        // Act
        let replayed = c.replay_once().unwrap();

        // Assert
        assert_eq!(replayed, Some(PointerEvent::new(500, 300)));
        assert_eq!(emulator.events(), vec![RecordedInput::Move(500, 300)]);
    }

    #[test]
    fn test_two_moves_in_one_window_replay_only_the_later() {
        let (emulator, c) = coalescer();
        c.enqueue_move(10, 10);
        c.enqueue_move(20, 20);

        c.replay_once().unwrap();
        c.replay_once().unwrap();

        assert_eq!(emulator.events(), vec![RecordedInput::Move(20, 20)]);
    }

    #[test]
    fn test_replay_once_with_empty_queue_emits_nothing() {
        let (emulator, c) = coalescer();
        assert_eq!(c.replay_once().unwrap(), None);
        assert!(emulator.events().is_empty());
    }

    #[test]
    fn test_replay_error_still_consumes_move() {
        let emulator = Arc::new(MockInputEmulator::failing());
        let c = InputCoalescer::new(emulator);
        c.enqueue_move(1, 2);

        assert!(c.replay_once().is_err());
        assert_eq!(c.drain_latest(), None);
    }

    #[test]
    fn test_click_and_key_bypass_the_queue() {
        // Arrange
        let (emulator, c) = coalescer();
        c.enqueue_move(7, 7);

        // Act
        c.click(ClickCommand::at(MouseButton::Left, 1, 1)).unwrap();
        c.press_key(KeyCommand::shifted(HidKeyCode::KeyA)).unwrap();

        // Assert: both executed immediately, the move is still pending
        assert_eq!(
            emulator.events(),
            vec![
                RecordedInput::Click(ClickCommand::at(MouseButton::Left, 1, 1)),
                RecordedInput::KeyPress(KeyCommand::shifted(HidKeyCode::KeyA)),
            ]
        );
        assert_eq!(c.drain_latest(), Some(PointerEvent::new(7, 7)));
    }

    #[test]
    fn test_replay_thread_forwards_moves_and_stops() {
        // Arrange
        let (emulator, c) = coalescer();
        let c = Arc::new(c.with_interval(Duration::from_millis(5)));
        let running = Arc::new(AtomicBool::new(true));
        let handle = c.spawn(Arc::clone(&running)).unwrap();

        // Act
        c.enqueue_move(42, 24);
        thread::sleep(Duration::from_millis(60));
        running.store(false, Ordering::Relaxed);
        handle.join().unwrap();

        // Assert
        assert_eq!(emulator.events(), vec![RecordedInput::Move(42, 24)]);
    }

    #[test]
    fn test_replay_thread_survives_emulator_errors() {
        let emulator = Arc::new(MockInputEmulator::failing());
        let c = Arc::new(InputCoalescer::new(emulator).with_interval(Duration::from_millis(5)));
        let running = Arc::new(AtomicBool::new(true));
        let handle = c.spawn(Arc::clone(&running)).unwrap();

        c.enqueue_move(1, 1);
        thread::sleep(Duration::from_millis(30));
        let alive = !handle.is_finished();
        running.store(false, Ordering::Relaxed);
        handle.join().unwrap();

        assert!(alive);
    }
}

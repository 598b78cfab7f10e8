//! Mock platform input emulator for unit testing.
//!
//! # Why a mock emulator?
//!
//! The real XTest emulator moves the actual cursor and types into whatever
//! window has focus on the test machine, and needs a running X server.
//! `MockInputEmulator` replaces all OS calls with in-memory recording: each
//! emitted event is pushed into a `Mutex<Vec<RecordedInput>>` so assertions
//! can inspect exactly what was emitted and in what order.
//!
//! # Usage in tests
//!
//! ```ignore
//! let emulator = Arc::new(MockInputEmulator::new());
//! let input = InputCoalescer::new(Arc::clone(&emulator) as Arc<dyn PlatformInputEmulator>);
//!
//! input.enqueue_move(500, 300);
//! input.replay_once().unwrap();
//!
//! assert_eq!(emulator.events(), vec![RecordedInput::Move(500, 300)]);
//! ```
//!
//! # Failing mode
//!
//! [`MockInputEmulator::failing`] builds an emulator whose every method
//! returns `EmulationError::Platform`, to exercise error paths in callers.

use std::sync::{Mutex, PoisonError};

use deskcast_core::{ClickCommand, KeyCommand};

use crate::application::coalesce_input::{EmulationError, PlatformInputEmulator};

/// One call observed by the mock, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedInput {
    Move(i32, i32),
    Click(ClickCommand),
    KeyPress(KeyCommand),
}

/// A mock emulator that records all calls without performing OS API calls.
#[derive(Default)]
pub struct MockInputEmulator {
    events: Mutex<Vec<RecordedInput>>,
    /// When `true`, every method immediately returns an error and records nothing.
    pub should_fail: bool,
}

impl MockInputEmulator {
    /// Creates a recording emulator with `should_fail = false`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an emulator that rejects every call.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<RecordedInput> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, event: RecordedInput) -> Result<(), EmulationError> {
        if self.should_fail {
            return Err(EmulationError::Platform("mock failure".into()));
        }
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
        Ok(())
    }
}

impl PlatformInputEmulator for MockInputEmulator {
    fn emit_mouse_move(&self, x: i32, y: i32) -> Result<(), EmulationError> {
        self.record(RecordedInput::Move(x, y))
    }

    fn emit_click(&self, click: ClickCommand) -> Result<(), EmulationError> {
        self.record(RecordedInput::Click(click))
    }

    fn emit_key_press(&self, key: KeyCommand) -> Result<(), EmulationError> {
        self.record(RecordedInput::KeyPress(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskcast_core::{HidKeyCode, MouseButton};

    #[test]
    fn test_records_calls_in_order() {
        // Arrange
        let mock = MockInputEmulator::new();

        // Act
        mock.emit_mouse_move(1, 2).unwrap();
        mock.emit_click(ClickCommand::in_place(MouseButton::Middle))
            .unwrap();
        mock.emit_key_press(KeyCommand::new(HidKeyCode::Enter)).unwrap();

        // Assert
        assert_eq!(
            mock.events(),
            vec![
                RecordedInput::Move(1, 2),
                RecordedInput::Click(ClickCommand::in_place(MouseButton::Middle)),
                RecordedInput::KeyPress(KeyCommand::new(HidKeyCode::Enter)),
            ]
        );
    }

    #[test]
    fn test_failing_mock_records_nothing() {
        let mock = MockInputEmulator::failing();
        assert!(mock.emit_mouse_move(1, 1).is_err());
        assert!(mock.emit_key_press(KeyCommand::new(HidKeyCode::KeyA)).is_err());
        assert!(mock.events().is_empty());
    }
}

//! ControlService: turns HTTP control bodies into input commands.
//!
//! The HTTP contract for `/mouse` and `/keyboard` is "always 200 OK", so
//! nothing here returns an error to the caller.  Instead each request yields
//! a [`ControlOutcome`] that the handler logs; an unusable request becomes
//! [`ControlOutcome::Ignored`] with the reason attached.

use std::fmt;
use std::sync::Arc;

use deskcast_core::keymap::KeyMapper;
use deskcast_core::{ClickCommand, KeyCommand, MouseButton, PointerEvent};

use crate::application::coalesce_input::InputCoalescer;
use crate::domain::messages::{KeyboardRequest, MouseAction, MouseRequest};

/// What a control request ended up doing.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlOutcome {
    /// A pointer move was queued for the next replay tick.
    Enqueued(PointerEvent),
    /// A click was executed.
    Clicked(ClickCommand),
    /// A key was pressed.
    KeyPressed(KeyCommand),
    /// Nothing happened.
    Ignored(IgnoreReason),
}

/// Why a control request was a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The body was not JSON of the expected shape.
    MalformedBody(String),
    MissingAction,
    UnknownAction(String),
    /// A move without usable coordinates.
    MissingPosition,
    UnknownButton(String),
    MissingKey,
    UnknownKey(String),
    /// The command was valid but the OS rejected it.
    EmulationFailed(String),
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedBody(e) => write!(f, "malformed body: {e}"),
            Self::MissingAction => f.write_str("missing action"),
            Self::UnknownAction(a) => write!(f, "unknown action {a:?}"),
            Self::MissingPosition => f.write_str("missing or invalid coordinates"),
            Self::UnknownButton(b) => write!(f, "unknown button {b:?}"),
            Self::MissingKey => f.write_str("missing key"),
            Self::UnknownKey(k) => write!(f, "unknown key {k:?}"),
            Self::EmulationFailed(e) => write!(f, "emulation failed: {e}"),
        }
    }
}

/// Routes parsed control requests into the [`InputCoalescer`].
#[derive(Clone)]
pub struct ControlService {
    input: Arc<InputCoalescer>,
}

impl ControlService {
    pub fn new(input: Arc<InputCoalescer>) -> Self {
        Self { input }
    }

    pub fn input(&self) -> &Arc<InputCoalescer> {
        &self.input
    }

    /// Handles a `/mouse` body.
    ///
    /// Moves return immediately; clicks block until the emulator returns.
    pub fn handle_mouse(&self, req: &MouseRequest) -> ControlOutcome {
        let action = match req.action() {
            Some(action) => action,
            None => {
                return ControlOutcome::Ignored(match &req.action {
                    Some(a) => IgnoreReason::UnknownAction(a.clone()),
                    None => IgnoreReason::MissingAction,
                })
            }
        };

        match action {
            MouseAction::Move => match req.position() {
                Some((x, y)) => {
                    self.input.enqueue_move(x, y);
                    ControlOutcome::Enqueued(PointerEvent::new(x, y))
                }
                None => ControlOutcome::Ignored(IgnoreReason::MissingPosition),
            },
            MouseAction::Click => {
                let button = match req.button.as_deref() {
                    None => MouseButton::default(),
                    Some(name) => match MouseButton::from_name(name) {
                        Some(b) => b,
                        None => {
                            return ControlOutcome::Ignored(IgnoreReason::UnknownButton(
                                name.to_owned(),
                            ))
                        }
                    },
                };
                let click = match req.position() {
                    Some((x, y)) => ClickCommand::at(button, x, y),
                    None => ClickCommand::in_place(button),
                };
                match self.input.click(click) {
                    Ok(()) => ControlOutcome::Clicked(click),
                    Err(e) => ControlOutcome::Ignored(IgnoreReason::EmulationFailed(e.to_string())),
                }
            }
        }
    }

    /// Handles a `/keyboard` body.  Blocks until the emulator returns.
    pub fn handle_keyboard(&self, req: &KeyboardRequest) -> ControlOutcome {
        let Some(name) = req.key.as_deref() else {
            return ControlOutcome::Ignored(IgnoreReason::MissingKey);
        };
        let Some(cmd) = KeyMapper::key_name_to_command(name) else {
            return ControlOutcome::Ignored(IgnoreReason::UnknownKey(name.to_owned()));
        };
        match self.input.press_key(cmd) {
            Ok(()) => ControlOutcome::KeyPressed(cmd),
            Err(e) => ControlOutcome::Ignored(IgnoreReason::EmulationFailed(e.to_string())),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::coalesce_input::PlatformInputEmulator;
    use crate::infrastructure::input_emulation::mock::{MockInputEmulator, RecordedInput};
    use deskcast_core::HidKeyCode;

    fn service() -> (Arc<MockInputEmulator>, ControlService) {
        let emulator = Arc::new(MockInputEmulator::new());
        let input = Arc::new(InputCoalescer::new(
            Arc::clone(&emulator) as Arc<dyn PlatformInputEmulator>
        ));
        (emulator, ControlService::new(input))
    }

    #[test]
    fn test_move_is_enqueued_not_emitted() {
        // Arrange
        let (emulator, svc) = service();

        // Act
        let outcome = svc.handle_mouse(&MouseRequest::new("move", 500.0, 300.0));

        // Assert
        assert_eq!(outcome, ControlOutcome::Enqueued(PointerEvent::new(500, 300)));
        assert!(emulator.events().is_empty());
        assert_eq!(svc.input().drain_latest(), Some(PointerEvent::new(500, 300)));
    }

    #[test]
    fn test_click_defaults_to_left_button() {
        let (emulator, svc) = service();

        let outcome = svc.handle_mouse(&MouseRequest::new("click", 5.0, 6.0));

        let expected = ClickCommand::at(MouseButton::Left, 5, 6);
        assert_eq!(outcome, ControlOutcome::Clicked(expected));
        assert_eq!(emulator.events(), vec![RecordedInput::Click(expected)]);
    }

    #[test]
    fn test_click_with_right_button() {
        let (_, svc) = service();
        let req = MouseRequest {
            button: Some("right".into()),
            ..MouseRequest::new("click", 1.0, 1.0)
        };

        assert_eq!(
            svc.handle_mouse(&req),
            ControlOutcome::Clicked(ClickCommand::at(MouseButton::Right, 1, 1))
        );
    }

    #[test]
    fn test_click_without_coordinates_clicks_in_place() {
        let (emulator, svc) = service();
        let req = MouseRequest {
            action: Some("click".into()),
            ..MouseRequest::default()
        };

        svc.handle_mouse(&req);

        assert_eq!(
            emulator.events(),
            vec![RecordedInput::Click(ClickCommand::in_place(MouseButton::Left))]
        );
    }

    #[test]
    fn test_move_without_coordinates_is_ignored() {
        let (_, svc) = service();
        let req = MouseRequest {
            action: Some("move".into()),
            x: Some(3.0),
            ..MouseRequest::default()
        };

        assert_eq!(
            svc.handle_mouse(&req),
            ControlOutcome::Ignored(IgnoreReason::MissingPosition)
        );
        assert_eq!(svc.input().drain_latest(), None);
    }

    #[test]
    fn test_unknown_action_and_button_are_ignored() {
        let (emulator, svc) = service();
        let drag = MouseRequest::new("drag", 1.0, 1.0);
        let back = MouseRequest {
            button: Some("back".into()),
            ..MouseRequest::new("click", 1.0, 1.0)
        };

        assert_eq!(
            svc.handle_mouse(&drag),
            ControlOutcome::Ignored(IgnoreReason::UnknownAction("drag".into()))
        );
        assert_eq!(
            svc.handle_mouse(&back),
            ControlOutcome::Ignored(IgnoreReason::UnknownButton("back".into()))
        );
        assert_eq!(
            svc.handle_mouse(&MouseRequest::default()),
            ControlOutcome::Ignored(IgnoreReason::MissingAction)
        );
        assert!(emulator.events().is_empty());
    }

    #[test]
    fn test_key_press_resolves_name() {
        // Arrange
        let (emulator, svc) = service();

        // Act
        let outcome = svc.handle_keyboard(&KeyboardRequest::new("a"));

        // Assert
        assert_eq!(
            outcome,
            ControlOutcome::KeyPressed(KeyCommand::new(HidKeyCode::KeyA))
        );
        assert_eq!(
            emulator.events(),
            vec![RecordedInput::KeyPress(KeyCommand::new(HidKeyCode::KeyA))]
        );
    }

    #[test]
    fn test_uppercase_letter_is_pressed_with_shift() {
        let (emulator, svc) = service();

        let outcome = svc.handle_keyboard(&KeyboardRequest::new("A"));

        let expected = KeyCommand::shifted(HidKeyCode::KeyA);
        assert_eq!(outcome, ControlOutcome::KeyPressed(expected));
        assert_eq!(emulator.events(), vec![RecordedInput::KeyPress(expected)]);
    }

    #[test]
    fn test_shifted_symbols_are_pressed_on_their_base_key() {
        // Arrange
        let (emulator, svc) = service();

        // Act
        for name in ["!", "?", "@"] {
            svc.handle_keyboard(&KeyboardRequest::new(name));
        }

        // Assert
        assert_eq!(
            emulator.events(),
            vec![
                RecordedInput::KeyPress(KeyCommand::shifted(HidKeyCode::Digit1)),
                RecordedInput::KeyPress(KeyCommand::shifted(HidKeyCode::Slash)),
                RecordedInput::KeyPress(KeyCommand::shifted(HidKeyCode::Digit2)),
            ]
        );
    }

    #[test]
    fn test_missing_and_unknown_keys_are_ignored() {
        let (emulator, svc) = service();

        assert_eq!(
            svc.handle_keyboard(&KeyboardRequest::default()),
            ControlOutcome::Ignored(IgnoreReason::MissingKey)
        );
        assert_eq!(
            svc.handle_keyboard(&KeyboardRequest::new("hyper")),
            ControlOutcome::Ignored(IgnoreReason::UnknownKey("hyper".into()))
        );
        assert!(emulator.events().is_empty());
    }

    #[test]
    fn test_emulator_failure_is_reported_as_ignored() {
        let input = Arc::new(InputCoalescer::new(Arc::new(MockInputEmulator::failing())));
        let svc = ControlService::new(input);

        let outcome = svc.handle_keyboard(&KeyboardRequest::new("enter"));

        assert!(matches!(
            outcome,
            ControlOutcome::Ignored(IgnoreReason::EmulationFailed(_))
        ));
    }
}

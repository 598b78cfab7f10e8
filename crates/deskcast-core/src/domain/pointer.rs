//! Pointer and keyboard command types plus the single-slot pointer queue.
//!
//! Browsers fire `mousemove` far faster than a desktop needs to be told about
//! it.  Instead of buffering every event (and replaying a long backlog after a
//! network hiccup), [`PointerQueue`] keeps only the newest unconsumed move.
//! A replay loop drains it at a fixed cadence, so the cursor always jumps
//! straight to where the remote user's mouse is *now*.
//!
//! Clicks and key presses are never queued.  They are represented by
//! [`ClickCommand`] and [`KeyCommand`] and executed immediately by the caller.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use crate::keymap::HidKeyCode;

/// An absolute pointer position in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerEvent {
    pub x: i32,
    pub y: i32,
}

impl PointerEvent {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for PointerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Holds at most one unconsumed [`PointerEvent`].
///
/// A new [`enqueue`](Self::enqueue) overwrites whatever has not been drained
/// yet; stale positions are discarded, never merged.
#[derive(Debug, Default)]
pub struct PointerQueue {
    slot: Mutex<Option<PointerEvent>>,
}

impl PointerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `event`, replacing any unconsumed prior event.
    ///
    /// Returns `true` when an earlier event was overwritten before anyone
    /// drained it.
    pub fn enqueue(&self, event: PointerEvent) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(event)
            .is_some()
    }

    /// Removes and returns the pending event, leaving the slot empty.
    pub fn drain_latest(&self) -> Option<PointerEvent> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}

// ── Buttons and one-shot commands ─────────────────────────────────────────────

/// Mouse button that can be clicked remotely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Parses a browser-supplied button name (`"left"`, `"right"`, `"middle"`),
    /// ignoring ASCII case and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("left") {
            Some(Self::Left)
        } else if name.eq_ignore_ascii_case("right") {
            Some(Self::Right)
        } else if name.eq_ignore_ascii_case("middle") {
            Some(Self::Middle)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Middle => "middle",
        }
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single press-and-release of a mouse button.
///
/// `at = None` clicks wherever the pointer currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickCommand {
    pub button: MouseButton,
    pub at: Option<PointerEvent>,
}

impl ClickCommand {
    pub fn at(button: MouseButton, x: i32, y: i32) -> Self {
        Self {
            button,
            at: Some(PointerEvent::new(x, y)),
        }
    }

    pub fn in_place(button: MouseButton) -> Self {
        Self { button, at: None }
    }
}

/// A single press-and-release of one key, optionally with Shift held.
///
/// `shift` is how `"A"` and `"!"` reach the desktop: the backend presses
/// Shift, then the key, then releases both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCommand {
    pub key: HidKeyCode,
    pub shift: bool,
}

impl KeyCommand {
    pub fn new(key: HidKeyCode) -> Self {
        Self { key, shift: false }
    }

    pub fn shifted(key: HidKeyCode) -> Self {
        Self { key, shift: true }
    }
}

impl fmt::Display for KeyCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shift {
            write!(f, "Shift+{:?}", self.key)
        } else {
            write!(f, "{:?}", self.key)
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

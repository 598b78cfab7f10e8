//! JSON bodies of the browser-facing HTTP API.
//!
//! ```text
//! GET  /screen    → {"image": "<base64 JPEG>"}
//! POST /mouse     ← {"action": "move"|"click", "x": 500, "y": 300, "button": "left"}
//! POST /keyboard  ← {"key": "enter"}
//! ```
//!
//! # Leniency
//!
//! The control endpoints never reject a request: a body that is missing a
//! field or carries a field of the wrong type is simply a no-op.  To make that
//! possible every request field is an `Option` with `#[serde(default)]`, and
//! interpretation (is this a move? which button?) happens in the application
//! layer where an unusable request turns into an `Ignored` outcome instead of
//! an HTTP error.

use serde::{Deserialize, Serialize};

// ── Requests ──────────────────────────────────────────────────────────────────

/// Body of `POST /mouse`.
///
/// Coordinates are JSON numbers.  Browsers compute them from scaled canvas
/// positions and frequently send fractions, so they are accepted as `f64` and
/// rounded to the nearest pixel.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MouseRequest {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub button: Option<String>,
}

/// The two things a mouse request can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    Move,
    Click,
}

impl MouseRequest {
    /// Convenience constructor used by tests and tooling.
    pub fn new(action: &str, x: f64, y: f64) -> Self {
        Self {
            action: Some(action.to_owned()),
            x: Some(x),
            y: Some(y),
            button: None,
        }
    }

    /// Parses the `action` field (case-insensitive).
    pub fn action(&self) -> Option<MouseAction> {
        let action = self.action.as_deref()?.trim();
        if action.eq_ignore_ascii_case("move") {
            Some(MouseAction::Move)
        } else if action.eq_ignore_ascii_case("click") {
            Some(MouseAction::Click)
        } else {
            None
        }
    }

    /// Target position rounded to whole pixels.
    ///
    /// `None` when either coordinate is missing, not finite, or outside the
    /// `i32` range.
    pub fn position(&self) -> Option<(i32, i32)> {
        Some((to_pixel(self.x?)?, to_pixel(self.y?)?))
    }
}

fn to_pixel(v: f64) -> Option<i32> {
    let r = v.round();
    if r.is_finite() && r >= f64::from(i32::MIN) && r <= f64::from(i32::MAX) {
        Some(r as i32)
    } else {
        None
    }
}

/// Body of `POST /keyboard`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct KeyboardRequest {
    #[serde(default)]
    pub key: Option<String>,
}

impl KeyboardRequest {
    pub fn new(key: &str) -> Self {
        Self {
            key: Some(key.to_owned()),
        }
    }
}

// ── Responses ─────────────────────────────────────────────────────────────────

/// Body of a successful `GET /screen`.
///
/// Borrows the payload so a frame is never copied just to be serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScreenResponse<'a> {
    pub image: &'a str,
}

// ── Tests ─────────────────────────────────────────────────────────────────────

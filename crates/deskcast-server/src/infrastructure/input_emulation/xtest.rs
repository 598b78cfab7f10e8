//! Linux X11 input emulation via the XTest extension.
//!
//! Uses `XTestFakeMotionEvent`, `XTestFakeButtonEvent` and
//! `XTestFakeKeyEvent` to inject input into the X11 session.
//!
//! # What is XTest? (for beginners)
//!
//! XTest is an X11 protocol extension that lets a process synthesize keyboard
//! and mouse events as if the user had physically interacted with the
//! hardware.  The receiving application cannot tell them apart from real
//! input.
//!
//! # Key code translation
//!
//! `XTestFakeKeyEvent` takes an X11 *keycode* (a server-specific scan code),
//! not a KeySym, so a key press goes through two lookups:
//!
//! ```text
//! HID Usage ID → X11 KeySym → XKeysymToKeycode(display, keysym) → X11 keycode
//! ```
//!
//! A shifted command (`"A"`, `"!"`) presses `Shift_L`, then the key, then
//! releases the key and `Shift_L`, all before the flush.
//!
//! # Thread safety
//!
//! The replay thread and the HTTP blocking pool both emit events.  Xlib
//! connections must not be used concurrently, so the display pointer lives in
//! a `Mutex` and each call holds it for its press/release pair plus `XFlush`.

use std::ptr::{self, NonNull};
use std::sync::{Mutex, PoisonError};

use ::x11::{xlib, xtest};
use deskcast_core::keymap::KeyMapper;
use deskcast_core::{ClickCommand, HidKeyCode, KeyCommand, MouseButton};
use tracing::info;

use crate::application::coalesce_input::{EmulationError, PlatformInputEmulator};

/// `CurrentTime`: let the server timestamp the synthesized event.
const CURRENT_TIME: xlib::Time = 0;

/// `-1` as the screen number means "the screen the pointer is on".
const SCREEN_DEFAULT: i32 = -1;

struct Display(NonNull<xlib::Display>);

// SAFETY: the pointer is only dereferenced while the owning Mutex is held.
unsafe impl Send for Display {}

/// Linux X11/XTest input emulator.
pub struct XTestEmulator {
    display: Mutex<Display>,
}

impl XTestEmulator {
    /// Connects to the X display and checks that XTest is available.
    ///
    /// # Errors
    ///
    /// Returns [`EmulationError::NotInitialized`] if the display cannot be
    /// opened, or [`EmulationError::Platform`] if the server lacks XTest.
    pub fn open() -> Result<Self, EmulationError> {
        // SAFETY: a null name means "use $DISPLAY"; the result is checked below.
        let raw = unsafe { xlib::XOpenDisplay(ptr::null()) };
        let display = NonNull::new(raw).ok_or(EmulationError::NotInitialized)?;

        let (mut event_base, mut error_base, mut major, mut minor) = (0, 0, 0, 0);
        // SAFETY: display is live; the out-parameters are valid i32 slots.
        let has_xtest = unsafe {
            xtest::XTestQueryExtension(
                display.as_ptr(),
                &mut event_base,
                &mut error_base,
                &mut major,
                &mut minor,
            )
        };
        if has_xtest == 0 {
            // SAFETY: closing the connection we just opened.
            unsafe { xlib::XCloseDisplay(display.as_ptr()) };
            return Err(EmulationError::Platform(
                "X server does not support the XTest extension".into(),
            ));
        }

        info!(major, minor, "XTest input emulation ready");
        Ok(Self {
            display: Mutex::new(Display(display)),
        })
    }

    fn with_display<T>(&self, f: impl FnOnce(*mut xlib::Display) -> T) -> T {
        let guard = self.display.lock().unwrap_or_else(PoisonError::into_inner);
        let out = f(guard.0.as_ptr());
        // SAFETY: still holding the lock; flush so the events are sent now.
        unsafe { xlib::XFlush(guard.0.as_ptr()) };
        out
    }
}

fn x_button(button: MouseButton) -> u32 {
    // X11 numbering: 1 = left, 2 = middle, 3 = right
    match button {
        MouseButton::Left => 1,
        MouseButton::Middle => 2,
        MouseButton::Right => 3,
    }
}

impl PlatformInputEmulator for XTestEmulator {
    fn emit_mouse_move(&self, x: i32, y: i32) -> Result<(), EmulationError> {
        self.with_display(|d| {
            // SAFETY: `d` is a live display guarded by the mutex.
            unsafe { xtest::XTestFakeMotionEvent(d, SCREEN_DEFAULT, x, y, CURRENT_TIME) }
        });
        Ok(())
    }

    fn emit_click(&self, click: ClickCommand) -> Result<(), EmulationError> {
        let button = x_button(click.button);
        self.with_display(|d| {
            // SAFETY: `d` is a live display guarded by the mutex.
            unsafe {
                if let Some(at) = click.at {
                    xtest::XTestFakeMotionEvent(d, SCREEN_DEFAULT, at.x, at.y, CURRENT_TIME);
                }
                xtest::XTestFakeButtonEvent(d, button, xlib::True, CURRENT_TIME);
                xtest::XTestFakeButtonEvent(d, button, xlib::False, CURRENT_TIME);
            }
        });
        Ok(())
    }

    fn emit_key_press(&self, key: KeyCommand) -> Result<(), EmulationError> {
        self.with_display(|d| {
            let keycode = keycode_for(d, key.key)?;
            let shift = if key.shift {
                Some(keycode_for(d, HidKeyCode::ShiftLeft)?)
            } else {
                None
            };
            for (code, pressed) in key_events(keycode, shift) {
                let is_press = if pressed { xlib::True } else { xlib::False };
                // SAFETY: `d` is a live display guarded by the mutex.
                unsafe { xtest::XTestFakeKeyEvent(d, code, is_press, CURRENT_TIME) };
            }
            Ok(())
        })
    }
}

/// Press/release order for one key, wrapped in `shift` when given.
fn key_events(keycode: u32, shift: Option<u32>) -> Vec<(u32, bool)> {
    match shift {
        Some(shift) => vec![(shift, true), (keycode, true), (keycode, false), (shift, false)],
        None => vec![(keycode, true), (keycode, false)],
    }
}

/// Resolves `key` to the server keycode under the active keyboard layout.
fn keycode_for(d: *mut xlib::Display, key: HidKeyCode) -> Result<u32, EmulationError> {
    let keysym = KeyMapper::hid_to_x11_keysym(key);
    // SAFETY: callers pass a live display while holding its mutex.
    let keycode = unsafe { xlib::XKeysymToKeycode(d, xlib::KeySym::from(keysym)) };
    if keycode == 0 {
        // The active keyboard layout has no key producing this symbol.
        return Err(EmulationError::InvalidKeyCode(key));
    }
    Ok(u32::from(keycode))
}

impl Drop for XTestEmulator {
    fn drop(&mut self) {
        let display = self.display.get_mut().unwrap_or_else(PoisonError::into_inner);
        // SAFETY: opened in `open`, closed only here.
        unsafe {
            xlib::XCloseDisplay(display.0.as_ptr());
        }
    }
}

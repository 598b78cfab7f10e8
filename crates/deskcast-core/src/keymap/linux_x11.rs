//! HID key code to X11 KeySym table, used by the XTest input backend.
//!
//! KeySym values come from `X11/keysymdef.h`. XTest does not take KeySyms
//! directly; the backend resolves each KeySym to the server's keycode with
//! `XKeysymToKeycode` before faking the press.
//!
//! Letters map to their lowercase KeySym. A shifted command holds the key for
//! `ShiftLeft` around the press, so `KeyA` with Shift types `A`.

use super::hid::HidKeyCode;

/// Translates a [`HidKeyCode`] to an X11 KeySym value.
pub fn hid_to_keysym(hid: HidKeyCode) -> u32 {
    match hid {
        // Letters (X11 lowercase keysyms 0x61-0x7A)
        HidKeyCode::KeyA => 0x0061, // XK_a
        HidKeyCode::KeyB => 0x0062, // XK_b
        HidKeyCode::KeyC => 0x0063, // XK_c
        HidKeyCode::KeyD => 0x0064, // XK_d
        HidKeyCode::KeyE => 0x0065, // XK_e
        HidKeyCode::KeyF => 0x0066, // XK_f
        HidKeyCode::KeyG => 0x0067, // XK_g
        HidKeyCode::KeyH => 0x0068, // XK_h
        HidKeyCode::KeyI => 0x0069, // XK_i
        HidKeyCode::KeyJ => 0x006A, // XK_j
        HidKeyCode::KeyK => 0x006B, // XK_k
        HidKeyCode::KeyL => 0x006C, // XK_l
        HidKeyCode::KeyM => 0x006D, // XK_m
        HidKeyCode::KeyN => 0x006E, // XK_n
        HidKeyCode::KeyO => 0x006F, // XK_o
        HidKeyCode::KeyP => 0x0070, // XK_p
        HidKeyCode::KeyQ => 0x0071, // XK_q
        HidKeyCode::KeyR => 0x0072, // XK_r
        HidKeyCode::KeyS => 0x0073, // XK_s
        HidKeyCode::KeyT => 0x0074, // XK_t
        HidKeyCode::KeyU => 0x0075, // XK_u
        HidKeyCode::KeyV => 0x0076, // XK_v
        HidKeyCode::KeyW => 0x0077, // XK_w
        HidKeyCode::KeyX => 0x0078, // XK_x
        HidKeyCode::KeyY => 0x0079, // XK_y
        HidKeyCode::KeyZ => 0x007A, // XK_z

        // Digits (X11 0x30-0x39)
        HidKeyCode::Digit0 => 0x0030, // XK_0
        HidKeyCode::Digit1 => 0x0031, // XK_1
        HidKeyCode::Digit2 => 0x0032, // XK_2
        HidKeyCode::Digit3 => 0x0033, // XK_3
        HidKeyCode::Digit4 => 0x0034, // XK_4
        HidKeyCode::Digit5 => 0x0035, // XK_5
        HidKeyCode::Digit6 => 0x0036, // XK_6
        HidKeyCode::Digit7 => 0x0037, // XK_7
        HidKeyCode::Digit8 => 0x0038, // XK_8
        HidKeyCode::Digit9 => 0x0039, // XK_9

        // Control keys
        HidKeyCode::Enter => 0xFF0D,       // XK_Return
        HidKeyCode::Escape => 0xFF1B,      // XK_Escape
        HidKeyCode::Backspace => 0xFF08,   // XK_BackSpace
        HidKeyCode::Tab => 0xFF09,         // XK_Tab
        HidKeyCode::Space => 0x0020,       // XK_space
        HidKeyCode::CapsLock => 0xFFE5,    // XK_Caps_Lock
        HidKeyCode::ScrollLock => 0xFF14,  // XK_Scroll_Lock
        HidKeyCode::Pause => 0xFF13,       // XK_Pause
        HidKeyCode::Insert => 0xFF63,      // XK_Insert
        HidKeyCode::Home => 0xFF50,        // XK_Home
        HidKeyCode::PageUp => 0xFF55,      // XK_Page_Up
        HidKeyCode::Delete => 0xFFFF,      // XK_Delete
        HidKeyCode::End => 0xFF57,         // XK_End
        HidKeyCode::PageDown => 0xFF56,    // XK_Page_Down
        HidKeyCode::PrintScreen => 0xFF61, // XK_Print
        HidKeyCode::ContextMenu => 0xFF67, // XK_Menu

        // Arrow keys
        HidKeyCode::ArrowLeft => 0xFF51,  // XK_Left
        HidKeyCode::ArrowUp => 0xFF52,    // XK_Up
        HidKeyCode::ArrowRight => 0xFF53, // XK_Right
        HidKeyCode::ArrowDown => 0xFF54,  // XK_Down

        // Function keys
        HidKeyCode::F1 => 0xFFBE,  // XK_F1
        HidKeyCode::F2 => 0xFFBF,  // XK_F2
        HidKeyCode::F3 => 0xFFC0,  // XK_F3
        HidKeyCode::F4 => 0xFFC1,  // XK_F4
        HidKeyCode::F5 => 0xFFC2,  // XK_F5
        HidKeyCode::F6 => 0xFFC3,  // XK_F6
        HidKeyCode::F7 => 0xFFC4,  // XK_F7
        HidKeyCode::F8 => 0xFFC5,  // XK_F8
        HidKeyCode::F9 => 0xFFC6,  // XK_F9
        HidKeyCode::F10 => 0xFFC7, // XK_F10
        HidKeyCode::F11 => 0xFFC8, // XK_F11
        HidKeyCode::F12 => 0xFFC9, // XK_F12

        // Numpad
        HidKeyCode::NumLock => 0xFF7F,      // XK_Num_Lock
        HidKeyCode::NumpadDivide => 0xFFAF, // XK_KP_Divide
        HidKeyCode::NumpadMultiply => 0xFFAA, // XK_KP_Multiply
        HidKeyCode::NumpadSubtract => 0xFFAD, // XK_KP_Subtract
        HidKeyCode::NumpadAdd => 0xFFAB,    // XK_KP_Add
        HidKeyCode::Numpad0 => 0xFFB0,      // XK_KP_0
        HidKeyCode::Numpad1 => 0xFFB1,      // XK_KP_1
        HidKeyCode::Numpad2 => 0xFFB2,      // XK_KP_2
        HidKeyCode::Numpad3 => 0xFFB3,      // XK_KP_3
        HidKeyCode::Numpad4 => 0xFFB4,      // XK_KP_4
        HidKeyCode::Numpad5 => 0xFFB5,      // XK_KP_5
        HidKeyCode::Numpad6 => 0xFFB6,      // XK_KP_6
        HidKeyCode::Numpad7 => 0xFFB7,      // XK_KP_7
        HidKeyCode::Numpad8 => 0xFFB8,      // XK_KP_8
        HidKeyCode::Numpad9 => 0xFFB9,      // XK_KP_9
        HidKeyCode::NumpadDecimal => 0xFFAE, // XK_KP_Decimal

        // Punctuation / symbols
        HidKeyCode::Minus => 0x002D,        // XK_minus
        HidKeyCode::Equal => 0x003D,        // XK_equal
        HidKeyCode::BracketLeft => 0x005B,  // XK_bracketleft
        HidKeyCode::BracketRight => 0x005D, // XK_bracketright
        HidKeyCode::Backslash => 0x005C,    // XK_backslash
        HidKeyCode::Semicolon => 0x003B,    // XK_semicolon
        HidKeyCode::Quote => 0x0027,        // XK_apostrophe
        HidKeyCode::Backquote => 0x0060,    // XK_grave
        HidKeyCode::Comma => 0x002C,        // XK_comma
        HidKeyCode::Period => 0x002E,       // XK_period
        HidKeyCode::Slash => 0x002F,        // XK_slash

        // Modifier keys
        HidKeyCode::ControlLeft => 0xFFE3, // XK_Control_L
        HidKeyCode::ControlRight => 0xFFE4, // XK_Control_R
        HidKeyCode::ShiftLeft => 0xFFE1,   // XK_Shift_L
        HidKeyCode::ShiftRight => 0xFFE2,  // XK_Shift_R
        HidKeyCode::AltLeft => 0xFFE9,     // XK_Alt_L
        HidKeyCode::AltRight => 0xFFEA,    // XK_Alt_R
        HidKeyCode::MetaLeft => 0xFFEB,    // XK_Super_L
        HidKeyCode::MetaRight => 0xFFEC,   // XK_Super_R
    }
}

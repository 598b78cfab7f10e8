//! Key code translation for keyboard commands.
//!
//! The canonical representation is USB HID Usage IDs (page 0x07, Keyboard/Keypad).
//! Client key names are resolved to a [`KeyCommand`] on the request path; input
//! backends translate its HID code to their native codes at the emulation
//! boundary.

pub mod hid;
pub mod linux_x11;

pub use hid::{HidKeyCode, KEY_NAMES, SHIFTED_CHARS};

use crate::domain::pointer::KeyCommand;

/// Unified key mapper providing all translation directions.
pub struct KeyMapper;

impl KeyMapper {
    /// Resolves a client key name (`"enter"`, `"a"`, `"A"`, `"!"`) to the
    /// key to press and whether Shift must be held.
    ///
    /// A single uppercase letter or a symbol from [`SHIFTED_CHARS`] yields a
    /// shifted command; everything else goes through
    /// [`HidKeyCode::from_key_name`] unshifted.
    ///
    /// Returns `None` if the name is not recognised.
    pub fn key_name_to_command(name: &str) -> Option<KeyCommand> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_uppercase() {
                return HidKeyCode::from_key_name(name).map(KeyCommand::shifted);
            }
            if let Some(key) = HidKeyCode::from_shifted_char(c) {
                return Some(KeyCommand::shifted(key));
            }
        }
        HidKeyCode::from_key_name(name).map(KeyCommand::new)
    }

    /// Translates a [`HidKeyCode`] to an X11 KeySym value for the XTest backend.
    pub fn hid_to_x11_keysym(hid: HidKeyCode) -> u32 {
        linux_x11::hid_to_keysym(hid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_name_to_x11_keysym_chain() {
        // Arrange: the full path a keyboard command takes on Linux.
        let cmd = KeyMapper::key_name_to_command("backspace").unwrap();

        // Act
        let keysym = KeyMapper::hid_to_x11_keysym(cmd.key);

        // Assert: XK_BackSpace
        assert_eq!(keysym, 0xFF08);
        assert!(!cmd.shift);
    }

    #[test]
    fn test_unknown_name_short_circuits() {
        assert!(KeyMapper::key_name_to_command("not-a-key").is_none());
    }

    #[test]
    fn test_lowercase_letter_is_unshifted() {
        assert_eq!(
            KeyMapper::key_name_to_command("a"),
            Some(KeyCommand::new(HidKeyCode::KeyA))
        );
    }

    #[test]
    fn test_uppercase_letter_holds_shift() {
        assert_eq!(
            KeyMapper::key_name_to_command("A"),
            Some(KeyCommand::shifted(HidKeyCode::KeyA))
        );
    }

    #[test]
    fn test_shifted_symbols_hold_shift_on_their_base_key() {
        let cases = [
            ("!", HidKeyCode::Digit1),
            ("@", HidKeyCode::Digit2),
            ("?", HidKeyCode::Slash),
            ("_", HidKeyCode::Minus),
            ("\"", HidKeyCode::Quote),
        ];
        for (name, key) in cases {
            assert_eq!(
                KeyMapper::key_name_to_command(name),
                Some(KeyCommand::shifted(key)),
                "{name:?}"
            );
        }
    }

    #[test]
    fn test_multi_char_names_are_never_shifted() {
        // "ENTER" is a case-insensitive name, not a shifted letter.
        assert_eq!(
            KeyMapper::key_name_to_command("ENTER"),
            Some(KeyCommand::new(HidKeyCode::Enter))
        );
        assert_eq!(
            KeyMapper::key_name_to_command("F5"),
            Some(KeyCommand::new(HidKeyCode::F5))
        );
    }
}

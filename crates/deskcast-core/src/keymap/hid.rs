//! USB HID Usage IDs (page 0x07, Keyboard/Keypad page) and key-name lookup.
//!
//! HID codes are the platform-neutral key identity inside deskcast. Browser
//! clients send key *names* (`"enter"`, `"a"`, `"f5"`); [`HidKeyCode::from_key_name`]
//! resolves those names once on the request path, and each input backend
//! translates the HID code to its native code (X11 KeySym, ...).
//!
//! # Key names
//!
//! Names follow the vocabulary of the pyautogui `press()` function, so
//! existing web clients keep working unchanged:
//!
//! | Names                                  | Key            |
//! |----------------------------------------|----------------|
//! | `a` .. `z`, `0` .. `9`                 | letters/digits |
//! | `enter`, `return`                      | Enter          |
//! | `esc`, `escape`                        | Escape         |
//! | `space`, `" "`                         | Space          |
//! | `pageup`, `pgup`, `pagedown`, `pgdn`   | paging keys    |
//! | `ctrl`, `shift`, `alt`, `win`, ...     | modifiers      |
//! | `num0` .. `num9`, `add`, `divide`, ... | numpad keys    |
//!
//! Lookup is case-insensitive: `"A"` resolves to the same physical key as
//! `"a"`. Whether Shift is held is decided one level up, by
//! [`KeyMapper::key_name_to_command`](super::KeyMapper::key_name_to_command),
//! which also accepts the shifted symbols in [`SHIFTED_CHARS`].

/// USB HID Usage ID for keyboard keys (page 0x07).
///
/// The numeric value of each variant is its HID Usage ID on the keyboard/keypad page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum HidKeyCode {
    // Letters (HID 0x04–0x1D)
    KeyA = 0x04,
    KeyB = 0x05,
    KeyC = 0x06,
    KeyD = 0x07,
    KeyE = 0x08,
    KeyF = 0x09,
    KeyG = 0x0A,
    KeyH = 0x0B,
    KeyI = 0x0C,
    KeyJ = 0x0D,
    KeyK = 0x0E,
    KeyL = 0x0F,
    KeyM = 0x10,
    KeyN = 0x11,
    KeyO = 0x12,
    KeyP = 0x13,
    KeyQ = 0x14,
    KeyR = 0x15,
    KeyS = 0x16,
    KeyT = 0x17,
    KeyU = 0x18,
    KeyV = 0x19,
    KeyW = 0x1A,
    KeyX = 0x1B,
    KeyY = 0x1C,
    KeyZ = 0x1D,

    // Digits (HID 0x1E–0x27)
    Digit1 = 0x1E,
    Digit2 = 0x1F,
    Digit3 = 0x20,
    Digit4 = 0x21,
    Digit5 = 0x22,
    Digit6 = 0x23,
    Digit7 = 0x24,
    Digit8 = 0x25,
    Digit9 = 0x26,
    Digit0 = 0x27,

    // Control keys (HID 0x28–0x38)
    Enter = 0x28,
    Escape = 0x29,
    Backspace = 0x2A,
    Tab = 0x2B,
    Space = 0x2C,
    Minus = 0x2D,
    Equal = 0x2E,
    BracketLeft = 0x2F,
    BracketRight = 0x30,
    Backslash = 0x31,
    Semicolon = 0x33,
    Quote = 0x34,
    Backquote = 0x35,
    Comma = 0x36,
    Period = 0x37,
    Slash = 0x38,

    // Lock keys
    CapsLock = 0x39,

    // Function keys (HID 0x3A–0x45)
    F1 = 0x3A,
    F2 = 0x3B,
    F3 = 0x3C,
    F4 = 0x3D,
    F5 = 0x3E,
    F6 = 0x3F,
    F7 = 0x40,
    F8 = 0x41,
    F9 = 0x42,
    F10 = 0x43,
    F11 = 0x44,
    F12 = 0x45,

    // Navigation cluster (HID 0x46–0x52)
    PrintScreen = 0x46,
    ScrollLock = 0x47,
    Pause = 0x48,
    Insert = 0x49,
    Home = 0x4A,
    PageUp = 0x4B,
    Delete = 0x4C,
    End = 0x4D,
    PageDown = 0x4E,
    ArrowRight = 0x4F,
    ArrowLeft = 0x50,
    ArrowDown = 0x51,
    ArrowUp = 0x52,

    // Numpad (HID 0x53–0x63)
    NumLock = 0x53,
    NumpadDivide = 0x54,
    NumpadMultiply = 0x55,
    NumpadSubtract = 0x56,
    NumpadAdd = 0x57,
    Numpad1 = 0x59,
    Numpad2 = 0x5A,
    Numpad3 = 0x5B,
    Numpad4 = 0x5C,
    Numpad5 = 0x5D,
    Numpad6 = 0x5E,
    Numpad7 = 0x5F,
    Numpad8 = 0x60,
    Numpad9 = 0x61,
    Numpad0 = 0x62,
    NumpadDecimal = 0x63,

    // Application key (HID 0x65)
    ContextMenu = 0x65,

    // Modifier keys (HID 0xE0–0xE7)
    ControlLeft = 0xE0,
    ShiftLeft = 0xE1,
    AltLeft = 0xE2,
    MetaLeft = 0xE3,
    ControlRight = 0xE4,
    ShiftRight = 0xE5,
    AltRight = 0xE6,
    MetaRight = 0xE7,
}

/// Every key name accepted by [`HidKeyCode::from_key_name`], in canonical
/// lowercase form. Aliases map to the same key as their canonical name.
pub const KEY_NAMES: &[&str] = &[
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r",
    "s", "t", "u", "v", "w", "x", "y", "z", "0", "1", "2", "3", "4", "5", "6", "7", "8", "9",
    "enter", "return", "esc", "escape", "backspace", "tab", "space", " ", "-", "=", "[", "]",
    "\\", ";", "'", "`", ",", ".", "/", "capslock", "f1", "f2", "f3", "f4", "f5", "f6", "f7",
    "f8", "f9", "f10", "f11", "f12", "printscreen", "prtsc", "scrolllock", "pause", "insert",
    "home", "pageup", "pgup", "delete", "del", "end", "pagedown", "pgdn", "right", "left",
    "down", "up", "numlock", "num0", "num1", "num2", "num3", "num4", "num5", "num6", "num7",
    "num8", "num9", "add", "subtract", "multiply", "divide", "decimal", "apps", "ctrl", "ctrlleft", "ctrlright", "shift", "shiftleft",
    "shiftright", "alt", "altleft", "altright", "win", "winleft", "winright", "command",
];

/// Symbols typed with Shift held on a US layout, each resolving to the
/// unshifted key that carries it (`'!'` is Shift + `1`).
pub const SHIFTED_CHARS: &str = "!@#$%^&*()_+{}|:\"<>?~";

impl HidKeyCode {
    /// Resolves a client-supplied key name to a [`HidKeyCode`].
    ///
    /// Returns `None` when the name is not part of the supported vocabulary
    /// (see [`KEY_NAMES`]).
    pub fn from_key_name(name: &str) -> Option<Self> {
        // A lone space is a valid name and must survive trimming-free lookup.
        if name == " " {
            return Some(HidKeyCode::Space);
        }
        let lower = name.to_ascii_lowercase();

        // Single characters: letters, digits, punctuation.
        let mut chars = lower.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::from_char(c);
        }

        let key = match lower.as_str() {
            "enter" | "return" => HidKeyCode::Enter,
            "esc" | "escape" => HidKeyCode::Escape,
            "backspace" => HidKeyCode::Backspace,
            "tab" => HidKeyCode::Tab,
            "space" => HidKeyCode::Space,
            "capslock" => HidKeyCode::CapsLock,
            "f1" => HidKeyCode::F1,
            "f2" => HidKeyCode::F2,
            "f3" => HidKeyCode::F3,
            "f4" => HidKeyCode::F4,
            "f5" => HidKeyCode::F5,
            "f6" => HidKeyCode::F6,
            "f7" => HidKeyCode::F7,
            "f8" => HidKeyCode::F8,
            "f9" => HidKeyCode::F9,
            "f10" => HidKeyCode::F10,
            "f11" => HidKeyCode::F11,
            "f12" => HidKeyCode::F12,
            "printscreen" | "prtsc" => HidKeyCode::PrintScreen,
            "scrolllock" => HidKeyCode::ScrollLock,
            "pause" => HidKeyCode::Pause,
            "insert" => HidKeyCode::Insert,
            "home" => HidKeyCode::Home,
            "pageup" | "pgup" => HidKeyCode::PageUp,
            "delete" | "del" => HidKeyCode::Delete,
            "end" => HidKeyCode::End,
            "pagedown" | "pgdn" => HidKeyCode::PageDown,
            "right" => HidKeyCode::ArrowRight,
            "left" => HidKeyCode::ArrowLeft,
            "down" => HidKeyCode::ArrowDown,
            "up" => HidKeyCode::ArrowUp,
            "numlock" => HidKeyCode::NumLock,
            "num0" => HidKeyCode::Numpad0,
            "num1" => HidKeyCode::Numpad1,
            "num2" => HidKeyCode::Numpad2,
            "num3" => HidKeyCode::Numpad3,
            "num4" => HidKeyCode::Numpad4,
            "num5" => HidKeyCode::Numpad5,
            "num6" => HidKeyCode::Numpad6,
            "num7" => HidKeyCode::Numpad7,
            "num8" => HidKeyCode::Numpad8,
            "num9" => HidKeyCode::Numpad9,
            "add" => HidKeyCode::NumpadAdd,
            "subtract" => HidKeyCode::NumpadSubtract,
            "multiply" => HidKeyCode::NumpadMultiply,
            "divide" => HidKeyCode::NumpadDivide,
            "decimal" => HidKeyCode::NumpadDecimal,
            "apps" => HidKeyCode::ContextMenu,
            "ctrl" | "ctrlleft" => HidKeyCode::ControlLeft,
            "ctrlright" => HidKeyCode::ControlRight,
            "shift" | "shiftleft" => HidKeyCode::ShiftLeft,
            "shiftright" => HidKeyCode::ShiftRight,
            "alt" | "altleft" => HidKeyCode::AltLeft,
            "altright" => HidKeyCode::AltRight,
            "win" | "winleft" | "command" => HidKeyCode::MetaLeft,
            "winright" => HidKeyCode::MetaRight,
            _ => return None,
        };
        Some(key)
    }

    /// Maps a single lowercase character to its key.
    fn from_char(c: char) -> Option<Self> {
        const LETTERS: [HidKeyCode; 26] = [
            HidKeyCode::KeyA, HidKeyCode::KeyB, HidKeyCode::KeyC, HidKeyCode::KeyD,
            HidKeyCode::KeyE, HidKeyCode::KeyF, HidKeyCode::KeyG, HidKeyCode::KeyH,
            HidKeyCode::KeyI, HidKeyCode::KeyJ, HidKeyCode::KeyK, HidKeyCode::KeyL,
            HidKeyCode::KeyM, HidKeyCode::KeyN, HidKeyCode::KeyO, HidKeyCode::KeyP,
            HidKeyCode::KeyQ, HidKeyCode::KeyR, HidKeyCode::KeyS, HidKeyCode::KeyT,
            HidKeyCode::KeyU, HidKeyCode::KeyV, HidKeyCode::KeyW, HidKeyCode::KeyX,
            HidKeyCode::KeyY, HidKeyCode::KeyZ,
        ];
        const DIGITS: [HidKeyCode; 10] = [
            HidKeyCode::Digit0, HidKeyCode::Digit1, HidKeyCode::Digit2, HidKeyCode::Digit3,
            HidKeyCode::Digit4, HidKeyCode::Digit5, HidKeyCode::Digit6, HidKeyCode::Digit7,
            HidKeyCode::Digit8, HidKeyCode::Digit9,
        ];

        let key = match c {
            'a'..='z' => LETTERS[(c as u8 - b'a') as usize],
            '0'..='9' => DIGITS[(c as u8 - b'0') as usize],
            ' ' => HidKeyCode::Space,
            '-' => HidKeyCode::Minus,
            '=' => HidKeyCode::Equal,
            '[' => HidKeyCode::BracketLeft,
            ']' => HidKeyCode::BracketRight,
            '\\' => HidKeyCode::Backslash,
            ';' => HidKeyCode::Semicolon,
            '\'' => HidKeyCode::Quote,
            '`' => HidKeyCode::Backquote,
            ',' => HidKeyCode::Comma,
            '.' => HidKeyCode::Period,
            '/' => HidKeyCode::Slash,
            '\n' => HidKeyCode::Enter,
            '\t' => HidKeyCode::Tab,
            _ => return None,
        };
        Some(key)
    }

    /// Maps a symbol from [`SHIFTED_CHARS`] to the key that produces it
    /// when Shift is held.
    pub fn from_shifted_char(c: char) -> Option<Self> {
        let key = match c {
            '!' => HidKeyCode::Digit1,
            '@' => HidKeyCode::Digit2,
            '#' => HidKeyCode::Digit3,
            '$' => HidKeyCode::Digit4,
            '%' => HidKeyCode::Digit5,
            '^' => HidKeyCode::Digit6,
            '&' => HidKeyCode::Digit7,
            '*' => HidKeyCode::Digit8,
            '(' => HidKeyCode::Digit9,
            ')' => HidKeyCode::Digit0,
            '_' => HidKeyCode::Minus,
            '+' => HidKeyCode::Equal,
            '{' => HidKeyCode::BracketLeft,
            '}' => HidKeyCode::BracketRight,
            '|' => HidKeyCode::Backslash,
            ':' => HidKeyCode::Semicolon,
            '"' => HidKeyCode::Quote,
            '<' => HidKeyCode::Comma,
            '>' => HidKeyCode::Period,
            '?' => HidKeyCode::Slash,
            '~' => HidKeyCode::Backquote,
            _ => return None,
        };
        Some(key)
    }
}

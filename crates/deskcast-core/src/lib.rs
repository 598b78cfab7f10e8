//! # deskcast-core
//!
//! Shared library for deskcast containing the frame and pointer slots, the
//! frame encoding pipeline, key-name translation tables, and the cancellable
//! pacing helpers used by the background loops.
//!
//! It has zero dependencies on OS APIs, HTTP frameworks, or network sockets.
//!
//! # Architecture overview (for beginners)
//!
//! deskcast lets a browser watch and drive a desktop over plain HTTP.  One
//! thread keeps grabbing the screen and publishing a small JPEG; browsers poll
//! for the newest one.  Pointer moves from the browser are coalesced so only
//! the latest position is replayed, while clicks and key presses go straight
//! through.
//!
//! This crate is the platform-free foundation:
//!
//! - **`domain`** – The latest-wins [`FrameStore`] and the single-slot
//!   [`PointerQueue`], plus the click and key command values.
//!
//! - **`encoding`** – Turns a raw BGRA/RGBA capture into a downscaled,
//!   base64-encoded JPEG [`Frame`].
//!
//! - **`keymap`** – Resolves key names such as `"enter"` to USB HID usage
//!   codes and translates those to X11 KeySyms.
//!
//! - **`pacing`** – [`Ticker`] and bounded sleeps that notice a cleared
//!   running flag quickly.

pub mod domain;
pub mod encoding;
pub mod keymap;
pub mod pacing;

pub use domain::frame::{Frame, FrameStore, PublishedFrame};
pub use domain::pointer::{ClickCommand, KeyCommand, MouseButton, PointerEvent, PointerQueue};
pub use encoding::{encode_frame, EncodeError, EncodeSettings, PixelLayout, RawFrame};
pub use keymap::hid::HidKeyCode;
pub use pacing::Ticker;

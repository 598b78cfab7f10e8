//! Latest-wins frame slot shared between the capture thread and HTTP readers.
//!
//! The capture thread publishes one encoded [`Frame`] per cycle; any number of
//! polling clients read whatever frame is current at the moment they ask.
//! There is no queue and no history: a slow reader simply skips frames.
//!
//! # Locking discipline (for beginners)
//!
//! The slot is a `Mutex<Option<PublishedFrame>>`, but the lock is only ever
//! held for a pointer-sized swap or an `Arc` clone.  Capture, resize and JPEG
//! encoding all happen *before* [`FrameStore::publish`] is called, so a reader
//! can never be stuck behind an encode, and the producer can never be stuck
//! behind a reader that is writing a large HTTP response.
//!
//! ```text
//! capture thread                      HTTP handlers
//! ──────────────                      ─────────────
//! capture → resize → JPEG → base64
//!           publish(frame) ──┐
//!                            ├─ lock, swap, unlock
//!                            │
//!                            ├─ lock, clone Arc, unlock ── read()
//!                            └─ lock, clone Arc, unlock ── read()
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// One compressed screen snapshot ready for transport.
///
/// The payload is the base64 text of a JPEG image.  It is reference counted,
/// so cloning a `Frame` never copies the image data.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    payload: Arc<str>,
    width: u32,
    height: u32,
}

impl Frame {
    /// Wraps an encoded payload together with the pixel dimensions it decodes to.
    pub fn new(payload: impl Into<Arc<str>>, width: u32, height: u32) -> Self {
        Self {
            payload: payload.into(),
            width,
            height,
        }
    }

    /// The transport-safe (base64) encoded image.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Width in pixels of the encoded image.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels of the encoded image.
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl fmt::Debug for Frame {
    // Payloads are hundreds of kilobytes; never dump them into logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("payload_len", &self.payload.len())
            .finish()
    }
}

/// A frame together with the publish sequence number it was stored under.
///
/// Sequence numbers start at 1 and increase by exactly one per publish, so a
/// client that sees `5` and then `8` knows it skipped two frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedFrame {
    /// Publish counter value for this frame (first publish is 1).
    pub sequence: u64,
    /// The frame itself.
    pub frame: Frame,
}

#[derive(Debug, Default)]
struct Slot {
    sequence: u64,
    current: Option<PublishedFrame>,
}

/// Concurrency-safe single-slot frame holder.
///
/// Cardinality is at most one: every [`publish`](Self::publish) replaces the
/// previous frame, and [`read`](Self::read) returns the freshest value or
/// `None` before the first publish.
#[derive(Debug, Default)]
pub struct FrameStore {
    slot: Mutex<Slot>,
}

impl FrameStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the slot with `frame` and returns its sequence number.
    pub fn publish(&self, frame: Frame) -> u64 {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.sequence = slot.sequence.wrapping_add(1);
        let sequence = slot.sequence;
        // The displaced frame is dropped after the guard so its (possibly last)
        // Arc release never happens under the lock.
        let previous = slot.current.replace(PublishedFrame { sequence, frame });
        drop(slot);
        drop(previous);
        sequence
    }

    /// Returns the most recently published frame, or `None` if nothing has
    /// been published yet.
    pub fn read(&self) -> Option<PublishedFrame> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .current
            .clone()
    }

    /// Number of frames published so far.
    pub fn sequence(&self) -> u64 {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .sequence
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

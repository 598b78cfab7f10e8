//! Linux X11 screen capture via `XGetImage`.
//!
//! # How the grab works (for beginners)
//!
//! Every X11 screen has a *root window* that covers the whole display.
//! `XGetImage` on the root window with the `ZPixmap` format asks the server
//! for a copy of its pixels in the server's native layout, which on every
//! 24/32-bit little-endian desktop is 4 bytes per pixel in B, G, R, X order.
//!
//! ```text
//! XOpenDisplay(NULL)           once, in X11Capturer::open
//! XGetWindowAttributes(root)   every capture: picks up resolution changes
//! XGetImage(root, ZPixmap)     every capture: server → client pixel copy
//! copy rows into RawFrame      so the XImage can be freed right away
//! XDestroyImage                via the image's own destroy hook
//! XCloseDisplay                on Drop
//! ```
//!
//! This is the plain, unaccelerated path (no MIT-SHM).  It costs one full
//! copy over the X connection per frame, which is fine for a local server at
//! 30 fps and 1080p.

use std::ptr::{self, NonNull};
use std::slice;

use ::x11::xlib;
use deskcast_core::{PixelLayout, RawFrame};
use tracing::info;

use crate::application::produce_frames::{CaptureError, ScreenCapturer};

/// Captures the root window of the default X display.
pub struct X11Capturer {
    display: NonNull<xlib::Display>,
    root: xlib::Window,
}

// SAFETY: the display connection is only ever used by the thread that owns
// the capturer (capture takes `&mut self`), and Xlib connections may be moved
// between threads as long as they are not used concurrently.
unsafe impl Send for X11Capturer {}

impl X11Capturer {
    /// Connects to the display named by `DISPLAY`.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::DisplayUnavailable`] if `XOpenDisplay` fails.
    pub fn open() -> Result<Self, CaptureError> {
        // SAFETY: a null name means "use $DISPLAY"; the result is checked below.
        let raw = unsafe { xlib::XOpenDisplay(ptr::null()) };
        let display = NonNull::new(raw).ok_or_else(|| {
            let env = std::env::var("DISPLAY").unwrap_or_else(|_| "<unset>".to_string());
            CaptureError::DisplayUnavailable(format!("XOpenDisplay failed; DISPLAY={env}"))
        })?;
        // SAFETY: `display` is a live connection.
        let root = unsafe { xlib::XDefaultRootWindow(display.as_ptr()) };

        let capturer = Self { display, root };
        let (w, h) = capturer.root_size()?;
        info!(width = w, height = h, "X11 capture connected");
        Ok(capturer)
    }

    fn root_size(&self) -> Result<(u32, u32), CaptureError> {
        // SAFETY: XWindowAttributes is plain old data; an all-zero value is a
        // valid out-parameter.
        let mut attrs: xlib::XWindowAttributes = unsafe { std::mem::zeroed() };
        // SAFETY: display and root are valid for the lifetime of `self`.
        let status =
            unsafe { xlib::XGetWindowAttributes(self.display.as_ptr(), self.root, &mut attrs) };
        if status == 0 || attrs.width <= 0 || attrs.height <= 0 {
            return Err(CaptureError::Platform(
                "XGetWindowAttributes failed on the root window".into(),
            ));
        }
        Ok((attrs.width as u32, attrs.height as u32))
    }
}

impl ScreenCapturer for X11Capturer {
    fn capture(&mut self) -> Result<RawFrame, CaptureError> {
        let (width, height) = self.root_size()?;

        // SAFETY: display and root are valid; the returned image is checked
        // for null and freed on every path below.
        let image = unsafe {
            xlib::XGetImage(
                self.display.as_ptr(),
                self.root,
                0,
                0,
                width,
                height,
                xlib::XAllPlanes(),
                xlib::ZPixmap,
            )
        };
        let image = NonNull::new(image)
            .ok_or_else(|| CaptureError::Platform("XGetImage returned no image".into()))?;

        let result = copy_image(image, width, height);

        // SAFETY: `image` came from XGetImage and is destroyed exactly once,
        // through the destroy hook the C `XDestroyImage` macro uses.
        unsafe {
            if let Some(destroy) = (*image.as_ptr()).funcs.destroy_image {
                destroy(image.as_ptr());
            }
        }
        result
    }
}

fn copy_image(
    image: NonNull<xlib::XImage>,
    width: u32,
    height: u32,
) -> Result<RawFrame, CaptureError> {
    // SAFETY: `image` is a valid XImage for the duration of this call.
    let img = unsafe { image.as_ref() };

    if img.bits_per_pixel != 32 {
        return Err(CaptureError::Platform(format!(
            "unsupported depth: {} bits per pixel",
            img.bits_per_pixel
        )));
    }
    if img.byte_order != xlib::LSBFirst {
        return Err(CaptureError::Platform(
            "unsupported MSB-first pixel byte order".into(),
        ));
    }
    if img.data.is_null() || img.bytes_per_line <= 0 {
        return Err(CaptureError::Platform("XGetImage returned empty data".into()));
    }

    let stride = img.bytes_per_line as usize;
    let len = stride * height as usize;
    // SAFETY: an XImage of `height` rows holds `bytes_per_line * height` bytes.
    let data = unsafe { slice::from_raw_parts(img.data as *const u8, len) }.to_vec();

    Ok(RawFrame {
        width,
        height,
        stride,
        layout: PixelLayout::Bgra8,
        data,
    })
}

impl Drop for X11Capturer {
    fn drop(&mut self) {
        // SAFETY: the connection was opened in `open` and is closed only here.
        unsafe {
            xlib::XCloseDisplay(self.display.as_ptr());
        }
    }
}

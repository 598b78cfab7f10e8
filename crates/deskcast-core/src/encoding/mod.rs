//! Frame encoding pipeline: downscale, colour-convert, JPEG, base64.
//!
//! # Pipeline (for beginners)
//!
//! A full-HD desktop grab is about 8 MB of BGRA pixels.  Shipping that thirty
//! times a second to a browser that polls over plain HTTP is hopeless, so each
//! capture is shrunk in several independent steps:
//!
//! ```text
//! RawFrame (BGRA, w x h, padded rows)
//!   │ to_rgb            drop alpha + padding, swap to RGB        (-25 %)
//!   │ resize (nearest)  floor(w*s) x floor(h*s), s = 0.75         (-44 %)
//!   │ JPEG, quality 30  lossy, ~20-40x smaller
//!   │ base64            text-safe for a JSON body                 (+33 %)
//!   ▼
//! Frame (payload + output dimensions)
//! ```
//!
//! Nearest-neighbour sampling is deliberately crude: it is the cheapest filter
//! there is, and at JPEG quality 30 the aliasing it introduces is invisible.
//! Doing the RGB conversion first means the resize touches three bytes per
//! pixel instead of four; for nearest sampling the output is identical.

mod raw;

pub use raw::{PixelLayout, RawFrame};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::ExtendedColorType;
use thiserror::Error;

use crate::domain::frame::Frame;

/// Default downscale factor applied to every capture.
pub const DEFAULT_SCALE_FACTOR: f32 = 0.75;

/// Default JPEG quality (1-100).
pub const DEFAULT_JPEG_QUALITY: u8 = 30;

/// Errors that can occur while turning a [`RawFrame`] into a [`Frame`].
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The capture has zero width or height.
    #[error("empty frame: {width}x{height}")]
    EmptyFrame { width: u32, height: u32 },

    /// The row stride is shorter than one row of pixels.
    #[error("invalid stride {stride}: a row needs at least {row_bytes} bytes")]
    InvalidStride { stride: usize, row_bytes: usize },

    /// The pixel buffer is shorter than `stride * height` implies.
    #[error("pixel buffer too small: need {expected} bytes, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },

    /// The scale factor is not in `(0, 1]`.
    #[error("scale factor {0} is outside (0, 1]")]
    InvalidScale(f32),

    /// Downscaling would leave no pixels at all.
    #[error("{width}x{height} scaled by {scale} has no pixels left")]
    ScaledToNothing { width: u32, height: u32, scale: f32 },

    /// The JPEG quality is not in `1..=100`.
    #[error("JPEG quality {0} is outside 1..=100")]
    InvalidQuality(u8),

    /// The JPEG encoder itself failed.
    #[error("JPEG encoding failed: {0}")]
    Jpeg(#[from] image::ImageError),
}

/// Tunables for [`encode_frame`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodeSettings {
    /// Linear downscale factor, `0 < scale_factor <= 1`.
    pub scale_factor: f32,
    /// JPEG quality, `1..=100`.
    pub jpeg_quality: u8,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl EncodeSettings {
    /// Rejects out-of-range scale factors and qualities.
    pub fn validate(&self) -> Result<(), EncodeError> {
        if !(self.scale_factor > 0.0 && self.scale_factor <= 1.0) {
            return Err(EncodeError::InvalidScale(self.scale_factor));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(EncodeError::InvalidQuality(self.jpeg_quality));
        }
        Ok(())
    }

    /// Output dimensions for a `width` x `height` capture: each side is
    /// multiplied by the scale factor and rounded down.
    pub fn scaled_dimensions(&self, width: u32, height: u32) -> Result<(u32, u32), EncodeError> {
        self.validate()?;
        let scale = f64::from(self.scale_factor);
        let w = (f64::from(width) * scale).floor() as u32;
        let h = (f64::from(height) * scale).floor() as u32;
        if w == 0 || h == 0 {
            return Err(EncodeError::ScaledToNothing {
                width,
                height,
                scale: self.scale_factor,
            });
        }
        Ok((w, h))
    }
}

/// Runs the whole pipeline on one capture.
///
/// # Errors
///
/// Returns [`EncodeError`] if the capture is malformed, the settings are out
/// of range, or the JPEG encoder fails.
pub fn encode_frame(raw: &RawFrame, settings: &EncodeSettings) -> Result<Frame, EncodeError> {
    let (out_w, out_h) = settings.scaled_dimensions(raw.width, raw.height)?;

    let rgb = raw.to_rgb()?;
    let rgb = if (out_w, out_h) == (raw.width, raw.height) {
        rgb
    } else {
        imageops::resize(&rgb, out_w, out_h, FilterType::Nearest)
    };

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, settings.jpeg_quality).encode(
        rgb.as_raw(),
        out_w,
        out_h,
        ExtendedColorType::Rgb8,
    )?;

    Ok(Frame::new(STANDARD.encode(&jpeg), out_w, out_h))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

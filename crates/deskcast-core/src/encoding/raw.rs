//! Uncompressed screen captures as they come out of a platform grabber.

use image::RgbImage;

use super::EncodeError;

/// Byte order of a 4-byte pixel.
///
/// X11 `ZPixmap` images on little-endian hosts are `Bgra8`; synthetic frames
/// built in tests are usually `Rgba8`.  The fourth byte is ignored either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    Bgra8,
    Rgba8,
}

impl PixelLayout {
    /// Byte offsets of the red, green and blue channels within one pixel.
    const fn rgb_offsets(self) -> [usize; 3] {
        match self {
            Self::Bgra8 => [2, 1, 0],
            Self::Rgba8 => [0, 1, 2],
        }
    }
}

pub(crate) const BYTES_PER_PIXEL: usize = 4;

/// One raw capture of the display.
///
/// `stride` is the number of bytes between the starts of two consecutive rows.
/// Grabbers frequently pad rows, so it may be larger than `width * 4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    pub width: u32,
    pub height: u32,
    pub stride: usize,
    pub layout: PixelLayout,
    pub data: Vec<u8>,
}

impl RawFrame {
    /// Builds a frame whose rows are tightly packed (`stride == width * 4`).
    pub fn packed(width: u32, height: u32, layout: PixelLayout, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            stride: width as usize * BYTES_PER_PIXEL,
            layout,
            data,
        }
    }

    /// Checks that the buffer really holds `height` rows of `width` pixels.
    pub fn validate(&self) -> Result<(), EncodeError> {
        if self.width == 0 || self.height == 0 {
            return Err(EncodeError::EmptyFrame {
                width: self.width,
                height: self.height,
            });
        }
        let row_bytes = self.width as usize * BYTES_PER_PIXEL;
        if self.stride < row_bytes {
            return Err(EncodeError::InvalidStride {
                stride: self.stride,
                row_bytes,
            });
        }
        // The last row does not need its trailing padding.
        let required = self.stride * (self.height as usize - 1) + row_bytes;
        if self.data.len() < required {
            return Err(EncodeError::BufferTooSmall {
                expected: required,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    /// Drops the padding and alpha bytes and reorders channels to RGB.
    pub fn to_rgb(&self) -> Result<RgbImage, EncodeError> {
        self.validate()?;

        let [r, g, b] = self.layout.rgb_offsets();
        let row_bytes = self.width as usize * BYTES_PER_PIXEL;
        let mut rgb = Vec::with_capacity(self.width as usize * self.height as usize * 3);

        for row in self.data.chunks(self.stride).take(self.height as usize) {
            for px in row[..row_bytes].chunks_exact(BYTES_PER_PIXEL) {
                rgb.extend_from_slice(&[px[r], px[g], px[b]]);
            }
        }

        let actual = rgb.len();
        RgbImage::from_raw(self.width, self.height, rgb).ok_or(EncodeError::BufferTooSmall {
            expected: self.width as usize * self.height as usize * 3,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bgra_is_swapped_to_rgb() {
        // Arrange: one blue-ish BGRA pixel (B=10, G=20, R=30)
        let frame = RawFrame::packed(1, 1, PixelLayout::Bgra8, vec![10, 20, 30, 255]);

        // Act
        let rgb = frame.to_rgb().unwrap();

        // Assert
        assert_eq!(rgb.get_pixel(0, 0).0, [30, 20, 10]);
    }

    #[test]
    fn test_rgba_keeps_channel_order() {
        let frame = RawFrame::packed(1, 1, PixelLayout::Rgba8, vec![10, 20, 30, 0]);
        assert_eq!(frame.to_rgb().unwrap().get_pixel(0, 0).0, [10, 20, 30]);
    }

    #[test]
    fn test_row_padding_is_skipped() {
        // Arrange: 2x2 frame with 4 padding bytes per row.
        let data = vec![
            1, 2, 3, 0, 4, 5, 6, 0, 0xEE, 0xEE, 0xEE, 0xEE, //
            7, 8, 9, 0, 10, 11, 12, 0, 0xEE, 0xEE, 0xEE, 0xEE,
        ];
        let frame = RawFrame {
            width: 2,
            height: 2,
            stride: 12,
            layout: PixelLayout::Rgba8,
            data,
        };

        // Act
        let rgb = frame.to_rgb().unwrap();

        // Assert
        assert_eq!(rgb.as_raw(), &vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn test_last_row_padding_is_optional() {
        let frame = RawFrame {
            width: 1,
            height: 2,
            stride: 8,
            layout: PixelLayout::Rgba8,
            data: vec![1, 1, 1, 0, 0, 0, 0, 0, 2, 2, 2, 0],
        };
        assert!(frame.validate().is_ok());
    }

    #[test]
    fn test_zero_sized_frame_is_rejected() {
        let frame = RawFrame::packed(0, 10, PixelLayout::Bgra8, Vec::new());
        assert!(matches!(
            frame.validate(),
            Err(EncodeError::EmptyFrame { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_short_buffer_is_rejected() {
        let frame = RawFrame::packed(2, 2, PixelLayout::Bgra8, vec![0; 15]);
        assert!(matches!(
            frame.validate(),
            Err(EncodeError::BufferTooSmall {
                expected: 16,
                actual: 15
            })
        ));
    }

    #[test]
    fn test_stride_narrower_than_row_is_rejected() {
        let frame = RawFrame {
            width: 4,
            height: 1,
            stride: 8,
            layout: PixelLayout::Bgra8,
            data: vec![0; 16],
        };
        assert!(matches!(
            frame.validate(),
            Err(EncodeError::InvalidStride { .. })
        ));
    }
}

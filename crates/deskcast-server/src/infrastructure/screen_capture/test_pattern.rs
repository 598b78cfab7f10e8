//! Synthetic capturer used when no native backend is compiled in.
//!
//! Draws a colour gradient with a bright vertical bar that sweeps across the
//! screen one step per capture, so a browser pointed at a headless build
//! still shows visible motion and the whole pipeline can be exercised end to
//! end without an X server.

use deskcast_core::{PixelLayout, RawFrame};

use crate::application::produce_frames::{CaptureError, ScreenCapturer};

const BAR_WIDTH: u32 = 16;
const BAR_STEP: u32 = 8;

/// Moving test-pattern generator.
pub struct TestPatternCapturer {
    width: u32,
    height: u32,
    tick: u32,
}

impl TestPatternCapturer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tick: 0,
        }
    }
}

impl Default for TestPatternCapturer {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

impl ScreenCapturer for TestPatternCapturer {
    fn capture(&mut self) -> Result<RawFrame, CaptureError> {
        if self.width == 0 || self.height == 0 {
            return Err(CaptureError::DisplayUnavailable(format!(
                "test pattern has no area ({}x{})",
                self.width, self.height
            )));
        }

        let bar_x = self.tick.wrapping_mul(BAR_STEP) % self.width;
        self.tick = self.tick.wrapping_add(1);

        let mut data = Vec::with_capacity(self.width as usize * self.height as usize * 4);
        for y in 0..self.height {
            let g = (y * 255 / self.height) as u8;
            for x in 0..self.width {
                if x.wrapping_sub(bar_x) < BAR_WIDTH {
                    data.extend_from_slice(&[0xFF, 0xFF, 0xFF, 0xFF]);
                } else {
                    let r = (x * 255 / self.width) as u8;
                    // BGRA
                    data.extend_from_slice(&[0x60, g, r, 0xFF]);
                }
            }
        }

        Ok(RawFrame::packed(
            self.width,
            self.height,
            PixelLayout::Bgra8,
            data,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_has_requested_geometry() {
        let mut c = TestPatternCapturer::new(64, 32);
        let frame = c.capture().unwrap();
        assert_eq!((frame.width, frame.height), (64, 32));
        assert!(frame.validate().is_ok());
    }

    #[test]
    fn test_bar_moves_between_captures() {
        let mut c = TestPatternCapturer::new(64, 4);
        let first = c.capture().unwrap();
        let second = c.capture().unwrap();
        assert_ne!(first.data, second.data);
    }

    #[test]
    fn test_zero_area_pattern_fails() {
        let mut c = TestPatternCapturer::new(0, 10);
        assert!(c.capture().is_err());
    }
}

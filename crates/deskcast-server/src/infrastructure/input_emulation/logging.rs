//! Input sink for builds without a native backend.
//!
//! Accepts every command and only logs it, so the HTTP API behaves normally
//! (and can be driven from a browser) on a machine where nothing should
//! actually be clicked.

use deskcast_core::{ClickCommand, KeyCommand};
use tracing::debug;

use crate::application::coalesce_input::{EmulationError, PlatformInputEmulator};

#[derive(Debug, Default)]
pub struct LoggingInputEmulator;

impl LoggingInputEmulator {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformInputEmulator for LoggingInputEmulator {
    fn emit_mouse_move(&self, x: i32, y: i32) -> Result<(), EmulationError> {
        debug!(x, y, "pointer move (not injected)");
        Ok(())
    }

    fn emit_click(&self, click: ClickCommand) -> Result<(), EmulationError> {
        debug!(button = %click.button, at = ?click.at, "click (not injected)");
        Ok(())
    }

    fn emit_key_press(&self, key: KeyCommand) -> Result<(), EmulationError> {
        debug!(%key, "key press (not injected)");
        Ok(())
    }
}

//! macOS pointer reader via Core Graphics.
//!
//! The pointer location is read from a freshly created, empty `CGEvent`,
//! which carries the current cursor position in global display coordinates
//! (points, top-left origin).  The display size is taken from the main
//! display's bounds in the same unit, so Retina scaling cancels out.

use core_graphics::display::CGDisplay;
use core_graphics::event::CGEvent;
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};

use crate::application::{PositionError, PositionSource};
use crate::domain::{DisplayBounds, RawPosition};

/// macOS implementation of [`PositionSource`] via Core Graphics.
pub struct MacosPositionSource;

impl MacosPositionSource {
    /// Creates a new `MacosPositionSource`.  Never fails; kept fallible to
    /// match the other platforms.
    pub fn new() -> Result<Self, PositionError> {
        Ok(Self)
    }
}

impl PositionSource for MacosPositionSource {
    fn current_position(&self) -> Result<RawPosition, PositionError> {
        let source = CGEventSource::new(CGEventSourceStateID::HIDSystemState).map_err(|()| {
            PositionError::Platform("CGEventSourceCreate returned null".to_string())
        })?;
        let event = CGEvent::new(source)
            .map_err(|()| PositionError::Platform("CGEventCreate returned null".to_string()))?;

        let location = event.location();
        Ok(RawPosition::new(location.x as i32, location.y as i32))
    }

    fn display_size(&self) -> Result<DisplayBounds, PositionError> {
        let bounds = CGDisplay::main().bounds();
        Ok(DisplayBounds::new(
            bounds.size.width as u32,
            bounds.size.height as u32,
        )?)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

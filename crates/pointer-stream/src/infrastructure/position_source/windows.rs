//! Windows pointer reader via `GetCursorPos` / `GetSystemMetrics`.
//!
//! Both calls are stateless Win32 queries, so the source holds no handles.
//! Coordinates are in the primary monitor's pixel space; DPI virtualization
//! applies to both calls equally, so the ratio is unaffected.

use windows::Win32::Foundation::POINT;
use windows::Win32::UI::WindowsAndMessaging::{
    GetCursorPos, GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN,
};

use crate::application::{PositionError, PositionSource};
use crate::domain::{DisplayBounds, RawPosition};

/// Windows implementation of [`PositionSource`] using Win32 APIs.
pub struct WindowsPositionSource;

impl WindowsPositionSource {
    /// Creates a new `WindowsPositionSource`.  Never fails; kept fallible to
    /// match the other platforms.
    pub fn new() -> Result<Self, PositionError> {
        Ok(Self)
    }
}

impl PositionSource for WindowsPositionSource {
    fn current_position(&self) -> Result<RawPosition, PositionError> {
        let mut point = POINT::default();

        // SAFETY: `point` is a valid, writable POINT for the duration of the call.
        unsafe { GetCursorPos(&mut point) }
            .map_err(|e| PositionError::Platform(format!("GetCursorPos failed: {e}")))?;

        Ok(RawPosition::new(point.x, point.y))
    }

    fn display_size(&self) -> Result<DisplayBounds, PositionError> {
        // SAFETY: GetSystemMetrics has no preconditions; it returns 0 on failure.
        let (width, height) =
            unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };

        let to_u32 = |v: i32| {
            u32::try_from(v).map_err(|_| {
                PositionError::Platform(format!("GetSystemMetrics reported a negative size {v}"))
            })
        };
        Ok(DisplayBounds::new(to_u32(width)?, to_u32(height)?)?)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_position_source_smoke() {
        let source = WindowsPositionSource::new().expect("construct");
        // Headless CI sessions can report a zero-sized desktop; only check
        // consistency when a desktop is present.
        if let Ok(bounds) = source.display_size() {
            assert!(bounds.width() > 0 && bounds.height() > 0);
        }
    }
}

//! Linux pointer reader via the X11 Xlib API.
//!
//! Opens one connection to the X server at construction time and keeps it
//! for the life of the source; every query goes through that connection.
//! If `DISPLAY` is not set or the server is unreachable, construction fails.
//!
//! # Implementation notes
//!
//! Only the default screen is considered.  Xinerama/Xrandr layouts spanning
//! several monitors report one large root window, so the normalized values
//! are relative to the whole virtual screen there.

use std::ptr::NonNull;
use std::sync::Mutex;

use x11::xlib;

use crate::application::{PositionError, PositionSource};
use crate::domain::{DisplayBounds, RawPosition};

/// Owned Xlib display connection.
struct DisplayHandle(NonNull<xlib::Display>);

// SAFETY: the pointer is only dereferenced by Xlib while the owning
// `LinuxPositionSource` holds its mutex, so the connection is never used from
// two threads at once.
unsafe impl Send for DisplayHandle {}

impl Drop for DisplayHandle {
    fn drop(&mut self) {
        // SAFETY: the pointer came from a successful XOpenDisplay and is not
        // used after this.
        unsafe { xlib::XCloseDisplay(self.0.as_ptr()) };
    }
}

/// Linux X11 implementation of [`PositionSource`].
pub struct LinuxPositionSource {
    display: Mutex<DisplayHandle>,
}

impl LinuxPositionSource {
    /// Connects to the X server named by `DISPLAY`.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError::Platform`] if `XOpenDisplay` fails.
    pub fn new() -> Result<Self, PositionError> {
        // SAFETY: a null display name makes Xlib read `DISPLAY`.
        let raw = unsafe { xlib::XOpenDisplay(std::ptr::null()) };

        let display = NonNull::new(raw).ok_or_else(|| {
            let display_env = std::env::var("DISPLAY").unwrap_or_else(|_| "<unset>".to_string());
            PositionError::Platform(format!("XOpenDisplay failed; DISPLAY={display_env}"))
        })?;

        Ok(Self {
            display: Mutex::new(DisplayHandle(display)),
        })
    }

    fn with_display<R>(
        &self,
        query: impl FnOnce(*mut xlib::Display) -> R,
    ) -> Result<R, PositionError> {
        let handle = self
            .display
            .lock()
            .map_err(|_| PositionError::Platform("X11 display lock poisoned".to_string()))?;
        Ok(query(handle.0.as_ptr()))
    }
}

impl PositionSource for LinuxPositionSource {
    fn current_position(&self) -> Result<RawPosition, PositionError> {
        let (same_screen, x, y) = self.with_display(|display| {
            let mut root_return: xlib::Window = 0;
            let mut child_return: xlib::Window = 0;
            let (mut root_x, mut root_y) = (0, 0);
            let (mut win_x, mut win_y) = (0, 0);
            let mut mask = 0;

            // SAFETY: `display` is a live connection guarded by the mutex and
            // every out-pointer refers to a local above.
            let same_screen = unsafe {
                xlib::XQueryPointer(
                    display,
                    xlib::XDefaultRootWindow(display),
                    &mut root_return,
                    &mut child_return,
                    &mut root_x,
                    &mut root_y,
                    &mut win_x,
                    &mut win_y,
                    &mut mask,
                )
            };
            (same_screen, root_x, root_y)
        })?;

        if same_screen == xlib::False {
            return Err(PositionError::Platform(
                "pointer is not on the default X screen".to_string(),
            ));
        }
        Ok(RawPosition::new(x, y))
    }

    fn display_size(&self) -> Result<DisplayBounds, PositionError> {
        let (width, height) = self.with_display(|display| {
            // SAFETY: `display` is a live connection guarded by the mutex.
            unsafe {
                let screen = xlib::XDefaultScreen(display);
                (
                    xlib::XDisplayWidth(display, screen),
                    xlib::XDisplayHeight(display, screen),
                )
            }
        })?;

        let to_u32 = |v: i32| {
            u32::try_from(v)
                .map_err(|_| PositionError::Platform(format!("X11 reported a negative size {v}")))
        };
        Ok(DisplayBounds::new(to_u32(width)?, to_u32(height)?)?)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Smoke test: without `DISPLAY` construction must fail; with a reachable
    /// X server both queries must succeed.
    #[test]
    fn test_linux_position_source_smoke() {
        let source = LinuxPositionSource::new();

        if std::env::var("DISPLAY").is_err() {
            assert!(
                source.is_err(),
                "construction must fail when DISPLAY is not set"
            );
            return;
        }

        if let Ok(source) = source {
            let bounds = source.display_size().expect("display size");
            assert!(bounds.width() > 0 && bounds.height() > 0);
            assert!(source.current_position().is_ok());
        }
    }
}

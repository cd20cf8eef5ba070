//! Platform-specific pointer and display readers.
//!
//! Each platform implements [`PositionSource`]; the correct one is selected at
//! compile time via `#[cfg(target_os = ...)]` and re-exported as
//! `NativePositionSource`:
//!
//! | Module    | OS      | Pointer                 | Display size                       |
//! |-----------|---------|-------------------------|------------------------------------|
//! | `windows` | Windows | `GetCursorPos`          | `GetSystemMetrics(SM_CXSCREEN, ..)` |
//! | `linux`   | Linux   | `XQueryPointer` (Xlib)  | `XDisplayWidth` / `XDisplayHeight` |
//! | `macos`   | macOS   | `CGEvent::location`     | `CGDisplay::main().bounds()`       |
//!
//! A [`MockPositionSource`] is always compiled (not guarded by `#[cfg]`) so
//! tests on any platform can use it without a physical display.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::{PositionError, PositionSource};
use crate::domain::{DisplayBounds, RawPosition};

// ── Windows implementation ────────────────────────────────────────────────────

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "windows")]
pub use windows::WindowsPositionSource as NativePositionSource;

// ── Linux implementation ──────────────────────────────────────────────────────

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "linux")]
pub use linux::LinuxPositionSource as NativePositionSource;

// ── macOS implementation ──────────────────────────────────────────────────────

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "macos")]
pub use macos::MacosPositionSource as NativePositionSource;

// ── Everything else ───────────────────────────────────────────────────────────

#[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
pub use unsupported::UnsupportedPositionSource as NativePositionSource;

#[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
mod unsupported {
    use super::*;

    /// Placeholder for targets without a pointer reader; construction fails.
    pub struct UnsupportedPositionSource;

    impl UnsupportedPositionSource {
        pub fn new() -> Result<Self, PositionError> {
            Err(PositionError::Platform(format!(
                "unsupported platform: {}",
                std::env::consts::OS
            )))
        }
    }

    impl PositionSource for UnsupportedPositionSource {
        fn current_position(&self) -> Result<RawPosition, PositionError> {
            Err(PositionError::Platform("unsupported platform".to_string()))
        }

        fn display_size(&self) -> Result<DisplayBounds, PositionError> {
            Err(PositionError::Platform("unsupported platform".to_string()))
        }
    }
}

// ── Mock implementation (always compiled for tests) ───────────────────────────

/// An in-memory position source with a settable pointer.
///
/// Used in unit and integration tests.  Does not make any OS calls.  The
/// pointer starts at `(0, 0)`.
///
/// # Example
///
/// ```
/// use pointer_stream::application::PositionSource;
/// use pointer_stream::infrastructure::position_source::MockPositionSource;
///
/// let source = MockPositionSource::single_1080p();
/// source.set_position(960, 540);
/// let bounds = source.display_size().unwrap();
/// let sample = bounds.normalize(source.current_position().unwrap());
/// assert_eq!(sample.x, 0.5);
/// ```
pub struct MockPositionSource {
    width: u32,
    height: u32,
    position: Mutex<RawPosition>,
    /// `current_position` fails once this many calls have succeeded.
    fail_after: AtomicUsize,
    position_calls: AtomicUsize,
    display_calls: AtomicUsize,
}

impl MockPositionSource {
    /// Creates a source reporting a `width`×`height` display.
    ///
    /// A zero dimension is accepted here so callers can exercise the
    /// [`PositionError::InvalidBounds`] path.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            position: Mutex::new(RawPosition::new(0, 0)),
            fail_after: AtomicUsize::new(usize::MAX),
            position_calls: AtomicUsize::new(0),
            display_calls: AtomicUsize::new(0),
        }
    }

    /// A single 1920×1080 display, the most common test fixture.
    pub fn single_1080p() -> Self {
        Self::new(1920, 1080)
    }

    /// Moves the simulated pointer.
    pub fn set_position(&self, x: i32, y: i32) {
        if let Ok(mut pos) = self.position.lock() {
            *pos = RawPosition::new(x, y);
        }
    }

    /// Makes every `current_position` call after the first `calls` fail.
    pub fn fail_after(&self, calls: usize) {
        self.fail_after.store(calls, Ordering::SeqCst);
    }

    /// Number of `current_position` calls so far, failed ones included.
    pub fn position_calls(&self) -> usize {
        self.position_calls.load(Ordering::SeqCst)
    }

    /// Number of `display_size` calls so far.
    pub fn display_calls(&self) -> usize {
        self.display_calls.load(Ordering::SeqCst)
    }
}

impl PositionSource for MockPositionSource {
    fn current_position(&self) -> Result<RawPosition, PositionError> {
        let call = self.position_calls.fetch_add(1, Ordering::SeqCst);
        if call >= self.fail_after.load(Ordering::SeqCst) {
            return Err(PositionError::Platform("mock pointer failure".to_string()));
        }
        self.position
            .lock()
            .map(|pos| *pos)
            .map_err(|_| PositionError::Platform("mock position lock poisoned".to_string()))
    }

    fn display_size(&self) -> Result<DisplayBounds, PositionError> {
        self.display_calls.fetch_add(1, Ordering::SeqCst);
        Ok(DisplayBounds::new(self.width, self.height)?)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

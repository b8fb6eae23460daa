//! Platform cursor access
//!
//! The motion loop only sees the [`CursorPort`] trait. Each target gets one
//! implementation, picked at compile time through [`SystemCursor`].

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::geometry::{Point, Screen};

/// Reads and moves the system cursor
pub trait CursorPort {
    /// Size of the primary screen
    fn screen_size(&self) -> Result<Screen>;

    /// Where the cursor currently is
    fn position(&self) -> Point;

    /// Move the cursor. Failures are the port's to report; the loop never retries.
    fn set_position(&mut self, point: Point);
}

impl<P: CursorPort + ?Sized> CursorPort for &mut P {
    fn screen_size(&self) -> Result<Screen> {
        (**self).screen_size()
    }

    fn position(&self) -> Point {
        (**self).position()
    }

    fn set_position(&mut self, point: Point) {
        (**self).set_position(point)
    }
}

fn checked_screen(width: i64, height: i64) -> Result<Screen> {
    let width = i32::try_from(width).unwrap_or(i32::MAX);
    let height = i32::try_from(height).unwrap_or(i32::MAX);
    let screen = Screen::new(width, height);
    if screen.is_empty() {
        return Err(Error::EmptyScreen { width, height });
    }
    Ok(screen)
}

#[cfg(not(windows))]
pub use desktop::DesktopCursor;

#[cfg(not(windows))]
pub type SystemCursor = DesktopCursor;

#[cfg(windows)]
pub use win32::WindowsCursor;

#[cfg(windows)]
pub type SystemCursor = WindowsCursor;

#[cfg(not(windows))]
mod desktop {
    use device_query::{DeviceQuery, DeviceState};
    use rdev::{simulate, EventType};

    use super::*;

    /// Cursor access through `device_query` (reads) and `rdev` (writes)
    pub struct DesktopCursor {
        device_state: DeviceState,
    }

    impl DesktopCursor {
        pub fn new() -> Self {
            Self {
                device_state: DeviceState::new(),
            }
        }
    }

    impl Default for DesktopCursor {
        fn default() -> Self {
            Self::new()
        }
    }

    impl CursorPort for DesktopCursor {
        fn screen_size(&self) -> Result<Screen> {
            let (width, height) =
                rdev::display_size().map_err(|e| Error::ScreenQuery(format!("{:?}", e)))?;
            debug!("Display size reported as {}x{}", width, height);
            checked_screen(
                i64::try_from(width).unwrap_or(i64::MAX),
                i64::try_from(height).unwrap_or(i64::MAX),
            )
        }

        fn position(&self) -> Point {
            Point::from(self.device_state.get_mouse().coords)
        }

        fn set_position(&mut self, point: Point) {
            let event = EventType::MouseMove {
                x: f64::from(point.x),
                y: f64::from(point.y),
            };
            if let Err(error) = simulate(&event) {
                warn!("Failed to move cursor to ({}, {}): {:?}", point.x, point.y, error);
            }
        }
    }
}

#[cfg(windows)]
mod win32 {
    use windows::Win32::Foundation::POINT;
    use windows::Win32::UI::WindowsAndMessaging::{
        GetCursorPos, GetSystemMetrics, SetCursorPos, SM_CXSCREEN, SM_CYSCREEN,
    };

    use super::*;

    /// Cursor access through the user32 cursor APIs
    #[derive(Debug, Default)]
    pub struct WindowsCursor;

    impl WindowsCursor {
        pub fn new() -> Self {
            Self
        }
    }

    impl CursorPort for WindowsCursor {
        fn screen_size(&self) -> Result<Screen> {
            let (width, height) =
                unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
            debug!("Display size reported as {}x{}", width, height);
            checked_screen(i64::from(width), i64::from(height))
        }

        fn position(&self) -> Point {
            let mut point = POINT { x: 0, y: 0 };
            unsafe {
                if let Err(error) = GetCursorPos(&mut point) {
                    warn!("GetCursorPos failed: {}", error);
                }
            }
            Point::new(point.x, point.y)
        }

        fn set_position(&mut self, point: Point) {
            unsafe {
                if let Err(error) = SetCursorPos(point.x, point.y) {
                    warn!("Failed to move cursor to ({}, {}): {}", point.x, point.y, error);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_screens_are_rejected() {
        assert!(matches!(
            checked_screen(0, 1080),
            Err(Error::EmptyScreen { width: 0, height: 1080 })
        ));
        assert_eq!(checked_screen(1920, 1080).unwrap(), Screen::new(1920, 1080));
    }

    #[test]
    fn oversized_dimensions_saturate() {
        let screen = checked_screen(i64::MAX, 10).unwrap();
        assert_eq!(screen.width, i32::MAX);
    }
}

//! Native window handle extraction.
//!
//! The engine attaches its video output to a platform window handle
//! (HWND on Windows, X11 window id on Linux, NSView pointer on macOS),
//! all of which fit in an `i64`. Wayland has no embeddable foreign
//! handle, so it reports `None` and the player runs with a blank
//! surface.

use raw_window_handle::RawWindowHandle;

/// Extract the engine-attachable handle, if the platform has one.
pub fn native_handle(handle: RawWindowHandle) -> Option<i64> {
    match handle {
        RawWindowHandle::Win32(h) => Some(h.hwnd.get() as i64),
        RawWindowHandle::Xlib(h) => Some(h.window as i64),
        RawWindowHandle::AppKit(h) => Some(h.ns_view.as_ptr() as i64),
        other => {
            tracing::warn!("Unsupported window system: {:?}", other);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raw_window_handle::XlibWindowHandle;

    #[test]
    fn test_xlib_window_id_passes_through() {
        let handle = RawWindowHandle::Xlib(XlibWindowHandle::new(42));
        assert_eq!(native_handle(handle), Some(42));
    }
}

//! Window-space layout of the chrome strip and the service area.

use rambox_common::types::Rect;

/// The chrome strip: the top `tab_bar_height` pixels, or the whole window
/// while a dialog is open.
pub fn chrome_rect(width: f64, height: f64, tab_bar_height: f64, overlay: bool) -> Rect {
    Rect {
        x: 0.0,
        y: 0.0,
        width,
        height: if overlay {
            height
        } else {
            tab_bar_height.min(height)
        },
    }
}

/// The area below the strip where the active service is shown.
pub fn content_rect(width: f64, height: f64, tab_bar_height: f64) -> Rect {
    let top = tab_bar_height.min(height);
    Rect {
        x: 0.0,
        y: top,
        width,
        height: (height - top).max(0.0),
    }
}

/// Convert a `Rect` (f64 logical coords) to a wry `Rect`.
pub fn rect_to_wry(rect: &Rect) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(rect.x, rect.y)),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(rect.width, rect.height)),
    }
}

// =============================================================================
// TESTS
// =============================================================================

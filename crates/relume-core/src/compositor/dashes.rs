//! Dashed rectangle outlines for selection highlights.

use crate::compositor::Frame;
use crate::models::Rect;

/// Draw a dashed outline along all four edges of `rect`.
///
/// Runs of `dash_length` lit pixels alternate with gaps of the same length,
/// starting lit at the top-left corner of each edge. `rect` must already be
/// clipped to the frame bounds.
pub fn draw_dashed_rect(frame: &mut Frame, rect: Rect, dash_length: u32, color: [u8; 3]) {
    if rect.is_empty() || dash_length == 0 {
        return;
    }

    let x_end = rect.x + rect.width; // exclusive
    let y_end = rect.y + rect.height;
    let step = dash_length * 2;

    // Top and bottom edges
    let bottom = y_end - 1;
    let mut x0 = rect.x;
    while x0 < x_end {
        let x1 = (x0 + dash_length).min(x_end);
        for x in x0..x1 {
            put_pixel(frame, x, rect.y, color);
            put_pixel(frame, x, bottom, color);
        }
        x0 += step;
    }

    // Left and right edges
    let right = x_end - 1;
    let mut y0 = rect.y;
    while y0 < y_end {
        let y1 = (y0 + dash_length).min(y_end);
        for y in y0..y1 {
            put_pixel(frame, rect.x, y, color);
            put_pixel(frame, right, y, color);
        }
        y0 += step;
    }
}

fn put_pixel(frame: &mut Frame, x: u32, y: u32, color: [u8; 3]) {
    debug_assert!(x < frame.width && y < frame.height);
    let idx = ((y * frame.width + x) * 3) as usize;
    frame.data[idx..idx + 3].copy_from_slice(&color);
}

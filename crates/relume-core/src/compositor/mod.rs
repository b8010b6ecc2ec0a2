//! Frame compositing
//!
//! Produces the displayed frame from the base image, the per-region
//! brightness levels, and the current selection highlights. Every render is
//! a full recompute over all regions; nothing is cached between frames.

mod dashes;


use rayon::prelude::*;

use crate::decoders::BaseImage;
use crate::models::Rect;
use crate::registry::RoiRegistry;

pub use dashes::draw_dashed_rect;

/// Run length, in pixels, of the drawn/skipped segments in selection
/// outlines.
pub const DEFAULT_DASH_LENGTH: u32 = 5;

/// Outline color for selected regions (RGB).
pub const HIGHLIGHT_COLOR: [u8; 3] = [0, 255, 0];

/// Outline style for selection highlights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    pub dash_length: u32,
    pub highlight: [u8; 3],
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            dash_length: DEFAULT_DASH_LENGTH,
            highlight: HIGHLIGHT_COLOR,
        }
    }
}

/// A composited frame ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Image width
    pub width: u32,

    /// Image height
    pub height: u32,

    /// Interleaved 8-bit RGB, row-major
    pub data: Vec<u8>,
}

impl Frame {
    fn from_base(base: &BaseImage) -> Self {
        Self {
            width: base.width,
            height: base.height,
            data: base.data.clone(),
        }
    }
}

/// Composite a frame: brightness gain for every region in registry order,
/// then dashed outlines around the regions at `selected_indices`.
///
/// Unknown selection indices are ignored. Rendering never mutates the base
/// image, so calling this twice with the same inputs yields the same frame.
pub fn render(
    base: &BaseImage,
    registry: &RoiRegistry,
    selected_indices: &[usize],
    settings: &RenderSettings,
) -> Frame {
    let mut frame = Frame::from_base(base);

    for record in registry.iter() {
        apply_gain(&mut frame, record.rect, record.brightness);
    }

    for &index in selected_indices {
        if let Some(record) = registry.get(index) {
            let rect = record.rect.clipped_to(frame.width, frame.height);
            draw_dashed_rect(&mut frame, rect, settings.dash_length, settings.highlight);
        }
    }

    frame
}

/// Scale every channel inside `rect` by `1 + brightness/100`, rounding and
/// saturating to the 8-bit range.
///
/// The gain reads the working frame, not the base image: overlapping
/// regions compound in registry order.
fn apply_gain(frame: &mut Frame, rect: Rect, brightness: i32) {
    let rect = rect.clipped_to(frame.width, frame.height);
    if rect.is_empty() || brightness == 0 {
        return;
    }

    let gain = 1.0 + brightness as f32 / 100.0;
    let stride = frame.width as usize * 3;
    let x0 = rect.x as usize * 3;
    let x1 = (rect.x + rect.width) as usize * 3;

    frame
        .data
        .par_chunks_exact_mut(stride)
        .skip(rect.y as usize)
        .take(rect.height as usize)
        .for_each(|row| {
            for value in &mut row[x0..x1] {
                *value = (f32::from(*value) * gain).round().clamp(0.0, 255.0) as u8;
            }
        });
}

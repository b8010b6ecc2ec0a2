//! Event routing and the selection state machine.
//!
//! Translates UI events into registry mutations and decides when the
//! compositor needs to run. The slider-drag state exists so that only
//! motion while the slider is held writes brightness; programmatic slider
//! updates (e.g. re-syncing the display after a selection change) never
//! reach the registry.

use relume_core::Rect;

use crate::app_state::AppState;

/// Interaction states for the event router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouterState {
    #[default]
    Idle,

    /// A region is being drawn on the preview
    Selecting,

    /// The brightness slider is held down
    SliderDragging,
}

/// UI events fed to the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    SelectRoiPressed,
    RegionConfirmed(Rect),
    RegionCancelled,
    SliderPressed,
    SliderMoved(i32),
    SliderReleased,
    DeleteSelected,
    BlackenSelected,
    ListSelectionChanged,
}

/// Event router owning the interaction state machine.
#[derive(Debug, Default)]
pub struct Router {
    state: RouterState,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RouterState {
        self.state
    }

    /// Apply `event` to `app`. Returns true when the processed frame must
    /// be recomposited.
    ///
    /// Events that are not legal in the current state are dropped; the
    /// user simply retries once the interaction settles.
    pub fn handle(&mut self, event: UiEvent, app: &mut AppState) -> bool {
        match (self.state, event) {
            (_, UiEvent::ListSelectionChanged) => {
                // Never mutates brightness; the outline set changed, so the
                // frame is stale either way. Re-sync the slider display to
                // the first selected region.
                if let Some(&first) = app.selection.iter().next() {
                    if let Some(record) = app.registry.get(first) {
                        app.slider_value = record.brightness;
                    }
                }
                true
            }
            (RouterState::Idle, UiEvent::SelectRoiPressed) => {
                self.state = RouterState::Selecting;
                false
            }
            (RouterState::Selecting, UiEvent::RegionConfirmed(rect)) => {
                self.state = RouterState::Idle;
                // Cancelled selections report the all-zero rect; the
                // registry refuses it and nothing needs redrawing.
                app.registry.add(rect).is_some()
            }
            (RouterState::Selecting, UiEvent::RegionCancelled) => {
                self.state = RouterState::Idle;
                false
            }
            (RouterState::Idle, UiEvent::SliderPressed) => {
                self.state = RouterState::SliderDragging;
                false
            }
            (RouterState::SliderDragging, UiEvent::SliderMoved(level)) => {
                app.slider_value = level;
                if app.selection.is_empty() {
                    return false;
                }
                for index in app.selected_indices() {
                    app.registry.set_brightness(index, level);
                }
                true
            }
            (RouterState::SliderDragging, UiEvent::SliderReleased) => {
                self.state = RouterState::Idle;
                false
            }
            (RouterState::Idle, UiEvent::DeleteSelected) => {
                if app.selection.is_empty() {
                    return false;
                }
                let indices = app.selected_indices();
                app.registry.remove_indices(&indices);
                // The old indices are meaningless against the shifted list
                app.selection.clear();
                true
            }
            (RouterState::Idle, UiEvent::BlackenSelected) => {
                if app.selection.is_empty() {
                    return false;
                }
                for index in app.selected_indices() {
                    app.registry.blacken(index);
                }
                true
            }
            _ => false,
        }
    }
}

/// Turn a preview drag into an image-space rect.
///
/// Returns `None` for degenerate drags (zero width or height after
/// clipping), the equivalent of a cancelled selection.
pub fn rect_from_drag(
    start: (i32, i32),
    end: (i32, i32),
    image_width: u32,
    image_height: u32,
) -> Option<Rect> {
    let x = start.0.min(end.0).max(0) as u32;
    let y = start.1.min(end.1).max(0) as u32;
    let width = start.0.abs_diff(end.0);
    let height = start.1.abs_diff(end.1);

    let rect = Rect::new(x, y, width, height).clipped_to(image_width, image_height);
    if rect.is_empty() {
        None
    } else {
        Some(rect)
    }
}

//! Application state management
//!
//! Central state for the GUI application: the loaded image, the region
//! registry, and the current selection. All mutations flow through the
//! event router; nothing here is process-global.

use std::collections::BTreeSet;
use std::path::PathBuf;

use relume_core::{BaseImage, RenderSettings, RoiRegistry};

/// State owned by the event router.
pub struct AppState {
    /// Immutable base image; every render starts from a copy of it
    pub base: Option<BaseImage>,

    /// Path the base image was loaded from
    pub image_path: Option<PathBuf>,

    /// Ordered regions with their brightness levels
    pub registry: RoiRegistry,

    /// Indices currently marked selected in the list
    pub selection: BTreeSet<usize>,

    /// Current slider position
    pub slider_value: i32,

    /// Outline style for selection highlights
    pub render_settings: RenderSettings,
}

impl AppState {
    pub fn new(render_settings: RenderSettings) -> Self {
        Self {
            base: None,
            image_path: None,
            registry: RoiRegistry::new(),
            selection: BTreeSet::new(),
            slider_value: 0,
            render_settings,
        }
    }

    /// Selected indices in ascending order.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.selection.iter().copied().collect()
    }

    /// Replace the base image and drop all per-image state.
    pub fn set_image(&mut self, base: BaseImage, path: Option<PathBuf>) {
        self.base = Some(base);
        self.image_path = path;
        self.registry = RoiRegistry::new();
        self.selection.clear();
        self.slider_value = 0;
    }
}

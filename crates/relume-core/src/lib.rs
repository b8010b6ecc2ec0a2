//! Relume Core Library
//!
//! Core functionality for per-region brightness editing: the base image
//! store, the ROI registry, and the frame compositor.

pub mod compositor;
pub mod config;
pub mod decoders;
pub mod models;
pub mod registry;

// Re-export commonly used types
pub use compositor::{render, Frame, RenderSettings, DEFAULT_DASH_LENGTH, HIGHLIGHT_COLOR};
pub use decoders::{load_image, BaseImage};
pub use models::{Rect, RoiId, RoiRecord, BRIGHTNESS_MAX, BRIGHTNESS_MIN};
pub use registry::RoiRegistry;

// Hover-to-preview for thumbnails

pub mod controller;
pub mod registry;

pub use controller::{HoverPreview, HoverTiming, PreviewSurface};
pub use registry::{PreviewRegistry, PREVIEW_MARKER};

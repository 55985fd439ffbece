//! Parameter definitions with documented units and ranges.
//!
//! All tunable numbers live here:
//! - Blob controls (the four sliders, shading toggle, color choice)
//! - Camera rig
//! - Rendering and lighting configuration

mod blob;
mod camera;
mod render;

// Re-export all types
pub use blob::{BlobControls, Slider, SLIDER_STEP};
pub use camera::CameraRig;
pub use render::{palette_index, srgb_to_linear, PaletteColor, RenderConfig, PALETTE};

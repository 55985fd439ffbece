//! Vasaro library - noise-sculpted blob deformation and rendering

pub mod blob;
pub mod camera;
pub mod cli;
pub mod error;
pub mod noise;
pub mod params;
pub mod rendering;

pub use error::{Result, VasaroError};

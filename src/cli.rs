//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::blob::{icosphere, load_obj, TriangleSoup};
use crate::error::Result;
use crate::params::{palette_index, BlobControls, RenderConfig, Slider};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "vasaro")]
#[command(about = "Interactive noise-sculpted blob viewer", long_about = None)]
pub struct Args {
    /// Noise seed (random when omitted)
    #[arg(long)]
    pub seed: Option<u32>,

    /// Wavefront OBJ mesh to sculpt instead of the built-in icosphere.
    /// Must be centered on the origin.
    #[arg(long, value_name = "PATH")]
    pub mesh: Option<PathBuf>,

    /// Subdivision level of the built-in icosphere
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(0..=7))]
    pub subdivisions: u32,

    /// Start with flat shading instead of smooth
    #[arg(long)]
    pub flat: bool,

    /// Initial displacement strength [0, 1]
    #[arg(long, default_value_t = 0.5)]
    pub strength: f32,

    /// Initial noise detail [0, 1]
    #[arg(long, default_value_t = 0.5)]
    pub details: f32,

    /// Initial deformation speed [0, 1]
    #[arg(long, default_value_t = 0.5)]
    pub noise_speed: f32,

    /// Initial spin speed [0, 1]
    #[arg(long, default_value_t = 0.5)]
    pub rotation_speed: f32,

    /// Model color: white, yellow, red, green, cyan, magenta, lilac, gray
    #[arg(long, default_value = "white")]
    pub color: String,

    /// Window width (pixels)
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Window height (pixels)
    #[arg(long, default_value_t = 640)]
    pub height: u32,
}

impl Args {
    /// Seed from the command line, or a random one
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Initial controls from command-line arguments (values are clamped)
    pub fn blob_controls(&self) -> BlobControls {
        let mut controls = BlobControls {
            smooth: !self.flat,
            ..Default::default()
        };
        controls.set(Slider::Strength, self.strength);
        controls.set(Slider::Details, self.details);
        controls.set(Slider::NoiseSpeed, self.noise_speed);
        controls.set(Slider::RotationSpeed, self.rotation_speed);

        controls.color_index = match palette_index(&self.color) {
            Some(index) => index,
            None => {
                log::warn!("Unknown color '{}', using white", self.color);
                0
            }
        };

        controls
    }

    /// Rendering configuration with the requested window size
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width.max(1),
            window_height: self.height.max(1),
            ..Default::default()
        }
    }

    /// Base mesh: the OBJ file if given, otherwise an icosphere
    pub fn load_soup(&self) -> Result<TriangleSoup> {
        match &self.mesh {
            Some(path) => load_obj(path),
            None => {
                let soup = icosphere(self.subdivisions);
                log::info!(
                    "Icosphere (subdivisions {}): {} triangles",
                    self.subdivisions,
                    soup.triangle_count()
                );
                Ok(soup)
            }
        }
    }
}

//! User-adjustable blob controls.

use crate::blob::Shading;

use super::render::PALETTE;

/// Step applied to a slider per key press
pub const SLIDER_STEP: f32 = 0.05;

/// The four continuous controls, each kept in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slider {
    /// Deformation time rate, remapped to [0.5, 3.5]x
    NoiseSpeed,
    /// Spin rate, remapped to [0, 3]x
    RotationSpeed,
    /// Displacement amplitude
    Strength,
    /// Noise spatial frequency
    Details,
}

impl Slider {
    pub fn label(&self) -> &'static str {
        match self {
            Slider::NoiseSpeed => "noise",
            Slider::RotationSpeed => "rotation",
            Slider::Strength => "strength",
            Slider::Details => "details",
        }
    }
}

/// Live blob controls: four sliders in [0, 1] plus shading and color
#[derive(Debug, Clone, PartialEq)]
pub struct BlobControls {
    /// Deformation animation speed in [0, 1]
    pub noise_speed: f32,

    /// Model spin speed in [0, 1]
    pub rotation_speed: f32,

    /// Displacement strength in [0, 1]
    pub strength: f32,

    /// Noise detail (spatial frequency) in [0, 1]
    pub details: f32,

    /// Smooth (true) or flat (false) shading
    pub smooth: bool,

    /// Index into the palette
    pub color_index: usize,
}

impl Default for BlobControls {
    fn default() -> Self {
        Self {
            noise_speed: 0.5,
            rotation_speed: 0.5,
            strength: 0.5,
            details: 0.5,
            smooth: true,
            color_index: 0,
        }
    }
}

impl BlobControls {
    /// Current value of a slider
    pub fn get(&self, slider: Slider) -> f32 {
        match slider {
            Slider::NoiseSpeed => self.noise_speed,
            Slider::RotationSpeed => self.rotation_speed,
            Slider::Strength => self.strength,
            Slider::Details => self.details,
        }
    }

    /// Set a slider, clamped to [0, 1] (NaN becomes 0)
    pub fn set(&mut self, slider: Slider, value: f32) {
        let value = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
        match slider {
            Slider::NoiseSpeed => self.noise_speed = value,
            Slider::RotationSpeed => self.rotation_speed = value,
            Slider::Strength => self.strength = value,
            Slider::Details => self.details = value,
        }
    }

    /// Nudge a slider by `steps` increments of [`SLIDER_STEP`]
    pub fn adjust(&mut self, slider: Slider, steps: f32) {
        self.set(slider, self.get(slider) + steps * SLIDER_STEP);
    }

    pub fn toggle_smooth(&mut self) {
        self.smooth = !self.smooth;
    }

    pub fn shading(&self) -> Shading {
        Shading::from_smooth_flag(self.smooth)
    }

    /// Advance to the next palette color, wrapping around
    pub fn next_color(&mut self) {
        self.color_index = (self.color_index + 1) % PALETTE.len();
    }

    /// Name of the selected palette color
    pub fn color_name(&self) -> &'static str {
        PALETTE[self.color_index % PALETTE.len()].name
    }

    /// One-line summary for the window title
    pub fn summary(&self) -> String {
        format!(
            "{} {:.2} | {} {:.2} | {} {:.2} | {} {:.2} | {} | {}",
            Slider::NoiseSpeed.label(),
            self.noise_speed,
            Slider::RotationSpeed.label(),
            self.rotation_speed,
            Slider::Strength.label(),
            self.strength,
            Slider::Details.label(),
            self.details,
            if self.smooth { "smooth" } else { "flat" },
            self.color_name(),
        )
    }
}

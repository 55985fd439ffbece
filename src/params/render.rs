//! Rendering configuration and color palette.

/// Named model color (sRGB, 8 bits per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColor {
    pub name: &'static str,
    pub rgb: [u8; 3],
}

impl PaletteColor {
    /// Channels as floats in [0, 1], decoded to linear for an sRGB target
    pub fn to_rgba_f32(self, srgb_target: bool) -> [f32; 4] {
        let [r, g, b] = self.rgb.map(|value| {
            let encoded = value as f64 / 255.0;
            let channel = if srgb_target {
                srgb_to_linear(encoded)
            } else {
                encoded
            };
            channel as f32
        });
        [r, g, b, 1.0]
    }
}

/// Model colors, in cycling order
pub const PALETTE: [PaletteColor; 8] = [
    PaletteColor { name: "WHITE", rgb: [240, 240, 240] },
    PaletteColor { name: "YELLOW", rgb: [204, 178, 25] },
    PaletteColor { name: "RED", rgb: [164, 10, 10] },
    PaletteColor { name: "GREEN", rgb: [25, 204, 50] },
    PaletteColor { name: "CYAN", rgb: [25, 178, 204] },
    PaletteColor { name: "MAGENTA", rgb: [204, 25, 178] },
    PaletteColor { name: "LILAC", rgb: [50, 25, 204] },
    PaletteColor { name: "GRAY", rgb: [30, 30, 30] },
];

/// Decode one sRGB-encoded channel in [0, 1] to linear light
pub fn srgb_to_linear(channel: f64) -> f64 {
    if channel <= 0.04045 {
        channel / 12.92
    } else {
        ((channel + 0.055) / 1.055).powf(2.4)
    }
}

/// Find a palette entry by name (case-insensitive)
pub fn palette_index(name: &str) -> Option<usize> {
    PALETTE
        .iter()
        .position(|color| color.name.eq_ignore_ascii_case(name))
}

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Near clipping plane (world units)
    pub near_plane: f32,

    /// Far clipping plane (world units)
    pub far_plane: f32,

    /// Clear color (sRGB)
    pub background_rgb: [u8; 3],

    /// Point light position (world units)
    pub light_position: [f32; 3],

    /// Ambient light level (scaled by 1/10 in the shader)
    pub ambient: f32,

    /// Frame rate the per-frame work is budgeted against
    pub target_fps: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 640,
            window_height: 640,
            near_plane: 0.01,
            far_plane: 1000.0,
            background_rgb: [25, 46, 61],
            light_position: [6.0, 10.0, 10.0],
            ambient: 0.5,
            target_fps: 60,
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }

    /// Time available per frame
    pub fn frame_budget(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.target_fps.max(1) as f64)
    }

    /// Clear color as a wgpu color (channels in [0, 1]).
    ///
    /// `srgb_target` means the surface encodes on write, so channels are
    /// decoded to linear first and the stored 8-bit values come back out.
    pub fn clear_color(&self, srgb_target: bool) -> wgpu::Color {
        let channel = |value: u8| {
            let encoded = value as f64 / 255.0;
            if srgb_target {
                srgb_to_linear(encoded)
            } else {
                encoded
            }
        };
        wgpu::Color {
            r: channel(self.background_rgb[0]),
            g: channel(self.background_rgb[1]),
            b: channel(self.background_rgb[2]),
            a: 1.0,
        }
    }
}

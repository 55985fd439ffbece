//! Frame-rate independent animation time.

/// Accumulated deformation and spin time.
///
/// Both accumulators advance by measured frame duration scaled by the
/// current control values, so the animation looks the same at any frame
/// rate and pausing the speed freezes it in place.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationClock {
    noise_time: f64,
    spin_time: f64,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Noise time `w` fed to the deformation
    pub fn noise_time(&self) -> f64 {
        self.noise_time
    }

    /// Spin time driving the model rotation
    pub fn spin_time(&self) -> f64 {
        self.spin_time
    }

    /// Rate multiplier for noise time, in [0.5, 3.5]
    pub fn noise_rate(noise_speed: f32) -> f64 {
        0.5 + noise_speed as f64 * 3.0
    }

    /// Rate multiplier for spin time, in [0, 3]
    pub fn spin_rate(rotation_speed: f32) -> f64 {
        rotation_speed as f64 * 3.0
    }

    /// Advance spin time by one frame. Negative durations count as zero.
    pub fn advance_spin(&mut self, frame_s: f32, rotation_speed: f32) {
        self.spin_time += clamp_frame(frame_s) * Self::spin_rate(rotation_speed);
    }

    /// Advance noise time by one frame. Negative durations count as zero.
    pub fn advance_noise(&mut self, frame_s: f32, noise_speed: f32) {
        self.noise_time += clamp_frame(frame_s) * Self::noise_rate(noise_speed);
    }
}

fn clamp_frame(frame_s: f32) -> f64 {
    if frame_s.is_finite() {
        frame_s.max(0.0) as f64
    } else {
        0.0
    }
}

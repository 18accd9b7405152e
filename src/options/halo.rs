use serde::{Deserialize, Serialize};

/// Constants for the plasma halo fragment shader.
///
/// These feed the `HaloParams` uniform verbatim; the same values drive the
/// CPU reference implementation in [`crate::sim::plasma`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HaloOptions {
    /// World-space size of the halo quad (width, height).
    pub quad_size: [f32; 2],
    /// Offset subtracted from UV before computing polar coordinates, so the
    /// ring sits slightly off the quad center.
    pub center_offset: f32,
    /// Inner band edge: smoothstep from `inner_start` to `inner_end` of the
    /// radial distance.
    pub inner_start: f32,
    /// Inner band edge end.
    pub inner_end: f32,
    /// Outer band edge: `outer_base - smoothstep(outer_start, outer_end, r)`
    /// (note the reversed edge order — the step falls as `r` grows).
    pub outer_base: f32,
    /// Outer band edge start.
    pub outer_start: f32,
    /// Outer band edge end.
    pub outer_end: f32,
    /// First turbulence term: angular frequency, time rate, amplitude.
    pub turb1: [f32; 3],
    /// Second turbulence term: angular frequency, time rate (subtracted),
    /// amplitude.
    pub turb2: [f32; 3],
    /// Gain applied to the summed turbulence before it joins the band mask.
    pub turb_gain: f32,
    /// Intensity clamp (min, max) after turbulence.
    pub intensity_clamp: [f32; 2],
    /// Radial falloff: smoothstep edges softening toward the quad border.
    pub falloff_start: f32,
    /// Radial falloff end.
    pub falloff_end: f32,
    /// Primary halo color (linear RGB).
    pub base_color: [f32; 3],
    /// Secondary tint blended in over time (linear RGB).
    pub tint_color: [f32; 3],
    /// Rate of the slow base/tint color oscillation, radians per second.
    pub color_rate: f32,
    /// Final brightness multiplier.
    pub brightness: f32,
}

impl Default for HaloOptions {
    fn default() -> Self {
        Self {
            quad_size: [7.0, 6.0],
            center_offset: 0.19,
            inner_start: 0.60,
            inner_end: 0.90,
            outer_base: 0.10,
            outer_start: 0.70,
            outer_end: 0.50,
            turb1: [30.0, 6.1, 0.10],
            turb2: [50.0, 3.7, 0.15],
            turb_gain: 2.19,
            intensity_clamp: [0.5, 2.0],
            falloff_start: 0.13,
            falloff_end: 0.90,
            base_color: [0.9, 0.35, 1.0],
            tint_color: [0.6, 0.3, 1.0],
            color_rate: 0.7,
            brightness: 0.2,
        }
    }
}

use serde::{Deserialize, Serialize};

/// Parameters for one particle band: generation ranges, material, and the
/// whole-band roll applied as a model transform.
///
/// There is no single sensible default — each layer ships its own preset
/// ([`BandOptions::gold`], [`BandOptions::shock`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default = "BandOptions::gold")]
pub struct BandOptions {
    /// Number of particles. Fixed at generation; the arena never grows.
    pub count: usize,
    /// Lower bound of the base-radius range (inclusive).
    pub radius_min: f32,
    /// Upper bound of the base-radius range (exclusive).
    pub radius_max: f32,
    /// Bias subtracted from the uniform sample for the initial out-of-plane
    /// offset.
    pub depth_bias: f32,
    /// Scale of the initial out-of-plane offset.
    pub depth_scale: f32,
    /// Particle color (linear RGB).
    pub color: [f32; 3],
    /// World-space particle size.
    pub point_size: f32,
    /// Particle opacity, applied on top of additive blending.
    pub opacity: f32,
    /// Whole-band roll about the view axis, radians per second.
    pub roll_rate: f32,
}

impl BandOptions {
    /// Gold mid-layer band: a dense dust ring around the void.
    #[must_use]
    pub fn gold() -> Self {
        Self {
            count: 35_000,
            radius_min: 1.1,
            radius_max: 1.5,
            depth_bias: 0.8,
            depth_scale: 0.90,
            // warm gold (#d69d21)
            color: [0.839, 0.616, 0.129],
            point_size: 0.012,
            opacity: 1.0,
            roll_rate: 0.03,
        }
    }

    /// Outer shock band: sparse bright streaks beyond the gold ring.
    ///
    /// The radius range starts past the gold band's outer edge. An
    /// alternative look with the streaks collapsed into the void (radii in
    /// [0, 0.8)) can be had by setting `radius_min = 0.0` and
    /// `radius_max = 0.8` in a preset.
    #[must_use]
    pub fn shock() -> Self {
        Self {
            count: 1_500,
            radius_min: 1.5,
            radius_max: 2.3,
            depth_bias: 0.9,
            depth_scale: 0.06,
            // bright Cherenkov blue (#66b3ff)
            color: [0.4, 0.702, 1.0],
            point_size: 0.08,
            opacity: 0.8,
            roll_rate: 0.072,
        }
    }
}

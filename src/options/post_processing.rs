use serde::{Deserialize, Serialize};

/// Bloom post-processing parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PostProcessingOptions {
    /// How much of the blurred bright-pass is added back in the composite.
    pub bloom_strength: f32,
    /// Blur kernel scale in texels. Larger values spread the glow further at
    /// the cost of visible stepping.
    pub bloom_radius: f32,
    /// Luminance above which a pixel contributes to bloom.
    pub bloom_threshold: f32,
}

impl Default for PostProcessingOptions {
    fn default() -> Self {
        Self {
            bloom_strength: 0.9,
            bloom_radius: 0.19,
            bloom_threshold: 0.85,
        }
    }
}

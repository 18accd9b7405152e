use serde::{Deserialize, Serialize};

/// Layer visibility toggles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayOptions {
    /// Draw the gold mid-layer band.
    pub show_gold_band: bool,
    /// Draw the plasma halo quad.
    pub show_halo: bool,
    /// Draw the outer shock band. Off by default: the band is simulated
    /// every frame but stays out of the composed image.
    pub show_shock_band: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_gold_band: true,
            show_halo: true,
            show_shock_band: false,
        }
    }
}

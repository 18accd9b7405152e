//! Centralized rendering/display options with TOML preset support.
//!
//! All tweakable settings (band counts and radii, halo shader constants,
//! bloom parameters, camera projection, display toggles) are consolidated
//! here. Options serialize to/from TOML so alternative looks can be stored
//! as preset files and passed to the binary.

mod band;
mod camera;
mod display;
mod halo;
mod post_processing;

use std::path::Path;

pub use band::BandOptions;
pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use halo::HaloOptions;
pub use post_processing::PostProcessingOptions;
use serde::{Deserialize, Serialize};

use crate::error::TachyonError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[post_processing]`) work
/// correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Options {
    /// Gold mid-layer particle band.
    #[serde(default = "BandOptions::gold")]
    pub gold: BandOptions,
    /// Outer shock particle band (drawn only when
    /// [`DisplayOptions::show_shock_band`] is set).
    #[serde(default = "BandOptions::shock")]
    pub shock: BandOptions,
    /// Plasma halo shader constants.
    pub halo: HaloOptions,
    /// Bloom post-processing parameters.
    pub post_processing: PostProcessingOptions,
    /// Camera projection parameters.
    pub camera: CameraOptions,
    /// Layer visibility toggles.
    pub display: DisplayOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            gold: BandOptions::gold(),
            shock: BandOptions::shock(),
            halo: HaloOptions::default(),
            post_processing: PostProcessingOptions::default(),
            camera: CameraOptions::default(),
            display: DisplayOptions::default(),
        }
    }
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TachyonError::Io`] if the file cannot be read and
    /// [`TachyonError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, TachyonError> {
        let content = std::fs::read_to_string(path).map_err(TachyonError::Io)?;
        toml::from_str(&content)
            .map_err(|e| TachyonError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`TachyonError::OptionsParse`] on serialization failure and
    /// [`TachyonError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), TachyonError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TachyonError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(TachyonError::Io)?;
        }
        std::fs::write(path, content).map_err(TachyonError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[post_processing]
bloom_strength = 1.4
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.post_processing.bloom_strength, 1.4);
        // Everything else should be default
        assert_eq!(opts.post_processing.bloom_threshold, 0.85);
        assert_eq!(opts.gold.count, 35_000);
        assert!(!opts.display.show_shock_band);
    }

    #[test]
    fn band_defaults_differ_per_layer() {
        let opts = Options::default();
        assert_eq!(opts.gold.radius_min, 1.1);
        assert_eq!(opts.gold.radius_max, 1.5);
        assert_eq!(opts.shock.count, 1_500);
        // Corrected shock range sits beyond the gold ring
        assert!(opts.shock.radius_min > opts.gold.radius_max);
    }

    #[test]
    fn missing_band_section_uses_layer_default() {
        let toml_str = r"
[gold]
count = 64
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.gold.count, 64);
        // Untouched [shock] falls back to the shock layer default, not the
        // gold one
        assert_eq!(opts.shock.point_size, 0.08);
    }
}

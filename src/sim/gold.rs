//! Motion formula for the gold mid-layer band.

use super::band::ParticleBand;
use super::noise::pseudo_noise;

/// Two stacked sine waves give each particle a string-vibration wobble.
const VIB_AMP_1: f32 = 0.05;
const VIB_FREQ_1: f32 = 10.0;
const VIB_AMP_2: f32 = 0.02;
const VIB_FREQ_2: f32 = 15.0;

/// Slow pull back toward the band center for particles whose base radius
/// sits beyond 1.0.
const INWARD_PULL: f32 = 0.0018;

/// Radial turbulence amplitude.
const TURB_RADIAL: f32 = 0.10;

/// Swirl strength and the fraction of it applied to the angle.
const SWIRL_GAIN: f32 = 0.60;
const SWIRL_ANGLE: f32 = 0.12;

/// Out-of-plane oscillation.
const Z_AMP: f32 = 0.03;
const Z_FREQ: f32 = 9.0;
const Z_PHASE: f32 = 2.1;

/// Recompute every particle position for the given simulation time.
///
/// Pure function of the band's immutable attributes and `time` — stepping
/// to the same time twice produces identical positions.
pub fn step(band: &mut ParticleBand, time: f32) {
    let (base_radius, base_angle, phase, positions) = band.split_mut();

    for i in 0..positions.len() {
        let r0 = base_radius[i];
        let a0 = base_angle[i];
        let ph = phase[i];

        let string_vib = VIB_AMP_1 * (time * VIB_FREQ_1 + ph).sin()
            + VIB_AMP_2 * (time * VIB_FREQ_2 + ph * 2.0).sin();

        let inward = -INWARD_PULL * (r0 - 1.0);

        let turb_rad =
            TURB_RADIAL * pseudo_noise(a0 * 3.0, r0 * 3.1, time * 0.3);

        let swirl = SWIRL_GAIN
            * pseudo_noise(a0 * 2.0 + time * 0.3, r0 * 2.0, time * 0.7);

        let radius = r0 + string_vib + inward + turb_rad;
        let angle = a0 + swirl * SWIRL_ANGLE;

        positions[i].x = angle.cos() * radius;
        positions[i].y = angle.sin() * radius;
        positions[i].z = Z_AMP * (time * Z_FREQ + ph * Z_PHASE).sin();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::BandOptions;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_band() -> ParticleBand {
        let mut opts = BandOptions::gold();
        opts.count = 4;
        let mut rng = StdRng::seed_from_u64(42);
        ParticleBand::generate(&opts, &mut rng)
    }

    #[test]
    fn base_attributes_survive_stepping() {
        let mut band = small_band();
        let radii: Vec<f32> = band.base_radius().to_vec();
        let angles: Vec<f32> = band.base_angle().to_vec();
        let phases: Vec<f32> = band.phase().to_vec();

        for frame in 0..500 {
            step(&mut band, frame as f32 / 60.0);
        }

        assert_eq!(band.base_radius(), radii.as_slice());
        assert_eq!(band.base_angle(), angles.as_slice());
        assert_eq!(band.phase(), phases.as_slice());
    }

    #[test]
    fn positions_match_motion_formula() {
        let mut band = small_band();

        for t in [0.0f32, 1.0, 2.0] {
            step(&mut band, t);
            for i in 0..band.len() {
                let r0 = band.base_radius()[i];
                let a0 = band.base_angle()[i];
                let ph = band.phase()[i];

                let string_vib = 0.05 * (t * 10.0 + ph).sin()
                    + 0.02 * (t * 15.0 + ph * 2.0).sin();
                let inward = -0.0018 * (r0 - 1.0);
                let turb_rad =
                    0.10 * pseudo_noise(a0 * 3.0, r0 * 3.1, t * 0.3);
                let swirl = 0.60
                    * pseudo_noise(a0 * 2.0 + t * 0.3, r0 * 2.0, t * 0.7);

                let radius = r0 + string_vib + inward + turb_rad;
                let angle = a0 + swirl * 0.12;

                let pos = band.positions()[i];
                assert!((pos.x - angle.cos() * radius).abs() < 1e-6);
                assert!((pos.y - angle.sin() * radius).abs() < 1e-6);
                assert!(
                    (pos.z - 0.03 * (t * 9.0 + ph * 2.1).sin()).abs() < 1e-6
                );
            }
        }
    }

    #[test]
    fn stepping_to_the_same_time_is_replayable() {
        let mut band = small_band();
        step(&mut band, 1.37);
        let first: Vec<_> = band.positions().to_vec();
        step(&mut band, 8.0);
        step(&mut band, 1.37);
        assert_eq!(band.positions(), first.as_slice());
    }
}

//! Fixed-capacity particle arena (struct-of-arrays).

use glam::Vec3;
use rand::Rng;

use crate::options::BandOptions;

/// One band of particles sharing a common motion formula.
///
/// Base attributes are immutable after generation; only `positions` is
/// rewritten, in place, every simulation step. Particles are never created
/// or destroyed after init, so indices are stable for the process lifetime.
pub struct ParticleBand {
    base_radius: Vec<f32>,
    base_angle: Vec<f32>,
    phase: Vec<f32>,
    positions: Vec<Vec3>,
}

impl ParticleBand {
    /// Generate `opts.count` particles with independently uniform-random
    /// angle, radius-within-range, and phase offset.
    ///
    /// The initial position is the polar-to-Cartesian projection of
    /// (angle, radius) plus a randomized out-of-plane offset.
    pub fn generate(opts: &BandOptions, rng: &mut impl Rng) -> Self {
        let mut base_radius = Vec::with_capacity(opts.count);
        let mut base_angle = Vec::with_capacity(opts.count);
        let mut phase = Vec::with_capacity(opts.count);
        let mut positions = Vec::with_capacity(opts.count);

        let radius_span = opts.radius_max - opts.radius_min;
        for _ in 0..opts.count {
            let angle = rng.random::<f32>() * std::f32::consts::TAU;
            let radius = opts.radius_min + rng.random::<f32>() * radius_span;
            let z = (rng.random::<f32>() - opts.depth_bias) * opts.depth_scale;

            base_radius.push(radius);
            base_angle.push(angle);
            phase.push(rng.random::<f32>() * std::f32::consts::TAU);
            positions.push(Vec3::new(
                angle.cos() * radius,
                angle.sin() * radius,
                z,
            ));
        }

        Self {
            base_radius,
            base_angle,
            phase,
            positions,
        }
    }

    /// Number of particles in the band.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the band is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Immutable base radii.
    #[must_use]
    pub fn base_radius(&self) -> &[f32] {
        &self.base_radius
    }

    /// Immutable base angles.
    #[must_use]
    pub fn base_angle(&self) -> &[f32] {
        &self.base_angle
    }

    /// Immutable phase offsets.
    #[must_use]
    pub fn phase(&self) -> &[f32] {
        &self.phase
    }

    /// Current particle positions, rewritten each step.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Split the band into its immutable attributes and the mutable
    /// position array for a motion-formula pass.
    pub(crate) fn split_mut(
        &mut self,
    ) -> (&[f32], &[f32], &[f32], &mut [Vec3]) {
        (
            &self.base_radius,
            &self.base_angle,
            &self.phase,
            &mut self.positions,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generation_respects_attribute_ranges() {
        let opts = BandOptions::gold();
        let mut rng = StdRng::seed_from_u64(11);
        let band = ParticleBand::generate(&opts, &mut rng);

        assert_eq!(band.len(), opts.count);
        for i in 0..band.len() {
            let r = band.base_radius()[i];
            let a = band.base_angle()[i];
            let p = band.phase()[i];
            assert!(r >= opts.radius_min && r < opts.radius_max);
            assert!((0.0..std::f32::consts::TAU).contains(&a));
            assert!((0.0..std::f32::consts::TAU).contains(&p));
        }
    }

    #[test]
    fn shock_generation_range_is_positive_and_non_degenerate() {
        // Regression target: the upstream expression dropped its lower
        // bound and produced radii clustered at zero.
        let opts = BandOptions::shock();
        assert!(opts.radius_min > 0.0);
        assert!(opts.radius_max > opts.radius_min);

        let mut rng = StdRng::seed_from_u64(7);
        let band = ParticleBand::generate(&opts, &mut rng);
        for &r in band.base_radius() {
            assert!(r >= opts.radius_min && r < opts.radius_max);
        }
    }

    #[test]
    fn initial_position_is_polar_projection() {
        let mut opts = BandOptions::gold();
        opts.count = 128;
        let mut rng = StdRng::seed_from_u64(3);
        let band = ParticleBand::generate(&opts, &mut rng);

        for i in 0..band.len() {
            let r = band.base_radius()[i];
            let a = band.base_angle()[i];
            let pos = band.positions()[i];
            assert!((pos.x - a.cos() * r).abs() < 1e-6);
            assert!((pos.y - a.sin() * r).abs() < 1e-6);
            // Out-of-plane offset stays within the configured envelope
            let z_lo = (0.0 - opts.depth_bias) * opts.depth_scale;
            let z_hi = (1.0 - opts.depth_bias) * opts.depth_scale;
            assert!(pos.z >= z_lo && pos.z <= z_hi);
        }
    }
}

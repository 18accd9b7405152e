//! Particle simulation: fixed arenas, per-band motion formulas, and the
//! explicit simulation context the render loop drives.
//!
//! Everything here is CPU-only and deterministic given a seeded RNG, so the
//! whole animation can be replayed frame-by-frame in tests without a GPU.

pub mod band;
pub mod gold;
pub mod noise;
pub mod plasma;
pub mod shock;

use rand::Rng;

pub use band::ParticleBand;
pub use noise::pseudo_noise;

use crate::options::Options;

/// The complete animation state: both particle bands, the simulated clock,
/// and the accumulated whole-band roll angles.
///
/// Owned by the engine and advanced with [`RingSim::step`]; any driver
/// works — the real-time winit loop, or a test harness feeding fixed `dt`
/// values.
pub struct RingSim {
    /// Gold mid-layer band.
    pub gold: ParticleBand,
    /// Outer shock band (simulated even when not drawn).
    pub shock: ParticleBand,
    /// Elapsed simulation time in seconds. Also drives the halo shader.
    pub time: f32,
    /// Accumulated gold-band roll about the view axis, radians.
    pub gold_roll: f32,
    /// Accumulated shock-band roll about the view axis, radians.
    pub shock_roll: f32,
    gold_roll_rate: f32,
    shock_roll_rate: f32,
}

impl RingSim {
    /// Generate both bands from the given options and RNG.
    pub fn new(options: &Options, rng: &mut impl Rng) -> Self {
        Self {
            gold: ParticleBand::generate(&options.gold, rng),
            shock: ParticleBand::generate(&options.shock, rng),
            time: 0.0,
            gold_roll: 0.0,
            shock_roll: 0.0,
            gold_roll_rate: options.gold.roll_rate,
            shock_roll_rate: options.shock.roll_rate,
        }
    }

    /// Advance the clock by `dt` seconds and recompute all particle
    /// positions in place.
    pub fn step(&mut self, dt: f32) {
        self.time += dt;
        self.gold_roll += self.gold_roll_rate * dt;
        self.shock_roll += self.shock_roll_rate * dt;
        gold::step(&mut self.gold, self.time);
        shock::step(&mut self.shock, self.time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tiny_options() -> Options {
        let mut options = Options::default();
        options.gold.count = 8;
        options.shock.count = 8;
        options
    }

    #[test]
    fn step_advances_clock_and_rolls() {
        let options = tiny_options();
        let mut rng = StdRng::seed_from_u64(1);
        let mut sim = RingSim::new(&options, &mut rng);

        for _ in 0..60 {
            sim.step(1.0 / 60.0);
        }

        assert!((sim.time - 1.0).abs() < 1e-4);
        assert!((sim.gold_roll - options.gold.roll_rate).abs() < 1e-4);
        assert!((sim.shock_roll - options.shock.roll_rate).abs() < 1e-4);
        // 2.4x ratio between the two layers' roll rates
        assert!(
            (sim.shock_roll / sim.gold_roll - 2.4).abs() < 1e-3,
            "shock roll should outpace gold roll 2.4x"
        );
    }

    #[test]
    fn same_seed_gives_identical_runs() {
        let options = tiny_options();
        let mut a = RingSim::new(&options, &mut StdRng::seed_from_u64(99));
        let mut b = RingSim::new(&options, &mut StdRng::seed_from_u64(99));

        for _ in 0..100 {
            a.step(0.016);
            b.step(0.016);
        }

        assert_eq!(a.gold.positions(), b.gold.positions());
        assert_eq!(a.shock.positions(), b.shock.positions());
    }
}

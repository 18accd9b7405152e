//! Cheap deterministic turbulence used in place of gradient noise.

/// Sine-product interference pattern over (angle, radius, time).
///
/// Not real Perlin noise — two sine waves with different frequency
/// multipliers on each input, multiplied together. Stateless: the same
/// inputs always produce the same output, which keeps the whole particle
/// update replayable frame-by-frame in tests.
#[inline]
#[must_use]
pub fn pseudo_noise(angle: f32, radius: f32, time: f32) -> f32 {
    (angle * 3.5 + radius * 9.5 + time * 6.83).sin()
        * (angle * 1.9 - radius * 6.0 + time * 0.10).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_calls_are_deterministic() {
        let samples = [
            (0.0, 0.0, 0.0),
            (1.3, 1.1, 0.5),
            (-2.7, 3.4, 12.0),
            (6.283, 0.001, 999.9),
        ];
        for (a, r, t) in samples {
            let first = pseudo_noise(a, r, t);
            for _ in 0..10 {
                assert_eq!(first, pseudo_noise(a, r, t));
            }
        }
    }

    #[test]
    fn output_stays_in_unit_range() {
        let mut v = 0.37f32;
        for i in 0..1000 {
            // Cheap LCG-ish walk over the input space
            v = (v * 1.7 + i as f32 * 0.013) % 10.0;
            let n = pseudo_noise(v, 10.0 - v, v * 3.0);
            assert!((-1.0..=1.0).contains(&n));
        }
    }

    #[test]
    fn matches_closed_form() {
        let (a, r, t) = (0.7f32, 1.2f32, 2.5f32);
        let expected = (a * 3.5 + r * 9.5 + t * 6.83).sin()
            * (a * 1.9 - r * 6.0 + t * 0.10).sin();
        assert_eq!(pseudo_noise(a, r, t), expected);
    }
}

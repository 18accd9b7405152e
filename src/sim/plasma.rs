//! CPU reference implementation of the plasma halo fragment program.
//!
//! Mirrors `assets/shaders/halo.wgsl` term for term, driven by the same
//! [`HaloOptions`] the GPU uniform is packed from. The renderer never calls
//! this — it exists so the halo math has a testable, headless form.

use crate::options::HaloOptions;

/// Hermite smoothstep with increasing edges, matching WGSL `smoothstep`.
#[inline]
#[must_use]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Radial band mask: the product of the inner rising edge and the outer
/// falling edge, before turbulence and falloff are applied.
#[must_use]
pub fn band_mask(r: f32, opts: &HaloOptions) -> f32 {
    let inner = smoothstep(opts.inner_start, opts.inner_end, r);
    // The outer edge falls as r grows (reversed edge order in the options)
    let falling = 1.0 - smoothstep(opts.outer_end, opts.outer_start, r);
    let outer = opts.outer_base - falling;
    inner * outer
}

/// Angular + temporal turbulence: two sine terms at different angular
/// frequencies and time rates.
#[must_use]
pub fn turbulence(angle: f32, time: f32, opts: &HaloOptions) -> f32 {
    let [freq1, rate1, amp1] = opts.turb1;
    let [freq2, rate2, amp2] = opts.turb2;
    (angle * freq1 + time * rate1).sin() * amp1
        + (angle * freq2 - time * rate2).sin() * amp2
}

/// Ring intensity at polar coordinates (r, angle): band mask plus gained
/// turbulence, clamped to the configured range.
#[must_use]
pub fn intensity(r: f32, angle: f32, time: f32, opts: &HaloOptions) -> f32 {
    let ring = band_mask(r, opts)
        + turbulence(angle, time, opts) * opts.turb_gain;
    ring.clamp(opts.intensity_clamp[0], opts.intensity_clamp[1])
}

/// Radial falloff softening the outer edge.
#[must_use]
pub fn falloff(r: f32, opts: &HaloOptions) -> f32 {
    smoothstep(opts.falloff_start, opts.falloff_end, r)
}

/// Full per-pixel evaluation: premultiplied RGB and the alpha channel the
/// additive blend reads.
#[must_use]
pub fn shade(uv: [f32; 2], time: f32, opts: &HaloOptions) -> [f32; 4] {
    let p = [uv[0] - opts.center_offset, uv[1] - opts.center_offset];
    let r = (p[0] * p[0] + p[1] * p[1]).sqrt();
    let angle = p[1].atan2(p[0]);

    let ring = intensity(r, angle, time, opts) * falloff(r, opts);

    // Slow drift between the base color and the tint (unclamped lerp)
    let mix = 0.8 + 0.5 * (time * opts.color_rate).sin();
    let mut color = [0.0f32; 4];
    for c in 0..3 {
        let blended = opts.base_color[c]
            + (opts.tint_color[c] - opts.base_color[c]) * mix;
        color[c] = blended * ring * opts.brightness;
    }
    color[3] = ring;
    color
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_mask_vanishes_inside_the_inner_edge() {
        let opts = HaloOptions::default();
        for step_i in 0..60 {
            let r = step_i as f32 * 0.01; // [0, 0.60)
            assert_eq!(band_mask(r, &opts), 0.0, "r = {r}");
        }
    }

    #[test]
    fn band_mask_is_bounded_by_the_outer_base() {
        let opts = HaloOptions::default();
        for step_i in 0..200 {
            let r = step_i as f32 * 0.01;
            let m = band_mask(r, &opts);
            assert!(m <= opts.outer_base + 1e-6, "r = {r}, mask = {m}");
        }
    }

    #[test]
    fn intensity_respects_the_clamp() {
        let opts = HaloOptions::default();
        for i in 0..500 {
            let r = (i % 25) as f32 * 0.05;
            let angle = i as f32 * 0.07;
            let t = i as f32 * 0.11;
            let v = intensity(r, angle, t, &opts);
            assert!(v >= opts.intensity_clamp[0]);
            assert!(v <= opts.intensity_clamp[1]);
        }
    }

    #[test]
    fn falloff_is_zero_at_the_center() {
        let opts = HaloOptions::default();
        assert_eq!(falloff(0.0, &opts), 0.0);
        assert_eq!(falloff(opts.falloff_start, &opts), 0.0);
        assert_eq!(falloff(opts.falloff_end, &opts), 1.0);
    }

    #[test]
    fn shade_alpha_is_intensity_times_falloff() {
        let opts = HaloOptions::default();
        let uv = [0.85f32, 0.4];
        let t = 3.2f32;
        let out = shade(uv, t, &opts);

        let p = [uv[0] - opts.center_offset, uv[1] - opts.center_offset];
        let r = (p[0] * p[0] + p[1] * p[1]).sqrt();
        let angle = p[1].atan2(p[0]);
        let expected = intensity(r, angle, t, &opts) * falloff(r, &opts);
        assert!((out[3] - expected).abs() < 1e-6);
    }

    #[test]
    fn shade_is_deterministic() {
        let opts = HaloOptions::default();
        let a = shade([0.3, 0.7], 5.5, &opts);
        let b = shade([0.3, 0.7], 5.5, &opts);
        assert_eq!(a, b);
    }

    #[test]
    fn smoothstep_matches_hermite_endpoints() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
    }
}

//! HDR-to-SDR tone mapping.
//!
//! Both operators compute a gain from the pixel's luminance and apply it
//! to all three channels, which keeps hue stable. Luminance uses the
//! Rec.2020 weights since the HDR sources these curves serve live in
//! that container.
//!
//! Inputs are linear, scaled so SDR reference white is 1.0; `headroom`
//! is the source peak in those units (e.g. 4.0 for 4x SDR white). Output
//! luminance lands in [0, 1].

use wide::{CmpGt, f32x8};

/// Rec.2020 luminance weights.
const LUMA_R: f32 = 0.2627;
const LUMA_G: f32 = 0.6780;
const LUMA_B: f32 = 0.0593;

/// Curvature constant for the logarithmic mapper.
const LOG_SHAPE: f32 = 8.0;

/// Tone-mapping operator selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneMapper {
    /// BT.2408-style extended Reinhard: leaves shadows untouched and
    /// rolls highlights off toward the peak.
    Rec2408,
    /// Logarithmic compression of the whole range.
    Logarithmic,
}

impl ToneMapper {
    /// Gain for a single luminance value.
    #[inline]
    fn gain(self, y: f32, headroom: f32) -> f32 {
        match self {
            Self::Rec2408 => {
                let inv_p2 = 1.0 / (headroom * headroom);
                (1.0 + y * inv_p2) / (1.0 + y)
            }
            Self::Logarithmic => {
                if y <= 0.0 {
                    1.0
                } else {
                    let norm = (LOG_SHAPE * headroom).ln_1p();
                    (LOG_SHAPE * y).ln_1p() / (norm * y)
                }
            }
        }
    }

    /// Gain for 8 luminance lanes.
    #[inline]
    fn gain_x8(self, y: f32x8, headroom: f32) -> f32x8 {
        let one = f32x8::splat(1.0);
        match self {
            Self::Rec2408 => {
                let inv_p2 = f32x8::splat(1.0 / (headroom * headroom));
                (one + y * inv_p2) / (one + y)
            }
            Self::Logarithmic => {
                let norm = f32x8::splat((LOG_SHAPE * headroom).ln_1p());
                let g = lumen_math::log1p(f32x8::splat(LOG_SHAPE) * y) / (norm * y);
                y.simd_gt(f32x8::splat(0.0)).blend(g, one)
            }
        }
    }

    /// Maps one linear RGB pixel.
    #[inline]
    pub fn map(self, rgb: [f32; 3], headroom: f32) -> [f32; 3] {
        let y = LUMA_R.mul_add(rgb[0], LUMA_G.mul_add(rgb[1], LUMA_B * rgb[2]));
        let g = self.gain(y, headroom);
        [rgb[0] * g, rgb[1] * g, rgb[2] * g]
    }

    /// Maps 8 lane-packed linear RGB pixels.
    #[inline]
    pub fn map_x8(
        self,
        r: f32x8,
        g: f32x8,
        b: f32x8,
        headroom: f32,
    ) -> (f32x8, f32x8, f32x8) {
        let y = f32x8::splat(LUMA_R).mul_add(
            r,
            f32x8::splat(LUMA_G).mul_add(g, f32x8::splat(LUMA_B) * b),
        );
        let gain = self.gain_x8(y, headroom);
        (r * gain, g * gain, b * gain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rec2408_endpoints() {
        // Shadows pass through nearly unchanged.
        let dark = ToneMapper::Rec2408.map([0.01, 0.01, 0.01], 4.0);
        assert!((dark[0] - 0.01).abs() < 1e-3);
        // Peak white maps to (about) SDR white.
        let peak = ToneMapper::Rec2408.map([4.0, 4.0, 4.0], 4.0);
        assert!((peak[0] - 1.0).abs() < 0.05, "peak -> {}", peak[0]);
    }

    #[test]
    fn test_rec2408_monotonic() {
        let mut prev = -1.0f32;
        for i in 0..400 {
            let y = i as f32 * 0.01;
            let out = ToneMapper::Rec2408.map([y, y, y], 4.0)[0];
            assert!(out >= prev, "not monotonic at y={y}");
            prev = out;
        }
    }

    #[test]
    fn test_logarithmic_range() {
        let peak = ToneMapper::Logarithmic.map([4.0, 4.0, 4.0], 4.0);
        assert!((peak[0] - 1.0).abs() < 1e-4);
        let zero = ToneMapper::Logarithmic.map([0.0, 0.0, 0.0], 4.0);
        assert_eq!(zero[0], 0.0);
        for i in 1..400 {
            let y = i as f32 * 0.01;
            let out = ToneMapper::Logarithmic.map([y, y, y], 4.0)[0];
            assert!(out > 0.0 && out <= 1.0 + 1e-5, "y={y} -> {out}");
        }
    }

    #[test]
    fn test_hue_preserved() {
        // Per-pixel gain keeps channel ratios.
        let rgb = [2.0f32, 1.0, 0.5];
        for tm in [ToneMapper::Rec2408, ToneMapper::Logarithmic] {
            let out = tm.map(rgb, 4.0);
            assert!((out[0] / out[1] - 2.0).abs() < 1e-4, "{tm:?}");
            assert!((out[1] / out[2] - 2.0).abs() < 1e-4, "{tm:?}");
        }
    }

    #[test]
    fn test_lanes_match_scalar() {
        let rs = [0.0f32, 0.1, 0.5, 1.0, 2.0, 3.0, 3.9, 0.25];
        let gs = [0.1f32, 0.1, 0.4, 0.9, 1.5, 2.5, 3.9, 0.20];
        let bs = [0.2f32, 0.1, 0.3, 0.8, 1.0, 2.0, 3.9, 0.15];
        for tm in [ToneMapper::Rec2408, ToneMapper::Logarithmic] {
            let (r, g, b) = tm.map_x8(f32x8::new(rs), f32x8::new(gs), f32x8::new(bs), 4.0);
            let (r, g, b) = (r.to_array(), g.to_array(), b.to_array());
            for i in 0..8 {
                let s = tm.map([rs[i], gs[i], bs[i]], 4.0);
                assert!((r[i] - s[0]).abs() < 1e-5, "{tm:?} lane {i}");
                assert!((g[i] - s[1]).abs() < 1e-5, "{tm:?} lane {i}");
                assert!((b[i] - s[2]).abs() < 1e-5, "{tm:?} lane {i}");
            }
        }
    }
}

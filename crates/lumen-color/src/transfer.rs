//! Transfer functions (EOTF/OETF): sRGB, PQ (SMPTE ST 2084), HLG.
//!
//! Each curve ships a scalar form and a lane form (`*_x8`). The lane
//! forms route their pow/log/exp through `lumen-math` so a pixel batch
//! never leaves vector registers.
//!
//! # Terminology
//!
//! - **EOTF**: encoded signal -> linear light (display direction)
//! - **OETF**: linear light -> encoded signal (encode direction)
//!
//! PQ works in absolute luminance (cd/m2, up to 10,000); sRGB and HLG
//! are relative [0, 1] curves.

use wide::{CmpGt, f32x8};

/// sRGB (IEC 61966-2-1) piecewise curve.
pub mod srgb {
    use super::*;

    /// sRGB EOTF: encoded [0, 1] to linear [0, 1].
    #[inline]
    pub fn eotf(v: f32) -> f32 {
        if v <= 0.04045 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    }

    /// sRGB OETF: linear [0, 1] to encoded [0, 1].
    #[inline]
    pub fn oetf(l: f32) -> f32 {
        if l <= 0.003_130_8 {
            12.92 * l
        } else {
            1.055 * l.powf(1.0 / 2.4) - 0.055
        }
    }

    /// Lane form of [`eotf`].
    #[inline]
    pub fn eotf_x8(v: f32x8) -> f32x8 {
        let lin = v * f32x8::splat(1.0 / 12.92);
        let p = lumen_math::pow(
            (v + f32x8::splat(0.055)) * f32x8::splat(1.0 / 1.055),
            f32x8::splat(2.4),
        );
        v.simd_gt(f32x8::splat(0.04045)).blend(p, lin)
    }

    /// Lane form of [`oetf`].
    #[inline]
    pub fn oetf_x8(l: f32x8) -> f32x8 {
        let lin = l * f32x8::splat(12.92);
        let p = lumen_math::pow(l, f32x8::splat(1.0 / 2.4))
            .mul_add(f32x8::splat(1.055), f32x8::splat(-0.055));
        l.simd_gt(f32x8::splat(0.003_130_8)).blend(p, lin)
    }
}

/// SMPTE ST 2084 Perceptual Quantizer.
pub mod pq {
    use super::*;

    /// Maximum luminance in cd/m2 (nits).
    pub const L_MAX: f32 = 10000.0;

    const M1: f32 = 2610.0 / 16384.0;
    const M2: f32 = 2523.0 / 4096.0 * 128.0;
    const C1: f32 = 3424.0 / 4096.0;
    const C2: f32 = 2413.0 / 4096.0 * 32.0;
    const C3: f32 = 2392.0 / 4096.0 * 32.0;

    /// PQ EOTF: encoded [0, 1] to absolute luminance in cd/m2.
    #[inline]
    pub fn eotf(v: f32) -> f32 {
        if v <= 0.0 {
            return 0.0;
        }
        let vp = v.powf(1.0 / M2);
        let num = (vp - C1).max(0.0);
        let den = C2 - C3 * vp;
        L_MAX * (num / den).powf(1.0 / M1)
    }

    /// PQ OETF: absolute luminance [0, 10000] cd/m2 to encoded [0, 1].
    #[inline]
    pub fn oetf(l: f32) -> f32 {
        if l <= 0.0 {
            return 0.0;
        }
        let y = (l / L_MAX).clamp(0.0, 1.0);
        let yp = y.powf(M1);
        let num = C1 + C2 * yp;
        let den = 1.0 + C3 * yp;
        (num / den).powf(M2)
    }

    /// Lane form of [`eotf`].
    #[inline]
    pub fn eotf_x8(v: f32x8) -> f32x8 {
        let zero = f32x8::splat(0.0);
        let vc = v.max(zero);
        let vp = lumen_math::pow(vc, f32x8::splat(1.0 / M2));
        let num = (vp - f32x8::splat(C1)).max(zero);
        let den = f32x8::splat(C2) - f32x8::splat(C3) * vp;
        let r = f32x8::splat(L_MAX) * lumen_math::pow(num / den, f32x8::splat(1.0 / M1));
        v.simd_gt(zero).blend(r, zero)
    }

    /// Lane form of [`oetf`].
    #[inline]
    pub fn oetf_x8(l: f32x8) -> f32x8 {
        let zero = f32x8::splat(0.0);
        let y = (l * f32x8::splat(1.0 / L_MAX)).max(zero).min(f32x8::splat(1.0));
        let yp = lumen_math::pow(y, f32x8::splat(M1));
        let num = f32x8::splat(C1) + f32x8::splat(C2) * yp;
        let den = f32x8::splat(1.0) + f32x8::splat(C3) * yp;
        let r = lumen_math::pow(num / den, f32x8::splat(M2));
        l.simd_gt(zero).blend(r, zero)
    }
}

/// Hybrid Log-Gamma (ITU-R BT.2100).
pub mod hlg {
    use super::*;

    const A: f32 = 0.178_832_77;
    const B: f32 = 0.284_668_92; // 1 - 4*A
    const C: f32 = 0.559_910_73; // 0.5 - A*ln(4*A)

    /// HLG OETF: linear scene light [0, 1] to encoded [0, 1].
    #[inline]
    pub fn oetf(e: f32) -> f32 {
        if e <= 0.0 {
            0.0
        } else if e <= 1.0 / 12.0 {
            (3.0 * e).sqrt()
        } else {
            A * (12.0 * e - B).ln() + C
        }
    }

    /// HLG inverse OETF: encoded [0, 1] to linear scene light [0, 1].
    #[inline]
    pub fn eotf(ep: f32) -> f32 {
        if ep <= 0.0 {
            0.0
        } else if ep <= 0.5 {
            ep * ep / 3.0
        } else {
            (((ep - C) / A).exp() + B) / 12.0
        }
    }

    /// Lane form of [`oetf`].
    #[inline]
    pub fn oetf_x8(e: f32x8) -> f32x8 {
        let zero = f32x8::splat(0.0);
        let sq = (f32x8::splat(3.0) * e).sqrt();
        let lg = lumen_math::log(e.mul_add(f32x8::splat(12.0), f32x8::splat(-B)))
            .mul_add(f32x8::splat(A), f32x8::splat(C));
        let r = e.simd_gt(f32x8::splat(1.0 / 12.0)).blend(lg, sq);
        e.simd_gt(zero).blend(r, zero)
    }

    /// Lane form of [`eotf`].
    #[inline]
    pub fn eotf_x8(ep: f32x8) -> f32x8 {
        let zero = f32x8::splat(0.0);
        let sq = ep * ep * f32x8::splat(1.0 / 3.0);
        let ex = (lumen_math::exp((ep - f32x8::splat(C)) * f32x8::splat(1.0 / A))
            + f32x8::splat(B))
            * f32x8::splat(1.0 / 12.0);
        let r = ep.simd_gt(f32x8::splat(0.5)).blend(ex, sq);
        ep.simd_gt(zero).blend(r, zero)
    }
}

/// Selector for the transfer curve of a display output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferCurve {
    /// sRGB piecewise curve (also used for Display P3 outputs).
    Srgb,
    /// SMPTE ST 2084 PQ (absolute luminance, Rec.2020 HDR outputs).
    Pq,
    /// Hybrid Log-Gamma (relative luminance HDR outputs).
    Hlg,
}

impl TransferCurve {
    /// Decodes one encoded value to linear.
    #[inline]
    pub fn eotf(self, v: f32) -> f32 {
        match self {
            Self::Srgb => srgb::eotf(v),
            Self::Pq => pq::eotf(v),
            Self::Hlg => hlg::eotf(v),
        }
    }

    /// Encodes one linear value.
    #[inline]
    pub fn oetf(self, l: f32) -> f32 {
        match self {
            Self::Srgb => srgb::oetf(l),
            Self::Pq => pq::oetf(l),
            Self::Hlg => hlg::oetf(l),
        }
    }

    /// Decodes 8 lanes.
    #[inline]
    pub fn eotf_x8(self, v: f32x8) -> f32x8 {
        match self {
            Self::Srgb => srgb::eotf_x8(v),
            Self::Pq => pq::eotf_x8(v),
            Self::Hlg => hlg::eotf_x8(v),
        }
    }

    /// Encodes 8 lanes.
    #[inline]
    pub fn oetf_x8(self, l: f32x8) -> f32x8 {
        match self {
            Self::Srgb => srgb::oetf_x8(l),
            Self::Pq => pq::oetf_x8(l),
            Self::Hlg => hlg::oetf_x8(l),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spread() -> [f32; 8] {
        [0.0, 0.01, 0.04, 0.1, 0.25, 0.5, 0.75, 1.0]
    }

    #[test]
    fn test_srgb_round_trip() {
        for i in 0..=100 {
            let l = i as f32 / 100.0;
            let back = srgb::eotf(srgb::oetf(l));
            assert!((back - l).abs() < 1e-5, "l={l}, back={back}");
        }
    }

    #[test]
    fn test_srgb_lanes_match_scalar() {
        let vs = spread();
        let e = srgb::eotf_x8(f32x8::new(vs)).to_array();
        let o = srgb::oetf_x8(f32x8::new(vs)).to_array();
        for i in 0..8 {
            assert!((e[i] - srgb::eotf(vs[i])).abs() < 1e-6, "eotf({})", vs[i]);
            assert!((o[i] - srgb::oetf(vs[i])).abs() < 1e-6, "oetf({})", vs[i]);
        }
    }

    #[test]
    fn test_pq_reference_white() {
        // 100 nits lands around 0.508 in PQ.
        let signal = pq::oetf(100.0);
        assert!((signal - 0.508).abs() < 0.01);
        let nits = pq::eotf(0.508);
        assert!((nits - 100.0).abs() < 1.0);
    }

    #[test]
    fn test_pq_round_trip() {
        for &l in &[0.0f32, 0.1, 1.0, 10.0, 100.0, 1000.0, 10000.0] {
            let back = pq::eotf(pq::oetf(l));
            assert!((back - l).abs() < l * 0.001 + 0.001, "l={l}, back={back}");
        }
    }

    #[test]
    fn test_pq_lanes_match_scalar() {
        let vs = spread();
        let e = pq::eotf_x8(f32x8::new(vs)).to_array();
        for i in 0..8 {
            let s = pq::eotf(vs[i]);
            assert!(
                (e[i] - s).abs() < s.abs() * 1e-4 + 1e-3,
                "pq eotf({}): {} vs {}",
                vs[i],
                e[i],
                s
            );
        }
        let nits = [0.0f32, 1.0, 10.0, 100.0, 500.0, 1000.0, 5000.0, 10000.0];
        let o = pq::oetf_x8(f32x8::new(nits)).to_array();
        for i in 0..8 {
            let s = pq::oetf(nits[i]);
            assert!((o[i] - s).abs() < 1e-4, "pq oetf({}): {} vs {}", nits[i], o[i], s);
        }
    }

    #[test]
    fn test_hlg_round_trip_and_boundaries() {
        for i in 0..=100 {
            let e = i as f32 / 100.0;
            let back = hlg::eotf(hlg::oetf(e));
            assert!((back - e).abs() < 1e-4, "e={e}, back={back}");
        }
        assert_eq!(hlg::oetf(0.0), 0.0);
        assert!((hlg::oetf(1.0) - 1.0).abs() < 1e-6);
        assert_eq!(hlg::eotf(0.0), 0.0);
        assert!((hlg::eotf(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_hlg_lanes_match_scalar() {
        let vs = spread();
        let e = hlg::eotf_x8(f32x8::new(vs)).to_array();
        let o = hlg::oetf_x8(f32x8::new(vs)).to_array();
        for i in 0..8 {
            assert!((e[i] - hlg::eotf(vs[i])).abs() < 1e-5, "hlg eotf({})", vs[i]);
            assert!((o[i] - hlg::oetf(vs[i])).abs() < 1e-5, "hlg oetf({})", vs[i]);
        }
    }

    #[test]
    fn test_curve_selector_dispatch() {
        assert_eq!(TransferCurve::Srgb.eotf(0.5), srgb::eotf(0.5));
        assert_eq!(TransferCurve::Pq.eotf(0.5), pq::eotf(0.5));
        assert_eq!(TransferCurve::Hlg.oetf(0.5), hlg::oetf(0.5));
        let v = f32x8::splat(0.3);
        assert_eq!(
            TransferCurve::Hlg.eotf_x8(v).to_array(),
            hlg::eotf_x8(v).to_array()
        );
    }
}

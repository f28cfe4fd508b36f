//! End-to-end pipeline checks: decode, gamut-convert, tone map, encode,
//! comparing the lane path against the scalar path pixel by pixel.

use approx::assert_relative_eq;
use lumen_color::{ColorMatrix, REC2020, SRGB, ToneMapper, TransferCurve, f32x8};

fn test_pixels() -> Vec<[f32; 3]> {
    let mut v = Vec::new();
    for i in 0..64 {
        let t = i as f32 / 63.0;
        v.push(match i % 4 {
            0 => [t, t, t],
            1 => [t, 0.2, 0.8 - 0.5 * t],
            2 => [0.9 - t * 0.6, t, 0.1],
            _ => [0.05, 0.9 - t * 0.3, t],
        });
    }
    v
}

#[test]
fn lane_pipeline_matches_scalar_pipeline() {
    let m = ColorMatrix::rgb_to_rgb(&REC2020, &SRGB).unwrap();
    let pixels = test_pixels();

    for chunk in pixels.chunks_exact(8) {
        let mut r = [0.0f32; 8];
        let mut g = [0.0f32; 8];
        let mut b = [0.0f32; 8];
        for (i, p) in chunk.iter().enumerate() {
            r[i] = p[0];
            g[i] = p[1];
            b[i] = p[2];
        }

        // Lane path.
        let (lr, lg, lb) = (
            TransferCurve::Hlg.eotf_x8(f32x8::new(r)),
            TransferCurve::Hlg.eotf_x8(f32x8::new(g)),
            TransferCurve::Hlg.eotf_x8(f32x8::new(b)),
        );
        let (lr, lg, lb) = m.transform_x8(lr, lg, lb);
        let (lr, lg, lb) = ToneMapper::Rec2408.map_x8(lr, lg, lb, 4.0);
        let out = (
            TransferCurve::Srgb.oetf_x8(lr.max(f32x8::splat(0.0))).to_array(),
            TransferCurve::Srgb.oetf_x8(lg.max(f32x8::splat(0.0))).to_array(),
            TransferCurve::Srgb.oetf_x8(lb.max(f32x8::splat(0.0))).to_array(),
        );

        // Scalar path.
        for (i, p) in chunk.iter().enumerate() {
            let lin = p.map(|v| TransferCurve::Hlg.eotf(v));
            let conv = m.transform(lin);
            let tm = ToneMapper::Rec2408.map(conv, 4.0);
            let enc = tm.map(|v| TransferCurve::Srgb.oetf(v.max(0.0)));
            assert_relative_eq!(out.0[i], enc[0], epsilon = 1e-4);
            assert_relative_eq!(out.1[i], enc[1], epsilon = 1e-4);
            assert_relative_eq!(out.2[i], enc[2], epsilon = 1e-4);
        }
    }
}

#[test]
fn gamut_round_trip_preserves_pixels() {
    let fwd = ColorMatrix::rgb_to_rgb(&SRGB, &REC2020).unwrap();
    let back = ColorMatrix::rgb_to_rgb(&REC2020, &SRGB).unwrap();
    for p in test_pixels() {
        let q = back.transform(fwd.transform(p));
        for c in 0..3 {
            assert_relative_eq!(q[c], p[c], epsilon = 1e-4);
        }
    }
}

#[test]
fn pq_encode_of_tone_mapped_peak_stays_in_range() {
    let peak = ToneMapper::Rec2408.map([4.0, 4.0, 4.0], 4.0);
    for v in peak {
        // SDR white is 203 nits in the BT.2408 convention.
        let signal = TransferCurve::Pq.oetf(v * 203.0);
        assert!((0.0..=1.0).contains(&signal));
    }
}

//! Inverse trigonometric functions: asin / acos / atan / atan2.
//!
//! asin and acos split at |x| = 0.5: below, the polynomial runs on x^2
//! directly; above, on (1 - |x|)/2 with a square root and the half-angle
//! identities. atan folds its argument into [0, 1] by reciprocal and
//! tracks the octant; atan2 runs the same kernel on a quotient (a
//! double-float quotient in the precise tier) plus pi/2-multiple quadrant
//! corrections.
//!
//! Out-of-domain inputs yield NaN. Signed zeros follow IEEE: the sign of
//! `atan2(+-0, x)` comes from y, and `atan2(+-0, -1)` is +-pi.

use wide::{CmpEq, CmpGt, CmpLt, f32x8, i32x8};

use crate::df::DoubleFloat;
use crate::lanes::{flip_sign, is_inf_mask, is_nan_mask, mask_or, mask_to_int, mulsign};
use crate::poly::{poly5, poly8};

/// Correction polynomial: `asin(x) ~= x + x * x2 * P(x2)`.
#[inline(always)]
fn asin_poly(x2: f32x8) -> f32x8 {
    let x4 = x2 * x2;
    poly5(
        x2,
        x4,
        x4 * x4,
        4.197_454_825e-2,
        2.424_046_025e-2,
        4.547_423_869e-2,
        7.495_029_271e-2,
        1.666_677_296e-1,
    )
}

/// asin, fast tier (within 3.5 ULP).
pub fn asin_fast(d: f32x8) -> f32x8 {
    let half = f32x8::splat(0.5);
    let o = d.abs().simd_lt(half);
    let x2 = o.blend(d * d, (f32x8::splat(1.0) - d.abs()) * half);
    let x = o.blend(d.abs(), x2.sqrt());

    let u = asin_poly(x2);
    let u = u.mul_add(x * x2, x);
    let r = o.blend(
        u,
        u.mul_add(f32x8::splat(-2.0), f32x8::splat(std::f32::consts::FRAC_PI_2)),
    );
    mulsign(r, d)
}

/// asin, precise tier (targeting 1 ULP).
pub fn asin(d: f32x8) -> f32x8 {
    let zero = f32x8::splat(0.0);
    let half = f32x8::splat(0.5);
    let one = f32x8::splat(1.0);

    let o = d.abs().simd_lt(half);
    let x2 = o.blend(d * d, (one - d.abs()) * half);

    let sq = DoubleFloat::sqrt_lanes(x2);
    let x = DoubleFloat::new(o.blend(d.abs(), sq.hi), o.blend(zero, sq.lo));
    let at_one = d.abs().simd_eq(one);
    let x = DoubleFloat::new(at_one.blend(zero, x.hi), at_one.blend(zero, x.lo));

    let u = asin_poly(x2) * x2 * x.hi;

    let y = DoubleFloat::splat_f64(std::f64::consts::FRAC_PI_4)
        .sub(x)
        .add_lanes(-u);
    let r = o.blend(u + x.hi, y.collapse() * f32x8::splat(2.0));
    mulsign(r, d)
}

/// acos, fast tier (within 3.5 ULP).
pub fn acos_fast(d: f32x8) -> f32x8 {
    let zero = f32x8::splat(0.0);
    let half = f32x8::splat(0.5);
    let one = f32x8::splat(1.0);

    let o = d.abs().simd_lt(half);
    let x2 = o.blend(d * d, (one - d.abs()) * half);
    let x = o.blend(d.abs(), x2.sqrt());
    let x = d.abs().simd_eq(one).blend(zero, x);

    let u = asin_poly(x2) * x2 * x;

    let small = f32x8::splat(std::f32::consts::FRAC_PI_2) - mulsign(x + u, d);
    let w = (x + u) * f32x8::splat(2.0);
    let big = d
        .simd_lt(zero)
        .blend(f32x8::splat(std::f32::consts::PI) - w, w);
    o.blend(small, big)
}

/// acos, precise tier (targeting 1 ULP).
pub fn acos(d: f32x8) -> f32x8 {
    let zero = f32x8::splat(0.0);
    let half = f32x8::splat(0.5);
    let one = f32x8::splat(1.0);

    let o = d.abs().simd_lt(half);
    let x2 = o.blend(d * d, (one - d.abs()) * half);

    let sq = DoubleFloat::sqrt_lanes(x2);
    let x = DoubleFloat::new(o.blend(d.abs(), sq.hi), o.blend(zero, sq.lo));
    let at_one = d.abs().simd_eq(one);
    let x = DoubleFloat::new(at_one.blend(zero, x.hi), at_one.blend(zero, x.lo));

    let u = asin_poly(x2) * x2 * x.hi;

    let y = DoubleFloat::splat_f64(std::f64::consts::FRAC_PI_2)
        .sub(DoubleFloat::from_sum_fast(mulsign(x.hi, d), mulsign(u, d)));
    let small = y.collapse();

    let w = x.add_lanes(u).scale(f32x8::splat(2.0));
    let big = DoubleFloat::splat_f64(std::f64::consts::PI).sub(w);
    let big = d.simd_lt(zero).blend(big.collapse(), w.collapse());
    o.blend(small, big)
}

/// Shared fast-tier atan kernel for `y/x` with `y >= 0`; returns the
/// angle with the quadrant already folded in as pi/2 multiples.
fn atan2k_fast(y: f32x8, x: f32x8) -> f32x8 {
    let zero = f32x8::splat(0.0);

    let neg = x.simd_lt(zero);
    let mut q = mask_to_int(neg) & i32x8::splat(-2);
    let x = x.abs();

    let p = x.simd_lt(y);
    q = q + (mask_to_int(p) & i32x8::splat(1));
    let s = p.blend(-x, y);
    let t = p.blend(y, x);

    let s = s / t;
    let tt = s * s;
    let t2 = tt * tt;
    let u = poly8(
        tt,
        t2,
        t2 * t2,
        2.823_638_962_581_753_7e-3,
        -1.595_690_287_649_631_5e-2,
        4.250_498_861_074_447_6e-2,
        -7.489_009_201_526_641_8e-2,
        1.063_479_334_115_982_1e-1,
        -1.420_273_631_811_141_968e-1,
        1.999_269_574_880_599_976e-1,
        -3.333_310_186_862_945_557e-1,
    );
    let r = tt.mul_add(u * s, s);
    f32x8::from_i32x8(q).mul_add(f32x8::splat(std::f32::consts::FRAC_PI_2), r)
}

/// Double-float atan kernel for `y/x` with `y >= 0`.
fn atan2k_df(y: DoubleFloat, x: DoubleFloat) -> DoubleFloat {
    let zero = f32x8::splat(0.0);
    let one = f32x8::splat(1.0);

    let neg = x.hi.simd_lt(zero);
    let mut q = mask_to_int(neg) & i32x8::splat(-2);
    let x = DoubleFloat::new(flip_sign(x.hi, neg), flip_sign(x.lo, neg));

    let p = x.hi.simd_lt(y.hi);
    q = q + (mask_to_int(p) & i32x8::splat(1));
    let nx = x.neg();
    let s = DoubleFloat::new(p.blend(nx.hi, y.hi), p.blend(nx.lo, y.lo));
    let t = DoubleFloat::new(p.blend(y.hi, x.hi), p.blend(y.lo, x.lo));

    let s = s.div(t);
    let tt = s.square().normalize();

    let mut u = f32x8::splat(-1.763_979_089_446_365_833e-3);
    u = u.mul_add(tt.hi, f32x8::splat(1.079_009_007_662_534_714e-2));
    u = u.mul_add(tt.hi, f32x8::splat(-3.095_646_016_299_724_579e-2));
    u = u.mul_add(tt.hi, f32x8::splat(5.773_650_854_825_973_511e-2));
    u = u.mul_add(tt.hi, f32x8::splat(-8.389_507_234_096_527_1e-2));
    u = u.mul_add(tt.hi, f32x8::splat(1.094_635_576_009_750_366e-1));
    u = u.mul_add(tt.hi, f32x8::splat(-1.426_268_219_947_814_941e-1));
    u = u.mul_add(tt.hi, f32x8::splat(1.999_831_944_704_055_786e-1));

    let v = DoubleFloat::from_sum_fast(f32x8::splat(-3.333_328_664_302_825_928e-1), u * tt.hi)
        .mul(tt);
    let w = s.mul(DoubleFloat::from_lanes(one).add_fast(v));

    DoubleFloat::splat_f64(std::f64::consts::FRAC_PI_2)
        .mul_lanes(f32x8::from_i32x8(q))
        .add(w)
}

/// atan, fast tier (within 3.5 ULP).
pub fn atan_fast(d: f32x8) -> f32x8 {
    let one = f32x8::splat(1.0);
    let x = d.abs();
    let big = x.simd_gt(one);
    let x = big.blend(one / x, x);

    let t = x * x;
    let t2 = t * t;
    let u = poly8(
        t,
        t2,
        t2 * t2,
        2.823_638_962_581_753_7e-3,
        -1.595_690_287_649_631_5e-2,
        4.250_498_861_074_447_6e-2,
        -7.489_009_201_526_641_8e-2,
        1.063_479_334_115_982_1e-1,
        -1.420_273_631_811_141_968e-1,
        1.999_269_574_880_599_976e-1,
        -3.333_310_186_862_945_557e-1,
    );
    let r = t.mul_add(u * x, x);
    let r = big.blend(f32x8::splat(std::f32::consts::FRAC_PI_2) - r, r);
    mulsign(r, d)
}

/// atan, precise tier.
pub fn atan(d: f32x8) -> f32x8 {
    let r = atan2k_df(
        DoubleFloat::from_lanes(d.abs()),
        DoubleFloat::from_lanes(f32x8::splat(1.0)),
    )
    .collapse();
    let r = is_inf_mask(d).blend(f32x8::splat(std::f32::consts::FRAC_PI_2), r);
    mulsign(r, d)
}

/// Special-case shell shared by both atan2 tiers.
fn atan2_edges(r: f32x8, y: f32x8, x: f32x8) -> f32x8 {
    let zero = f32x8::splat(0.0);
    let pi = f32x8::splat(std::f32::consts::PI);
    let pi_2 = f32x8::splat(std::f32::consts::FRAC_PI_2);
    let pi_4 = f32x8::splat(std::f32::consts::FRAC_PI_4);

    let x_inf = is_inf_mask(x);
    let x_zero = x.simd_eq(zero);

    let r = mask_or(x_inf, x_zero).blend(pi_2 - x_inf.blend(mulsign(pi_2, x), zero), r);
    let r = is_inf_mask(y).blend(pi_2 - x_inf.blend(mulsign(pi_4, x), zero), r);
    let r = y
        .simd_eq(zero)
        .blend(mulsign(f32x8::splat(1.0), x).simd_eq(f32x8::splat(-1.0)).blend(pi, zero), r);

    let bad = mask_or(is_nan_mask(x), is_nan_mask(y));
    bad.blend(f32x8::splat(f32::NAN), mulsign(r, y))
}

/// atan2, fast tier (within 3.5 ULP). Quadrant corrections and IEEE
/// special cases included.
pub fn atan2_fast(y: f32x8, x: f32x8) -> f32x8 {
    let r = atan2k_fast(y.abs(), x);
    let r = mulsign(r, x);
    atan2_edges(r, y, x)
}

/// atan2, precise tier. Composes a double-float division with the atan
/// kernel before the quadrant correction.
pub fn atan2(y: f32x8, x: f32x8) -> f32x8 {
    // Keep the quotient away from the denormal range.
    let o = x.abs().simd_lt(f32x8::splat(2.938_737_3e-39));
    let scale = f32x8::splat(16_777_216.0);
    let x2 = o.blend(x * scale, x);
    let y2 = o.blend(y * scale, y);

    let r = atan2k_df(DoubleFloat::from_lanes(y2.abs()), DoubleFloat::from_lanes(x2)).collapse();
    let r = mulsign(r, x);
    atan2_edges(r, y, x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lane0(v: f32x8) -> f32 {
        v.to_array()[0]
    }

    fn ulp_err(got: f32, want: f64) -> f64 {
        let wf = want as f32;
        let ulp = (wf.abs().max(f32::MIN_POSITIVE) * f32::EPSILON) as f64;
        ((got as f64) - want).abs() / ulp
    }

    #[test]
    fn test_asin_acos_sweep() {
        for i in -1000..=1000 {
            let x = i as f32 / 1000.0;
            assert!(
                ulp_err(lane0(asin(f32x8::splat(x))), (x as f64).asin()) <= 1.0,
                "asin({x})"
            );
            assert!(
                ulp_err(lane0(acos(f32x8::splat(x))), (x as f64).acos()) <= 1.0,
                "acos({x})"
            );
            assert!(
                ulp_err(lane0(asin_fast(f32x8::splat(x))), (x as f64).asin()) <= 3.5,
                "asin_fast({x})"
            );
            assert!(
                ulp_err(lane0(acos_fast(f32x8::splat(x))), (x as f64).acos()) <= 3.5,
                "acos_fast({x})"
            );
        }
    }

    #[test]
    fn test_asin_acos_edges() {
        let x = f32x8::new([1.0, -1.0, 2.0, -2.0, f32::NAN, 0.0, -0.0, 0.999]);
        let a = asin(x).to_array();
        assert_eq!(a[0], std::f32::consts::FRAC_PI_2);
        assert_eq!(a[1], -std::f32::consts::FRAC_PI_2);
        assert!(a[2].is_nan());
        assert!(a[3].is_nan());
        assert!(a[4].is_nan());
        assert!(a[5] == 0.0 && a[5].is_sign_positive());
        assert!(a[6] == 0.0 && a[6].is_sign_negative());

        let c = acos(x).to_array();
        assert_eq!(c[0], 0.0);
        assert!(ulp_err(c[1], std::f64::consts::PI) <= 1.0);
        assert!(c[2].is_nan());
        assert!(c[4].is_nan());
        assert!(ulp_err(c[5], std::f64::consts::FRAC_PI_2) <= 1.0);
    }

    #[test]
    fn test_atan_sweep() {
        for i in -2000..=2000 {
            let x = i as f32 * 0.017;
            assert!(
                ulp_err(lane0(atan(f32x8::splat(x))), (x as f64).atan()) <= 2.0,
                "atan({x})"
            );
            assert!(
                ulp_err(lane0(atan_fast(f32x8::splat(x))), (x as f64).atan()) <= 3.5,
                "atan_fast({x})"
            );
        }
        for &x in &[1e10f32, -1e10, 1e30, -1e30, 3.0e38] {
            assert!(
                ulp_err(lane0(atan(f32x8::splat(x))), (x as f64).atan()) <= 2.0,
                "atan({x})"
            );
        }
    }

    #[test]
    fn test_atan_edges() {
        let x = f32x8::new([
            f32::INFINITY,
            f32::NEG_INFINITY,
            0.0,
            -0.0,
            1.0,
            -1.0,
            f32::NAN,
            1000.0,
        ]);
        let r = atan(x).to_array();
        assert_eq!(r[0], std::f32::consts::FRAC_PI_2);
        assert_eq!(r[1], -std::f32::consts::FRAC_PI_2);
        assert!(r[2] == 0.0 && r[2].is_sign_positive());
        assert!(r[3] == 0.0 && r[3].is_sign_negative());
        assert!(ulp_err(r[4], std::f64::consts::FRAC_PI_4) <= 1.0);
        assert!(r[6].is_nan());
    }

    #[test]
    fn test_atan2_quadrants() {
        let ys = [1.0f32, 1.0, -1.0, -1.0, 2.0, -3.0, 0.5, -0.5];
        let xs = [1.0f32, -1.0, 1.0, -1.0, -0.5, 0.7, 3.0, -4.0];
        let r = atan2(f32x8::new(ys), f32x8::new(xs)).to_array();
        let rf = atan2_fast(f32x8::new(ys), f32x8::new(xs)).to_array();
        for i in 0..8 {
            let want = (ys[i] as f64).atan2(xs[i] as f64);
            assert!(ulp_err(r[i], want) <= 2.0, "atan2({},{})", ys[i], xs[i]);
            assert!(ulp_err(rf[i], want) <= 3.5, "atan2_fast({},{})", ys[i], xs[i]);
        }
    }

    #[test]
    fn test_atan2_signed_zero_and_inf() {
        let ys = [0.0f32, -0.0, 0.0, -0.0, 1.0, -1.0, f32::INFINITY, f32::INFINITY];
        let xs = [
            -1.0f32,
            -1.0,
            1.0,
            1.0,
            0.0,
            0.0,
            f32::INFINITY,
            f32::NEG_INFINITY,
        ];
        for (r, tier) in [
            (atan2(f32x8::new(ys), f32x8::new(xs)).to_array(), "precise"),
            (atan2_fast(f32x8::new(ys), f32x8::new(xs)).to_array(), "fast"),
        ] {
            assert_eq!(r[0], std::f32::consts::PI, "{tier}");
            assert_eq!(r[1], -std::f32::consts::PI, "{tier}");
            assert!(r[2] == 0.0 && r[2].is_sign_positive(), "{tier}");
            assert!(r[3] == 0.0 && r[3].is_sign_negative(), "{tier}");
            assert_eq!(r[4], std::f32::consts::FRAC_PI_2, "{tier}");
            assert_eq!(r[5], -std::f32::consts::FRAC_PI_2, "{tier}");
            assert!(ulp_err(r[6], std::f64::consts::FRAC_PI_4) <= 1.0, "{tier}");
            assert!(
                ulp_err(r[7], 3.0 * std::f64::consts::FRAC_PI_4) <= 1.0,
                "{tier}"
            );
        }
        let nan = atan2(f32x8::splat(f32::NAN), f32x8::splat(1.0)).to_array();
        assert!(nan[0].is_nan());
    }

    #[test]
    fn test_atan2_matches_atan_of_ratio() {
        for &(y, x) in &[(1.0f32, 2.0), (3.0, 0.4), (0.01, 5.0), (7.0, 7.0)] {
            let a = lane0(atan2(f32x8::splat(y), f32x8::splat(x)));
            let b = lane0(atan(f32x8::splat(y / x)));
            assert!((a - b).abs() <= 2.0 * f32::EPSILON, "({y},{x}): {a} vs {b}");
        }
    }
}

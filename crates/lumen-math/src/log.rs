//! Logarithm family: `log`, `log_fast`, `log1p`, `log2`.
//!
//! All variants share the same frame: prescale denormals by 2^64, pull
//! the exponent with the `1/0.75` trick so the mantissa lands in
//! [0.75, 1.5), transform through `(m-1)/(m+1)`, and evaluate an odd
//! polynomial in the square. The precise tier keeps the transform and the
//! accumulation in double-float; the fast tier stays in plain lanes.

use wide::{CmpEq, CmpGt, CmpLt, f32x8, i32x8};

use crate::df::DoubleFloat;
use crate::lanes::{
    ilogb2k, is_nan_mask, is_neg_zero_mask, ldexp3k, mask_or, mask_to_int, pow2i,
};
use crate::poly::{poly3, poly4, poly5};

/// 2^64, the denormal prescale factor.
const SCALE_UP: f32 = 1.844_674_4e19;

/// Shared exponent/mantissa frame: returns (m, e) with `d = m * 2^e`,
/// m in [0.75, 1.5), denormals already folded into e.
#[inline(always)]
fn split_mantissa(d: f32x8) -> (f32x8, i32x8) {
    let o = d.simd_lt(f32x8::splat(f32::MIN_POSITIVE));
    let d = o.blend(d * f32x8::splat(SCALE_UP), d);
    let e = ilogb2k(d * f32x8::splat(1.0 / 0.75));
    let m = ldexp3k(d, -e);
    let e = mask_to_int(o).blend(e - i32x8::splat(64), e);
    (m, e)
}

/// Shared special-case tail for log-like functions of `d`.
#[inline(always)]
fn log_edges(d: f32x8, r: f32x8) -> f32x8 {
    let r = d
        .simd_eq(f32x8::splat(f32::INFINITY))
        .blend(f32x8::splat(f32::INFINITY), r);
    let r = mask_or(d.simd_lt(f32x8::splat(0.0)), is_nan_mask(d))
        .blend(f32x8::splat(f32::NAN), r);
    d.simd_eq(f32x8::splat(0.0))
        .blend(f32x8::splat(f32::NEG_INFINITY), r)
}

/// Natural logarithm, targeting 1 ULP.
///
/// `log(0)` and `log(-0)` are -Inf; negative inputs and NaN give NaN.
pub fn log(d: f32x8) -> f32x8 {
    let (m, e) = split_mantissa(d);
    let ef = f32x8::from_i32x8(e);

    let x = DoubleFloat::from_sum(m, f32x8::splat(-1.0))
        .div(DoubleFloat::from_sum(m, f32x8::splat(1.0)));
    let x2 = x.hi * x.hi;

    let t = poly3(x2, x2 * x2, 0.302_729_49, 0.399_610_82, 0.666_669_49);

    let s = DoubleFloat::splat_f64(std::f64::consts::LN_2)
        .mul_lanes(ef)
        .add(x.scale(f32x8::splat(2.0)))
        .add_lanes(x2 * x.hi * t);

    log_edges(d, s.collapse())
}

/// Natural logarithm, fast tier (within 3.5 ULP).
pub fn log_fast(d: f32x8) -> f32x8 {
    let (m, e) = split_mantissa(d);
    let ef = f32x8::from_i32x8(e);

    let x = (m - f32x8::splat(1.0)) / (m + f32x8::splat(1.0));
    let x2 = x * x;
    let x4 = x2 * x2;

    let t = poly5(
        x2,
        x4,
        x4 * x4,
        0.239_282_85,
        0.285_182_12,
        0.400_005_88,
        0.666_666_69,
        2.0,
    );

    let r = x.mul_add(t, f32x8::splat(std::f32::consts::LN_2) * ef);
    log_edges(d, r)
}

/// ln(1 + d) without cancellation for small d, targeting 1 ULP.
///
/// `log1p(-1)` is -Inf, inputs below -1 give NaN, and -0 stays -0.
pub fn log1p(d: f32x8) -> f32x8 {
    let one = f32x8::splat(1.0);
    let dp1 = d + one;

    let o = dp1.simd_lt(f32x8::splat(f32::MIN_POSITIVE));
    let dp1s = o.blend(dp1 * f32x8::splat(SCALE_UP), dp1);
    let e = ilogb2k(dp1s * f32x8::splat(1.0 / 0.75));
    let e = mask_to_int(o).blend(e - i32x8::splat(64), e);
    let ef = f32x8::from_i32x8(e);

    // m = (1 + d) * 2^-e - 1 without rounding the +1 first.
    let t = pow2i(-e);
    let m = d.mul_add(t, t - one);

    let x = DoubleFloat::from_lanes(m).div(DoubleFloat::from_sum(f32x8::splat(2.0), m));
    let x2 = x.hi * x.hi;

    let p = poly3(x2, x2 * x2, 0.302_729_49, 0.399_610_82, 0.666_669_49);

    let s = DoubleFloat::splat_f64(std::f64::consts::LN_2)
        .mul_lanes(ef)
        .add(x.scale(f32x8::splat(2.0)))
        .add_lanes(x2 * x.hi * p);
    let r = s.collapse();

    let r = d
        .simd_gt(f32x8::splat(1.0e38))
        .blend(f32x8::splat(f32::INFINITY), r);
    let r = mask_or(d.simd_lt(f32x8::splat(-1.0)), is_nan_mask(d))
        .blend(f32x8::splat(f32::NAN), r);
    let r = d
        .simd_eq(f32x8::splat(-1.0))
        .blend(f32x8::splat(f32::NEG_INFINITY), r);
    is_neg_zero_mask(d).blend(f32x8::splat(-0.0), r)
}

/// Base-2 logarithm, targeting 1 ULP.
pub fn log2(d: f32x8) -> f32x8 {
    let (m, e) = split_mantissa(d);
    let ef = f32x8::from_i32x8(e);

    let x = DoubleFloat::from_sum(m, f32x8::splat(-1.0))
        .div(DoubleFloat::from_sum(m, f32x8::splat(1.0)));
    let x2 = x.hi * x.hi;

    let t = poly3(x2, x2 * x2, 0.437_455_03, 0.576_479_02, 0.961_801_3);

    // 2/ln 2 with a fitted low part that absorbs the transform's tail.
    let s = DoubleFloat::from_lanes(ef)
        .add(x.mul(DoubleFloat::splat2(2.885_390_043_258_667, 3.273_447_448_356_849e-8)))
        .add_lanes(x2 * x.hi * t);

    log_edges(d, s.collapse())
}

/// Double-float ln kernel for double-float inputs.
///
/// No denormal prescale; the inverse hyperbolics feed it values away from
/// the denormal range.
pub(crate) fn logk2(d: DoubleFloat) -> DoubleFloat {
    let e = ilogb2k(d.hi * f32x8::splat(1.0 / 0.75));
    let m = d.scale(pow2i(-e));

    let x = m
        .add_lanes(f32x8::splat(-1.0))
        .div(m.add_lanes(f32x8::splat(1.0)));
    let x2 = x.square();

    let t = poly4(
        x2.hi,
        x2.hi * x2.hi,
        0.239_282_85,
        0.285_182_12,
        0.400_005_88,
        0.666_666_69,
    );

    DoubleFloat::splat_f64(std::f64::consts::LN_2)
        .mul_lanes(f32x8::from_i32x8(e))
        .add(x.scale(f32x8::splat(2.0)))
        .add(x2.mul(x).mul_lanes(t))
}

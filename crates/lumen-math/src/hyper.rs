//! Hyperbolic functions and their inverses.
//!
//! The precise tier routes through the double-float exp kernel and
//! combines `e^y` with its reciprocal in double-float, so the even/odd
//! combinations keep full precision down to tiny arguments. The fast tier
//! uses `exp`/`expm1` identities rearranged to avoid cancellation and
//! premature overflow. The inverses go through the double-float log
//! kernel; out-of-domain inputs produce NaN.

use wide::{CmpEq, CmpGt, CmpLt, f32x8};

use crate::df::DoubleFloat;
use crate::exp::{exp, expk2, expm1};
use crate::lanes::{is_inf_mask, is_nan_mask, is_neg_zero_mask, mask_or, mulsign};
use crate::log::logk2;

/// sinh, precise tier (targeting 1 ULP for |x| <= 88.5).
///
/// Beyond that the result saturates to the correctly signed infinity.
pub fn sinh(x: f32x8) -> f32x8 {
    let y = x.abs();
    let d = expk2(DoubleFloat::from_lanes(y));
    let d = d.sub(d.recip());
    let r = d.collapse() * f32x8::splat(0.5);
    let r = y
        .simd_gt(f32x8::splat(89.0))
        .blend(f32x8::splat(f32::INFINITY), r);
    let r = mulsign(r, x);
    is_nan_mask(x).blend(f32x8::splat(f32::NAN), r)
}

/// cosh, precise tier (targeting 1 ULP for |x| <= 88.5).
pub fn cosh(x: f32x8) -> f32x8 {
    let y = x.abs();
    let d = expk2(DoubleFloat::from_lanes(y));
    let d = d.add(d.recip());
    let r = d.collapse() * f32x8::splat(0.5);
    let r = y
        .simd_gt(f32x8::splat(89.0))
        .blend(f32x8::splat(f32::INFINITY), r);
    is_nan_mask(x).blend(f32x8::splat(f32::NAN), r)
}

/// tanh, precise tier (targeting 1 ULP).
pub fn tanh(x: f32x8) -> f32x8 {
    let y = x.abs();
    let d = expk2(DoubleFloat::from_lanes(y));
    let e = d.recip();
    let r = d.sub(e).div(d.add(e)).collapse();
    let r = y
        .simd_gt(f32x8::splat(8.664_34))
        .blend(f32x8::splat(1.0), r);
    let r = mulsign(r, x);
    is_nan_mask(x).blend(f32x8::splat(f32::NAN), r)
}

/// sinh, fast tier (within 3.5 ULP for |x| <= 88).
pub fn sinh_fast(x: f32x8) -> f32x8 {
    let one = f32x8::splat(1.0);
    let two = f32x8::splat(2.0);
    let e = expm1(x.abs());
    // (E - 1/E)/2 with E = e + 1; the grouping keeps e*(e+2) from
    // overflowing before the division.
    let r = e * ((e + two) / (e + one)) * f32x8::splat(0.5);
    let r = x
        .abs()
        .simd_gt(f32x8::splat(88.0))
        .blend(f32x8::splat(f32::INFINITY), r);
    mulsign(r, x)
}

/// cosh, fast tier (within 3.5 ULP for |x| <= 88).
pub fn cosh_fast(x: f32x8) -> f32x8 {
    let e = exp(x.abs());
    (e + f32x8::splat(1.0) / e) * f32x8::splat(0.5)
}

/// tanh, fast tier (within 3.5 ULP).
pub fn tanh_fast(x: f32x8) -> f32x8 {
    let y = x.abs();
    let d = expm1(f32x8::splat(2.0) * y);
    let r = d / (d + f32x8::splat(2.0));
    let r = y
        .simd_gt(f32x8::splat(8.664_34))
        .blend(f32x8::splat(1.0), r);
    mulsign(r, x)
}

/// Largest x with x*x finite; above it `sqrt(x^2 + 1)` must not be formed.
const SQRT_MAX: f32 = 1.844_674_4e19;

/// asinh = ln(x + sqrt(x^2 + 1)), computed in double-float.
pub fn asinh(x: f32x8) -> f32x8 {
    let zero = f32x8::splat(0.0);
    let one = f32x8::splat(1.0);
    let y = x.abs();
    let o = y.simd_gt(one);

    // For |x| > 1 compute sqrt(x^2 + 1) as |x| * sqrt(1 + 1/x^2).
    let rc = DoubleFloat::recip_lanes(y);
    let d = DoubleFloat::new(o.blend(rc.hi, y), o.blend(rc.lo, zero));
    let d = d.square().add_lanes(one).sqrt();
    let dm = d.mul_lanes(y);
    let d = DoubleFloat::new(o.blend(dm.hi, d.hi), o.blend(dm.lo, d.lo));

    let l = logk2(d.add_lanes(x).normalize());
    let r = l.collapse();

    let big = mask_or(y.simd_gt(f32x8::splat(SQRT_MAX)), is_inf_mask(x));
    let r = big.blend(mulsign(f32x8::splat(f32::INFINITY), x), r);
    let r = is_nan_mask(x).blend(f32x8::splat(f32::NAN), r);
    is_neg_zero_mask(x).blend(f32x8::splat(-0.0), r)
}

/// acosh = ln(x + sqrt(x+1)*sqrt(x-1)); inputs below 1 give NaN and
/// acosh(1) is exactly 0.
pub fn acosh(x: f32x8) -> f32x8 {
    let one = f32x8::splat(1.0);
    let sp = DoubleFloat::from_sum(x, one).sqrt();
    let sm = DoubleFloat::from_sum(x, -one).sqrt();
    let l = logk2(sp.mul(sm).add_lanes(x).normalize());
    let r = l.collapse();

    let r = mask_or(x.simd_gt(f32x8::splat(SQRT_MAX)), is_inf_mask(x))
        .blend(f32x8::splat(f32::INFINITY), r);
    let r = x.simd_eq(one).blend(f32x8::splat(0.0), r);
    mask_or(x.simd_lt(one), is_nan_mask(x)).blend(f32x8::splat(f32::NAN), r)
}

/// atanh = ln((1+x)/(1-x)) / 2; |x| > 1 gives NaN, atanh(+-1) = +-Inf.
pub fn atanh(x: f32x8) -> f32x8 {
    let one = f32x8::splat(1.0);
    let y = x.abs();
    let l = logk2(DoubleFloat::from_sum(one, y).div(DoubleFloat::from_sum(one, -y)));
    let r = l.collapse() * f32x8::splat(0.5);

    let r = y.simd_gt(one).blend(f32x8::splat(f32::NAN), r);
    let r = y.simd_eq(one).blend(f32x8::splat(f32::INFINITY), r);
    let r = mulsign(r, x);
    is_nan_mask(x).blend(f32x8::splat(f32::NAN), r)
}

//! Exponential family: `exp`, `expm1`, `pow` and the internal kernels.
//!
//! `exp` reduces by rounded multiples of ln 2 with a two-term split
//! constant, evaluates a degree-5 minimax polynomial, and recombines with
//! an exponent-field ldexp. `expm1` runs the double-float kernel so the
//! subtraction of one keeps small arguments exact. `pow` composes the
//! base-2 kernels with IEEE sign/parity handling for negative bases.

use wide::{CmpEq, CmpGe, CmpGt, CmpLt, f32x8};

use crate::df::DoubleFloat;
use crate::lanes::{
    flip_sign, is_inf_mask, is_neg_zero_mask, ldexp2k, mask_and, mask_not,
};
use crate::log::log2;
use crate::poly::{poly4, poly6};

const L2U: f32 = 0.693_145_751_953_125;
const L2L: f32 = 1.428_606_765_330_187e-6;

/// e^x, targeting 1 ULP.
///
/// Overflow saturates to +Inf, underflow to 0; NaN propagates.
pub fn exp(d: f32x8) -> f32x8 {
    let q = (d * f32x8::splat(std::f32::consts::LOG2_E)).round();
    let qi = q.trunc_int();

    let s = q.mul_add(f32x8::splat(-L2U), d);
    let s = q.mul_add(f32x8::splat(-L2L), s);

    let s2 = s * s;
    let s4 = s2 * s2;
    let u = poly6(
        s,
        s2,
        s4,
        1.985_276_2e-4,
        1.393_043_6e-3,
        8.333_360_8e-3,
        4.166_648_5e-2,
        1.666_666_7e-1,
        0.5,
    );
    let u = s2.mul_add(u, s + f32x8::splat(1.0));
    let u = ldexp2k(u, qi);

    let u = d
        .simd_lt(f32x8::splat(-104.0))
        .blend(f32x8::splat(0.0), u);
    d.simd_gt(f32x8::splat(104.0))
        .blend(f32x8::splat(f32::INFINITY), u)
}

/// Double-float e^d kernel shared by `expm1` and the precise hyperbolics.
pub(crate) fn expk2(d: DoubleFloat) -> DoubleFloat {
    let q = ((d.hi + d.lo) * f32x8::splat(std::f32::consts::LOG2_E)).round();
    let qi = q.trunc_int();

    let mut s = d.add_lanes(q * f32x8::splat(-L2U));
    s = s.add_lanes(q * f32x8::splat(-L2L));

    let sx = s.hi;
    let u = poly4(
        sx,
        sx * sx,
        1.980_960_2e-4,
        1.394_256_5e-3,
        8.333_456_7e-3,
        4.166_637_4e-2,
    );

    let mut t = s.mul_lanes(u).add_lanes(f32x8::splat(0.166_666_66));
    t = s.mul(t).add_lanes(f32x8::splat(0.5));
    t = s.add(s.square().mul(t));
    let t = DoubleFloat::from_lanes(f32x8::splat(1.0)).add_fast(t);

    let r = DoubleFloat::new(ldexp2k(t.hi, qi), ldexp2k(t.lo, qi));
    let tiny = d.hi.simd_lt(f32x8::splat(-104.0));
    DoubleFloat::new(
        tiny.blend(f32x8::splat(0.0), r.hi),
        tiny.blend(f32x8::splat(0.0), r.lo),
    )
}

/// e^x - 1, exact for small x (no cancellation), targeting 1 ULP.
pub fn expm1(a: f32x8) -> f32x8 {
    let d = expk2(DoubleFloat::from_lanes(a)).add_lanes(f32x8::splat(-1.0));
    let mut x = d.collapse();
    x = a
        .simd_gt(f32x8::splat(88.722_835))
        .blend(f32x8::splat(f32::INFINITY), x);
    x = a
        .simd_lt(f32x8::splat(-16.635_532))
        .blend(f32x8::splat(-1.0), x);
    is_neg_zero_mask(a).blend(f32x8::splat(-0.0), x)
}

/// 2^d kernel: rounded-integer reduction, degree-5 polynomial, and a
/// compensated `1 + u*s` final step.
pub(crate) fn exp2(d: f32x8) -> f32x8 {
    let q = d.round();
    let qi = q.trunc_int();
    let s = d - q;

    let s2 = s * s;
    let s4 = s2 * s2;
    let u = poly6(
        s,
        s2,
        s4,
        1.535_920_9e-4,
        1.339_262_7e-3,
        9.618_384_8e-3,
        5.550_347_3e-2,
        2.402_264_5e-1,
        6.931_471_8e-1,
    );
    let u = DoubleFloat::from_lanes(f32x8::splat(1.0))
        .add_fast(DoubleFloat::from_prod(u, s))
        .normalize()
        .hi;
    let u = ldexp2k(u, qi);

    let u = d
        .simd_ge(f32x8::splat(128.0))
        .blend(f32x8::splat(f32::INFINITY), u);
    d.simd_lt(f32x8::splat(-150.0))
        .blend(f32x8::splat(0.0), u)
}

/// x^y as `exp2(y * log2|x|)` with IEEE-style sign and edge handling.
///
/// Negative bases require an integer exponent (odd flips the sign); a
/// fractional exponent yields NaN. Zero and infinite bases follow the
/// usual conventions; `pow(x, 0) == 1` and `pow(1, y) == 1` for all
/// inputs.
pub fn pow(x: f32x8, y: f32x8) -> f32x8 {
    let zero = f32x8::splat(0.0);
    let one = f32x8::splat(1.0);
    let inf = f32x8::splat(f32::INFINITY);

    let r = exp2(y * log2(x.abs()));

    // Integer / odd-integer classification without an i32 range limit:
    // y is an odd integer iff y is integral and y/2 is not.
    let y_int = y.round().simd_eq(y);
    let h = y * f32x8::splat(0.5);
    let y_odd = mask_and(y_int, mask_not(h.round().simd_eq(h)));

    let neg = x.simd_lt(zero);
    let mut res = flip_sign(r, mask_and(neg, y_odd));
    res = mask_and(neg, mask_not(y_int)).blend(f32x8::splat(f32::NAN), res);

    let y_pos = y.simd_gt(zero);

    let zmask = x.simd_eq(zero);
    let zval = y_pos.blend(zero, inf);
    let zval = flip_sign(zval, mask_and(is_neg_zero_mask(x), y_odd));
    res = zmask.blend(zval, res);

    let imask = is_inf_mask(x);
    let ival = y_pos.blend(inf, zero);
    let ival = flip_sign(ival, mask_and(neg, y_odd));
    res = imask.blend(ival, res);

    res = y.simd_eq(zero).blend(one, res);
    x.simd_eq(one).blend(one, res)
}

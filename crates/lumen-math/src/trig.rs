//! sin / cos / tan, precise and fast tiers.
//!
//! Reduction strategy is shared: round to the nearest multiple of pi
//! (sin), odd multiple of pi/2 (cos) or multiple of pi/2 (tan), subtract
//! with split constants, and evaluate an odd polynomial kernel on the
//! remainder. The precise tier keeps the remainder in double-float and
//! finishes the polynomial in double-float; the fast tier stays in plain
//! lanes. Arguments beyond the split-constant ranges take the table path
//! in `reduce`, per lane, with a whole-vector short-circuit when no lane
//! needs it.
//!
//! Quadrant sign flips are XOR on the sign bit, so signed zeros survive.
//! NaN and Inf inputs come out as quiet NaN.

use wide::{CmpEq, CmpGe, CmpGt, f32x8, i32x8};

use crate::df::DoubleFloat;
use crate::lanes::{
    flip_sign, is_inf_mask, is_nan_mask, is_neg_zero_mask, mask_any, mask_from_int, mask_not,
    mask_or, mask_to_int,
};
use crate::poly::{poly4, poly6};
use crate::reduce::{MAX_REDUCE_3, MAX_REDUCE_4, payne_hanek, sub_pi3, sub_pi3_df, sub_pi4};

/// Replaces lanes whose input was NaN or Inf with quiet NaN.
#[inline(always)]
fn nan_bad_lanes(r: DoubleFloat, d: f32x8) -> DoubleFloat {
    let bad = mask_or(is_inf_mask(d), is_nan_mask(d));
    DoubleFloat::new(
        bad.blend(f32x8::splat(f32::NAN), r.hi),
        bad.blend(f32x8::splat(0.0), r.lo),
    )
}

/// Table reduction recentred on multiples of pi (for sin).
///
/// From `x * 2/pi = q + f` produces `n = round(x/pi)` and the remainder
/// `x - n*pi` in [-pi/2, pi/2]. The half-unit recentring is exact.
fn table_reduce_pi(d: f32x8) -> (DoubleFloat, i32x8) {
    let (f, q) = payne_hanek(d);
    let odd = (q & i32x8::splat(1)).simd_eq(i32x8::splat(1));
    let odd_f = mask_from_int(odd);
    let pos = f.hi.simd_ge(f32x8::splat(0.0));

    let shift = odd_f.blend(
        pos.blend(f32x8::splat(1.0), f32x8::splat(-1.0)),
        f32x8::splat(0.0),
    );
    let f2 = f.add_lanes(-shift);
    let inc = odd & mask_to_int(pos) & i32x8::splat(1);
    let n = (q >> 1) + inc;

    let r = f2.mul(DoubleFloat::splat_f64(std::f64::consts::FRAC_PI_2));
    (nan_bad_lanes(r, d), n)
}

/// Table reduction recentred on odd multiples of pi/2 (for cos).
fn table_reduce_half_pi_odd(d: f32x8) -> (DoubleFloat, i32x8) {
    let (f, q) = payne_hanek(d);
    let odd = (q & i32x8::splat(1)).simd_eq(i32x8::splat(1));
    let odd_f = mask_from_int(odd);
    let pos = f.hi.simd_ge(f32x8::splat(0.0));

    let pm1 = pos.blend(f32x8::splat(1.0), f32x8::splat(-1.0));
    let shift = odd_f.blend(f32x8::splat(0.0), pm1);
    let f2 = f.add_lanes(-shift);
    let pm1_i = mask_to_int(pos).blend(i32x8::splat(1), i32x8::splat(-1));
    let n = odd.blend(q, q + pm1_i);

    let r = f2.mul(DoubleFloat::splat_f64(std::f64::consts::FRAC_PI_2));
    (nan_bad_lanes(r, d), n)
}

/// Table reduction in pi/2 units (for tan).
fn table_reduce_half_pi(d: f32x8) -> (DoubleFloat, i32x8) {
    let (f, q) = payne_hanek(d);
    let r = f.mul(DoubleFloat::splat_f64(std::f64::consts::FRAC_PI_2));
    (nan_bad_lanes(r, d), q)
}

/// Fast-tier sin kernel: odd minimax on [-pi/2, pi/2].
#[inline(always)]
fn sin_kernel(r: f32x8) -> f32x8 {
    let s = r * r;
    let u = poly4(
        s,
        s * s,
        2.608_315_980_978_659_4e-6,
        -1.981_069_071_916_863_3e-4,
        8.333_078_585_565_09e-3,
        -1.666_665_971_279_144_3e-1,
    );
    s.mul_add(u * r, r)
}

/// Precise-tier sin kernel over a double-float remainder.
#[inline(always)]
fn sin_kernel_df(t: DoubleFloat) -> f32x8 {
    let s = t.square().normalize();
    let mut u = f32x8::splat(2.608_315_980_978_659_4e-6);
    u = u.mul_add(s.hi, f32x8::splat(-1.981_069_071_916_863_3e-4));
    u = u.mul_add(s.hi, f32x8::splat(8.333_078_585_565_09e-3));
    let x = DoubleFloat::from_lanes(f32x8::splat(1.0)).add_fast(
        DoubleFloat::from_sum_fast(f32x8::splat(-1.666_665_971_279_144_3e-1), u * s.hi).mul(s),
    );
    t.mul(x).collapse()
}

/// sin, fast tier (within 3.5 ULP).
pub fn sin_fast(d: f32x8) -> f32x8 {
    let u = (d * f32x8::splat(std::f32::consts::FRAC_1_PI)).round();
    let mut q = u.trunc_int();
    let abs = d.abs();

    let r = if !mask_any(abs.simd_gt(f32x8::splat(MAX_REDUCE_3))) {
        sub_pi3(d, u)
    } else if !mask_any(abs.simd_gt(f32x8::splat(MAX_REDUCE_4))) {
        sub_pi4(d, u)
    } else {
        let small = mask_not(abs.simd_gt(f32x8::splat(MAX_REDUCE_4)));
        let (rt, nt) = table_reduce_pi(d);
        q = mask_to_int(small).blend(q, nt);
        small.blend(sub_pi4(d, u), rt.collapse())
    };

    let odd = mask_from_int((q & i32x8::splat(1)).simd_eq(i32x8::splat(1)));
    let r = flip_sign(r, odd);
    let u = sin_kernel(r);
    is_neg_zero_mask(d).blend(d, u)
}

/// sin, precise tier (targeting 1 ULP).
pub fn sin(d: f32x8) -> f32x8 {
    let u = (d * f32x8::splat(std::f32::consts::FRAC_1_PI)).round();
    let mut q = u.trunc_int();
    let abs = d.abs();

    let s = if !mask_any(abs.simd_gt(f32x8::splat(MAX_REDUCE_3))) {
        sub_pi3_df(d, u)
    } else {
        let small = mask_not(abs.simd_gt(f32x8::splat(MAX_REDUCE_3)));
        let sm = sub_pi3_df(d, u);
        let (rt, nt) = table_reduce_pi(d);
        q = mask_to_int(small).blend(q, nt);
        DoubleFloat::new(small.blend(sm.hi, rt.hi), small.blend(sm.lo, rt.lo))
    };

    let r = sin_kernel_df(s);
    let odd = mask_from_int((q & i32x8::splat(1)).simd_eq(i32x8::splat(1)));
    let r = flip_sign(r, odd);
    is_neg_zero_mask(d).blend(d, r)
}

/// cos, fast tier (within 3.5 ULP).
pub fn cos_fast(d: f32x8) -> f32x8 {
    let m = d
        .mul_add(f32x8::splat(std::f32::consts::FRAC_1_PI), f32x8::splat(-0.5))
        .round();
    let v = m + f32x8::splat(0.5);
    let mut q = (m.trunc_int() << 1) + i32x8::splat(1);
    let abs = d.abs();

    let r = if !mask_any(abs.simd_gt(f32x8::splat(MAX_REDUCE_3))) {
        sub_pi3(d, v)
    } else if !mask_any(abs.simd_gt(f32x8::splat(MAX_REDUCE_4))) {
        sub_pi4(d, v)
    } else {
        let small = mask_not(abs.simd_gt(f32x8::splat(MAX_REDUCE_4)));
        let (rt, nt) = table_reduce_half_pi_odd(d);
        q = mask_to_int(small).blend(q, nt);
        small.blend(sub_pi4(d, v), rt.collapse())
    };

    // n = 1 (mod 4): cos(x) = -sin(r); n = 3 (mod 4): cos(x) = sin(r).
    let needs_flip = mask_from_int((q & i32x8::splat(2)).simd_eq(i32x8::splat(0)));
    let r = flip_sign(r, needs_flip);
    sin_kernel(r)
}

/// cos, precise tier (targeting 1 ULP).
pub fn cos(d: f32x8) -> f32x8 {
    let m = d
        .mul_add(f32x8::splat(std::f32::consts::FRAC_1_PI), f32x8::splat(-0.5))
        .round();
    let v = m + f32x8::splat(0.5);
    let mut q = (m.trunc_int() << 1) + i32x8::splat(1);
    let abs = d.abs();

    let s = if !mask_any(abs.simd_gt(f32x8::splat(MAX_REDUCE_3))) {
        sub_pi3_df(d, v)
    } else {
        let small = mask_not(abs.simd_gt(f32x8::splat(MAX_REDUCE_3)));
        let sm = sub_pi3_df(d, v);
        let (rt, nt) = table_reduce_half_pi_odd(d);
        q = mask_to_int(small).blend(q, nt);
        DoubleFloat::new(small.blend(sm.hi, rt.hi), small.blend(sm.lo, rt.lo))
    };

    let r = sin_kernel_df(s);
    let needs_flip = mask_from_int((q & i32x8::splat(2)).simd_eq(i32x8::splat(0)));
    flip_sign(r, needs_flip)
}

/// tan, fast tier (within 3.5 ULP).
pub fn tan_fast(d: f32x8) -> f32x8 {
    let u = (d * f32x8::splat(std::f32::consts::FRAC_2_PI)).round();
    let mut q = u.trunc_int();
    let v = u * f32x8::splat(0.5);
    let abs = d.abs();

    let r = if !mask_any(abs.simd_gt(f32x8::splat(MAX_REDUCE_3))) {
        sub_pi3(d, v)
    } else if !mask_any(abs.simd_gt(f32x8::splat(MAX_REDUCE_4))) {
        sub_pi4(d, v)
    } else {
        let small = mask_not(abs.simd_gt(f32x8::splat(MAX_REDUCE_4)));
        let (rt, nt) = table_reduce_half_pi(d);
        q = mask_to_int(small).blend(q, nt);
        small.blend(sub_pi4(d, v), rt.collapse())
    };

    let odd = mask_from_int((q & i32x8::splat(1)).simd_eq(i32x8::splat(1)));
    let r = flip_sign(r, odd);

    let s = r * r;
    let s2 = s * s;
    let u = poly6(
        s,
        s2,
        s2 * s2,
        9.272_458_031_773_567_2e-3,
        3.319_849_958_643_317_2e-3,
        2.429_980_784_654_617_3e-2,
        5.344_953_015_446_662_9e-2,
        1.333_830_058_574_676_5e-1,
        3.333_318_531_513_214_1e-1,
    );
    let t = s.mul_add(u * r, r);
    let t = odd.blend(f32x8::splat(1.0) / t, t);
    is_neg_zero_mask(d).blend(d, t)
}

/// tan, precise tier (targeting 1 ULP).
pub fn tan(d: f32x8) -> f32x8 {
    let u = (d * f32x8::splat(std::f32::consts::FRAC_2_PI)).round();
    let mut q = u.trunc_int();
    let v = u * f32x8::splat(0.5);
    let abs = d.abs();

    let s = if !mask_any(abs.simd_gt(f32x8::splat(MAX_REDUCE_3))) {
        sub_pi3_df(d, v)
    } else {
        let small = mask_not(abs.simd_gt(f32x8::splat(MAX_REDUCE_3)));
        let sm = sub_pi3_df(d, v);
        let (rt, nt) = table_reduce_half_pi(d);
        q = mask_to_int(small).blend(q, nt);
        DoubleFloat::new(small.blend(sm.hi, rt.hi), small.blend(sm.lo, rt.lo))
    };

    let odd_i = (q & i32x8::splat(1)).simd_eq(i32x8::splat(1));
    let odd = mask_from_int(odd_i);
    let s = DoubleFloat::new(flip_sign(s.hi, odd), flip_sign(s.lo, odd));

    let t = s.square().normalize();
    let mut u = f32x8::splat(4.466_364_625_841_379_2e-3);
    u = u.mul_add(t.hi, f32x8::splat(-8.392_018_207_814_544_4e-5));
    u = u.mul_add(t.hi, f32x8::splat(1.096_392_422_914_505e-2));
    u = u.mul_add(t.hi, f32x8::splat(2.123_603_038_489_818_6e-2));
    u = u.mul_add(t.hi, f32x8::splat(5.406_871_438_026_428_2e-2));
    u = u.mul_add(t.hi, f32x8::splat(1.333_256_661_891_937_3e-1));

    let x = DoubleFloat::from_lanes(f32x8::splat(1.0)).add_fast(
        DoubleFloat::from_sum_fast(f32x8::splat(3.333_336_114_883_422_9e-1), u * t.hi).mul(t),
    );
    let x = s.mul(x);
    let rec = x.recip();
    let x = DoubleFloat::new(odd.blend(rec.hi, x.hi), odd.blend(rec.lo, x.lo));

    let r = x.collapse();
    is_neg_zero_mask(d).blend(d, r)
}

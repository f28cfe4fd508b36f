//! Trigonometric argument reduction.
//!
//! Two fast paths subtract a rounded multiple of pi using split-constant
//! (Cody-Waite) arithmetic: a 3-term decomposition good to |x| <= 125 and
//! a 4-term decomposition good to |x| <= 39000. Beyond that, a table-driven
//! path multiplies the 24-bit integer mantissa against per-exponent windows
//! of the binary expansion of 2/pi, accumulating three double-float partial
//! products and stripping whole quadrants between steps.
//!
//! The window table is derived once at startup from the stored 24-bit
//! chunks of 2/pi and is read-only afterwards; concurrent readers need no
//! locking.

use std::sync::LazyLock;

use wide::{f32x8, i32x8};

use crate::df::DoubleFloat;
use crate::lanes::{ilogb2k, ldexp3k};

/// 3-term split of pi. The products `u * PI_A2` stay exact for the
/// quadrant counts that arise below [`MAX_REDUCE_3`].
pub(crate) const PI_A2: f32 = 3.141_479_5;
pub(crate) const PI_B2: f32 = 0.000_113_159_418_106_079_1;
pub(crate) const PI_C2: f32 = 1.984_187_258_941_005_893_6e-9;

/// 4-term split of pi, valid up to [`MAX_REDUCE_4`].
pub(crate) const PI_A: f32 = 3.140_625;
pub(crate) const PI_B: f32 = 0.000_967_025_756_835_937_5;
pub(crate) const PI_C: f32 = 6.277_114_152_908_325_195_3e-7;
pub(crate) const PI_D: f32 = 1.215_420_125_655_342_076_2e-10;

/// Upper bound for the 3-term fast path.
pub(crate) const MAX_REDUCE_3: f32 = 125.0;
/// Upper bound for the 4-term fast path.
pub(crate) const MAX_REDUCE_4: f32 = 39000.0;

/// `x - u*pi` with the 3-term split. `u` may carry half-integer steps
/// (the multiple is `u` in units of pi).
#[inline(always)]
pub(crate) fn sub_pi3(x: f32x8, u: f32x8) -> f32x8 {
    let r = u.mul_add(f32x8::splat(-PI_A2), x);
    let r = u.mul_add(f32x8::splat(-PI_B2), r);
    u.mul_add(f32x8::splat(-PI_C2), r)
}

/// `x - u*pi` with the 4-term split.
#[inline(always)]
pub(crate) fn sub_pi4(x: f32x8, u: f32x8) -> f32x8 {
    let r = u.mul_add(f32x8::splat(-PI_A), x);
    let r = u.mul_add(f32x8::splat(-PI_B), r);
    let r = u.mul_add(f32x8::splat(-PI_C), r);
    u.mul_add(f32x8::splat(-PI_D), r)
}

/// `x - u*pi` in double-float, 3-term split.
///
/// The leading subtraction cancels exactly; the two tail terms are folded
/// in through error-free sums so the residual keeps extended precision.
#[inline(always)]
pub(crate) fn sub_pi3_df(x: f32x8, u: f32x8) -> DoubleFloat {
    let v = u.mul_add(f32x8::splat(-PI_A2), x);
    let s = DoubleFloat::from_sum(v, u * f32x8::splat(-PI_B2));
    s.add_fast_lanes(u * f32x8::splat(-PI_C2))
}

/// Consecutive 24-bit chunks of the fractional binary expansion of 2/pi.
///
/// 288 bits total, enough to cover the full f32 exponent range with the
/// 96-bit windows used below.
static TWO_OVER_PI_CHUNKS: [u32; 12] = [
    0xA2F983, 0x6E4E44, 0x1529FC, 0x2757D1, 0xF534DD, 0xC0DB62,
    0x95993C, 0x439041, 0xFE5163, 0xABDEBB, 0xC561B7, 0x246E3A,
];

/// Bits `[start, start + 24)` of the expansion, MSB first. Indices before
/// the leading bit read as zero.
fn two_over_pi_window(start: i32) -> u32 {
    let mut w = 0u32;
    for k in 0..24 {
        let idx = start + k;
        let bit = if idx < 0 {
            0
        } else {
            let chunk = (idx / 24) as usize;
            let off = (idx % 24) as usize;
            if chunk < TWO_OVER_PI_CHUNKS.len() {
                (TWO_OVER_PI_CHUNKS[chunk] >> (23 - off)) & 1
            } else {
                0
            }
        };
        w = (w << 1) | bit;
    }
    w
}

/// Builds the per-exponent reduction rows.
///
/// Row `e` holds `(2^(e-23) * 2/pi) mod 8` split into four 24-bit f32
/// limbs. Multiplying by the signed integer mantissa (|a| < 2^24) then
/// reproduces `x * 2/pi` up to an integer multiple of 8, which quadrant
/// logic mod 4 cannot see.
fn build_reduction_table() -> [[f32; 4]; 128] {
    let mut table = [[0.0f32; 4]; 128];
    for (e, row) in table.iter_mut().enumerate() {
        for (j, limb) in row.iter_mut().enumerate() {
            let w = two_over_pi_window(e as i32 - 26 + 24 * j as i32);
            *limb = w as f32 * 2f32.powi(-21 - 24 * j as i32);
        }
    }
    table
}

static REDUCTION_TABLE: LazyLock<[[f32; 4]; 128]> = LazyLock::new(build_reduction_table);

/// Removes the integer part of both components; returns the removed
/// quadrant count. Both subtractions are exact.
#[inline]
fn strip(s: DoubleFloat) -> (DoubleFloat, i32x8) {
    let yh = s.hi.round();
    let yl = s.lo.round();
    let q = yh.trunc_int() + yl.trunc_int();
    (DoubleFloat::new(s.hi - yh, s.lo - yl), q)
}

/// Table-driven reduction for large arguments.
///
/// Returns `(f, q)` with `x * 2/pi = q + f` (mod 4 in `q`), `|f| <= 0.5`
/// held as a double-float. The reduced angle is `f * pi/2`. Lanes holding
/// NaN or Inf produce garbage here; callers mask them to NaN.
pub(crate) fn payne_hanek(x: f32x8) -> (DoubleFloat, i32x8) {
    let e = ilogb2k(x.abs());
    // Scale to the signed integer mantissa, |a| in [2^23, 2^24).
    let a = ldexp3k(x, i32x8::splat(23) - e);

    let table = &*REDUCTION_TABLE;
    let idx = e.to_array();
    let mut limbs = [[0.0f32; 8]; 4];
    for lane in 0..8 {
        let row = table[idx[lane].clamp(0, 127) as usize];
        for j in 0..4 {
            limbs[j][lane] = row[j];
        }
    }
    let t0 = f32x8::new(limbs[0]);
    let t1 = f32x8::new(limbs[1]);
    let t2 = f32x8::new(limbs[2]);
    let t3 = f32x8::new(limbs[3]);

    let (mut s, mut q) = strip(DoubleFloat::from_prod(a, t0));
    s = s.normalize();

    s = s.add(DoubleFloat::from_prod(a, t1));
    let (s1, q1) = strip(s);
    s = s1.normalize();
    q = q + q1;

    s = s.add(DoubleFloat::from_prod(a, t2));
    let (s2, q2) = strip(s);
    s = s2.normalize();
    q = q + q2;

    s = s.add(DoubleFloat::from_prod(a, t3)).normalize();
    let (s3, q3) = strip(s);
    s = s3.normalize();
    q = q + q3;

    (s, q)
}

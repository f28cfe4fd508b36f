//! Fixed-shape polynomial evaluation.
//!
//! Estrin-style power-of-two factoring: independent multiply-adds over
//! precomputed x, x^2, x^4 so the chains schedule with more instruction
//! parallelism than sequential Horner form. One function per coefficient
//! count; the kernels pick the shape matching their minimax fit, there is
//! no dynamic-degree path.
//!
//! Coefficients are listed highest degree first.

use wide::f32x8;

/// `c1*x + c0`
#[inline(always)]
pub fn poly2(x: f32x8, c1: f32, c0: f32) -> f32x8 {
    x.mul_add(f32x8::splat(c1), f32x8::splat(c0))
}

/// `c2*x^2 + c1*x + c0`
#[inline(always)]
pub fn poly3(x: f32x8, x2: f32x8, c2: f32, c1: f32, c0: f32) -> f32x8 {
    x2.mul_add(f32x8::splat(c2), poly2(x, c1, c0))
}

/// Degree-3 polynomial from 4 coefficients.
#[inline(always)]
pub fn poly4(x: f32x8, x2: f32x8, c3: f32, c2: f32, c1: f32, c0: f32) -> f32x8 {
    x2.mul_add(poly2(x, c3, c2), poly2(x, c1, c0))
}

/// Degree-4 polynomial from 5 coefficients.
#[inline(always)]
pub fn poly5(x: f32x8, x2: f32x8, x4: f32x8, c4: f32, c3: f32, c2: f32, c1: f32, c0: f32) -> f32x8 {
    x4.mul_add(f32x8::splat(c4), poly4(x, x2, c3, c2, c1, c0))
}

/// Degree-5 polynomial from 6 coefficients.
#[inline(always)]
#[allow(clippy::too_many_arguments)]
pub fn poly6(
    x: f32x8,
    x2: f32x8,
    x4: f32x8,
    c5: f32,
    c4: f32,
    c3: f32,
    c2: f32,
    c1: f32,
    c0: f32,
) -> f32x8 {
    x4.mul_add(poly2(x, c5, c4), poly4(x, x2, c3, c2, c1, c0))
}

/// Degree-7 polynomial from 8 coefficients.
#[inline(always)]
#[allow(clippy::too_many_arguments)]
pub fn poly8(
    x: f32x8,
    x2: f32x8,
    x4: f32x8,
    c7: f32,
    c6: f32,
    c5: f32,
    c4: f32,
    c3: f32,
    c2: f32,
    c1: f32,
    c0: f32,
) -> f32x8 {
    x4.mul_add(poly4(x, x2, c7, c6, c5, c4), poly4(x, x2, c3, c2, c1, c0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horner(x: f64, coeffs: &[f64]) -> f64 {
        coeffs.iter().fold(0.0, |acc, &c| acc * x + c)
    }

    #[test]
    fn test_poly_shapes_match_horner() {
        let xs = [0.25f32, -0.5, 0.9, -0.1, 0.0, 1.0, -1.0, 0.33];
        let x = f32x8::new(xs);
        let x2 = x * x;
        let x4 = x2 * x2;

        let r4 = poly4(x, x2, 4.0, 3.0, 2.0, 1.0).to_array();
        let r6 = poly6(x, x2, x4, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0).to_array();
        let r8 = poly8(x, x2, x4, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0).to_array();

        for (i, &xv) in xs.iter().enumerate() {
            let xd = xv as f64;
            assert!((r4[i] as f64 - horner(xd, &[4.0, 3.0, 2.0, 1.0])).abs() < 1e-4);
            assert!((r6[i] as f64 - horner(xd, &[6.0, 5.0, 4.0, 3.0, 2.0, 1.0])).abs() < 1e-4);
            assert!(
                (r8[i] as f64 - horner(xd, &[8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0])).abs() < 1e-3
            );
        }
    }
}

//! # lumen-math
//!
//! Lane-parallel transcendental math kernel for color pipelines.
//!
//! Every function takes and returns 8-lane f32 vectors (`wide::f32x8`)
//! and computes its intermediate steps in compensated double-float
//! precision where its accuracy tier needs it.
//!
//! # Accuracy tiers
//!
//! | Tier | Bound | Cost |
//! |------|-------|------|
//! | precise (`sin`, `cos`, `tan`, `exp`, `log`, ...) | ~1 ULP | double-float reduction + tail |
//! | fast (`sin_fast`, `cos_fast`, `log_fast`, ...) | 3.5 ULP | plain lanes, shorter polynomials |
//!
//! The inverse trigonometric precise tier lands within 2 ULP; the tests
//! pin the bounds each function actually meets.
//!
//! # Special values
//!
//! Errors are encoded in the result stream, never raised: domain errors
//! return NaN (`asin(2)`, `acosh(0.5)`), overflow returns the signed
//! infinity, and signed zeros are preserved (`sin(-0.0) == -0.0`,
//! `log(-0.0) == -Inf`). NaN and Inf inputs to the periodic functions
//! come out as quiet NaN.
//!
//! # Usage
//!
//! ```rust
//! use lumen_math::f32x8;
//!
//! let x = f32x8::splat(0.5);
//! let y = lumen_math::exp(lumen_math::log(x));
//! assert!((y.to_array()[0] - 0.5).abs() < 1e-6);
//! ```
//!
//! # Concurrency
//!
//! All functions are pure and stateless; the only shared state is the
//! read-only argument-reduction table, built on first use and never
//! mutated. Calls are safe from any number of threads without locking
//! and run in bounded, input-independent time.
//!
//! # Dependencies
//!
//! - [`wide`] - portable SIMD lane vectors
//! - [`bytemuck`] - lane-preserving bit casts
//!
//! # Used By
//!
//! - `lumen-color` - gamut matrices and tone-mapping curves

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod df;
pub mod lanes;
pub mod poly;

mod atrig;
mod exp;
mod hyper;
mod log;
mod reduce;
mod trig;

pub use df::DoubleFloat;

pub use exp::{exp, expm1, pow};
pub use log::{log, log1p, log2, log_fast};

pub use trig::{cos, cos_fast, sin, sin_fast, tan, tan_fast};

pub use atrig::{acos, acos_fast, asin, asin_fast, atan, atan2, atan2_fast, atan_fast};

pub use hyper::{acosh, asinh, atanh, cosh, cosh_fast, sinh, sinh_fast, tanh, tanh_fast};

pub use wide::{f32x8, i32x8, u32x8};

//! # lumen-color
//!
//! Gamut matrices, transfer curves and tone mapping over lane vectors.
//!
//! This crate owns the color side of the pipeline: building RGB <-> XYZ
//! matrices from chromaticity primaries, composing gamut conversions,
//! decoding/encoding transfer curves, and tone-mapping HDR down to SDR.
//! Pixel math runs either per pixel (`[f32; 3]`) or on lane-packed
//! planar channels (`wide::f32x8`), with the nonlinear curves backed by
//! [`lumen_math`].
//!
//! # Architecture
//!
//! ```text
//!   encoded channels
//!        |  TransferCurve::eotf_x8        (lumen-math exp/log/pow)
//!   linear RGB
//!        |  ColorMatrix::transform_x8     (gamut conversion)
//!   linear RGB'
//!        |  ToneMapper::map_x8            (lumen-math log1p)
//!        |  TransferCurve::oetf_x8
//!   encoded output
//! ```
//!
//! # Usage
//!
//! ```rust
//! use lumen_color::{ColorMatrix, ToneMapper, TransferCurve, REC2020, SRGB};
//!
//! // Rec.2020 -> sRGB gamut matrix, built once per configuration.
//! let m = ColorMatrix::rgb_to_rgb(&REC2020, &SRGB).unwrap();
//!
//! // Per-pixel: decode, convert, tone map, encode.
//! let linear = [0.5f32, 0.25, 0.125].map(|v| TransferCurve::Hlg.eotf(v));
//! let rgb = m.transform(linear);
//! let sdr = ToneMapper::Rec2408.map(rgb, 4.0);
//! let out = sdr.map(|v| TransferCurve::Srgb.oetf(v));
//! assert!(out.iter().all(|v| v.is_finite()));
//! ```
//!
//! # Errors
//!
//! Configuration errors (zero-y chromaticity, singular matrix) surface
//! as [`Error`] when matrices are built, once per configuration.
//! Per-pixel paths never fail; numeric problems travel as NaN/Inf in
//! the value stream.
//!
//! # Dependencies
//!
//! - [`lumen_math`] - vectorized transcendental kernels
//! - [`wide`] - lane vectors
//! - [`thiserror`] - error derive

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod matrix;
mod primaries;
pub mod transfer;
mod tonemap;

pub use error::{Error, Result};
pub use matrix::ColorMatrix;
pub use primaries::{D65_XY, DCI_XY, DISPLAY_P3, Primaries, REC2020, SRGB};
pub use tonemap::ToneMapper;
pub use transfer::TransferCurve;

pub use wide::f32x8;

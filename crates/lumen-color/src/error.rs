//! Error types for color configuration.
//!
//! Failures here are configuration-time failures: a degenerate
//! chromaticity or a non-invertible primaries assembly. Per-pixel math
//! never errors; it encodes problems in the value stream as NaN/Inf.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building color-space configuration.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// A chromaticity has a zero y coordinate, so it cannot be lifted
    /// to XYZ.
    #[error("degenerate chromaticity ({x}, {y}): y must be nonzero")]
    DegenerateChromaticity {
        /// x chromaticity coordinate.
        x: f32,
        /// y chromaticity coordinate.
        y: f32,
    },

    /// The matrix has no inverse (determinant is zero or not finite).
    #[error("singular matrix: determinant {determinant}")]
    SingularMatrix {
        /// The offending determinant value.
        determinant: f32,
    },
}

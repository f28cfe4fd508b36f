//! Color primaries and white points.
//!
//! A set of [`Primaries`] defines a display gamut by the CIE xy
//! chromaticities of its three primaries and its white point. The
//! constants below cover the display outputs this crate converts
//! between.

/// RGB color space primaries definition.
///
/// # Example
///
/// ```rust
/// use lumen_color::Primaries;
///
/// let custom = Primaries {
///     r: (0.64, 0.33),
///     g: (0.30, 0.60),
///     b: (0.15, 0.06),
///     w: (0.3127, 0.3290),
///     name: "Custom",
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primaries {
    /// Red primary (x, y) chromaticity.
    pub r: (f32, f32),
    /// Green primary (x, y) chromaticity.
    pub g: (f32, f32),
    /// Blue primary (x, y) chromaticity.
    pub b: (f32, f32),
    /// White point (x, y) chromaticity.
    pub w: (f32, f32),
    /// Color space name.
    pub name: &'static str,
}

/// D65 white point chromaticity (daylight, ~6500K).
pub const D65_XY: (f32, f32) = (0.31270, 0.32900);

/// DCI white point chromaticity (theatrical projection).
pub const DCI_XY: (f32, f32) = (0.31400, 0.35100);

/// sRGB / Rec.709 primaries (D65 white point).
pub const SRGB: Primaries = Primaries {
    r: (0.6400, 0.3300),
    g: (0.3000, 0.6000),
    b: (0.1500, 0.0600),
    w: D65_XY,
    name: "sRGB",
};

/// Display P3 primaries (D65 white point).
///
/// DCI-P3 primaries with the D65 white point used by consumer displays.
pub const DISPLAY_P3: Primaries = Primaries {
    r: (0.6800, 0.3200),
    g: (0.2650, 0.6900),
    b: (0.1500, 0.0600),
    w: D65_XY,
    name: "Display P3",
};

/// Rec.2020 primaries (D65 white point).
///
/// Ultra HD color space; also the container gamut for HDR (PQ/HLG)
/// signals.
pub const REC2020: Primaries = Primaries {
    r: (0.7080, 0.2920),
    g: (0.1700, 0.7970),
    b: (0.1310, 0.0460),
    w: D65_XY,
    name: "Rec.2020",
};

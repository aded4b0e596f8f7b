//! # Raster Errors
//!
//! Every contract the raster engine checks at its boundary is reported
//! through [`RasterError`]. Geometry that is merely off-screen is not an
//! error: it is clipped or silently rejected.

use core::fmt;

/// Result alias used across the crate
pub type RasterResult<T> = Result<T, RasterError>;

/// Boundary contract violations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterError {
    /// A 4.4 scale factor of zero was passed to the blitter
    InvalidScale,
    /// `x` or `w` is not a multiple of the fill chunk width
    MisalignedFill,
    /// An unclipped fill would leave the surface
    OutOfBounds,
    /// The pixel buffer is shorter than `stride * height`
    BufferTooSmall,
    /// Row stride is narrower than the visible width
    InvalidStride,
    /// Packed bitmap width is not a whole number of bytes
    UnalignedBitmapWidth,
    /// The requested bitmap frame lies past the end of its source bytes
    SourceTooShort,
    /// A per-scanline colour table has fewer entries than the bitmap has rows
    PaletteTooShort,
    /// A sprite definition asks for more rows than it may hold
    DefinitionTooTall,
    /// A theme carries no trail colours
    EmptyPalette,
    /// A theme's trail geometry or band shift is out of range
    InvalidTheme,
    /// `render_frame` was called before the digit sprites were built
    GlyphsNotLoaded,
    /// No engine is installed in the global slot
    NotInitialized,
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterError::InvalidScale => write!(f, "scale factor must be nonzero"),
            RasterError::MisalignedFill => write!(f, "fill is not aligned to its chunk width"),
            RasterError::OutOfBounds => write!(f, "fill rectangle leaves the surface"),
            RasterError::BufferTooSmall => write!(f, "pixel buffer is smaller than stride * height"),
            RasterError::InvalidStride => write!(f, "row stride is smaller than width"),
            RasterError::UnalignedBitmapWidth => write!(f, "bitmap width is not a multiple of 8"),
            RasterError::SourceTooShort => write!(f, "bitmap frame exceeds source data"),
            RasterError::PaletteTooShort => write!(f, "per-line palette has too few rows"),
            RasterError::DefinitionTooTall => write!(f, "sprite definition has too many rows"),
            RasterError::EmptyPalette => write!(f, "trail palette is empty"),
            RasterError::InvalidTheme => write!(f, "theme trail settings are out of range"),
            RasterError::GlyphsNotLoaded => write!(f, "digit glyphs have not been built"),
            RasterError::NotInitialized => write!(f, "raster engine is not initialized"),
        }
    }
}

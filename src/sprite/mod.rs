//! # Sprites
//!
//! A [`Sprite`] is an owned one-byte-per-pixel raster ready for the
//! blitter: `0` is transparent, any other byte is an opaque pixel already
//! resolved to the output format.
//!
//! Sprites are produced two ways:
//!
//! - `bitmap`: unpacking a packed 1bpp/2bpp [`BitmapDescriptor`]
//! - `definition`: rasterizing an ASCII-art [`SpriteDefinition`]
//!
//! The bitmap decoder can also skip the sprite and draw straight onto a
//! surface as scaled cells.

use crate::error::{RasterError, RasterResult};
use alloc::vec;
use alloc::vec::Vec;

pub mod bitmap;
pub mod definition;

pub use bitmap::{decode_to_sprite, decode_to_surface, BitmapDescriptor, DecodeFlags, PixelSource};
pub use definition::SpriteDefinition;

/// Transparent sprite pixel
pub const TRANSPARENT: u8 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: usize,
    height: usize,
    raw: Vec<u8>,
}

impl Sprite {
    /// Fully transparent sprite
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            raw: vec![TRANSPARENT; width * height],
        }
    }

    /// Wrap an existing raster; its length must be exactly `width * height`
    pub fn from_pixels(width: usize, height: usize, raw: Vec<u8>) -> RasterResult<Self> {
        if raw.len() != width * height {
            return Err(RasterError::BufferTooSmall);
        }
        Ok(Self { width, height, raw })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.raw
    }

    #[inline]
    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.raw
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.raw[y * self.width + x])
    }

    /// Number of opaque pixels
    pub fn coverage(&self) -> usize {
        self.raw.iter().filter(|&&p| p != TRANSPARENT).count()
    }
}

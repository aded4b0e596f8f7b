//! # Digit Glyphs
//!
//! The ten numerals as packed 8x6 1bpp frames, and the sprite table built
//! from them at setup.

use crate::error::RasterResult;
use crate::framebuffer::{ColorId, PixelFormat};
use crate::sprite::{decode_to_sprite, BitmapDescriptor, DecodeFlags, PixelSource, Sprite};
use alloc::vec::Vec;

pub const GLYPH_WIDTH: usize = 8;
pub const GLYPH_HEIGHT: usize = 6;
pub const GLYPH_COUNT: usize = 10;

/// One frame per digit, six scanlines each
#[rustfmt::skip]
pub const NUMERALS: [u8; GLYPH_COUNT * GLYPH_HEIGHT] = [
    0xfc, 0x84, 0x84, 0x84, 0x84, 0xfc, // 0
    0x30, 0x10, 0x10, 0x10, 0x10, 0x78, // 1
    0x7c, 0x04, 0xfc, 0x80, 0x80, 0xf8, // 2
    0x7c, 0x04, 0x7c, 0x04, 0x04, 0xfc, // 3
    0x80, 0x88, 0x88, 0xfc, 0x08, 0x08, // 4
    0xf8, 0x80, 0xfc, 0x04, 0x04, 0xfc, // 5
    0xf8, 0x80, 0xfc, 0x84, 0x84, 0xfc, // 6
    0xf8, 0x08, 0x10, 0x20, 0x40, 0x80, // 7
    0xfc, 0x84, 0xfc, 0x84, 0x84, 0xfc, // 8
    0xfc, 0x84, 0xfc, 0x04, 0x04, 0x7c, // 9
];

/// Digit sprites indexed 0-9, white so the blitter's tint picks the color
pub struct GlyphTable {
    digits: Vec<Sprite>,
}

impl GlyphTable {
    pub fn build(format: PixelFormat) -> RasterResult<Self> {
        let mut digits = Vec::with_capacity(GLYPH_COUNT);
        for digit in 0..GLYPH_COUNT {
            let desc = BitmapDescriptor::new(
                &NUMERALS,
                GLYPH_WIDTH,
                GLYPH_HEIGHT,
                PixelSource::Monochrome(ColorId::WHITE),
            )
            .frame(digit);
            digits.push(decode_to_sprite(&desc, format, DecodeFlags::empty())?);
        }
        log::debug!("built {} digit glyphs ({:?})", digits.len(), format);
        Ok(Self { digits })
    }

    /// Sprite for a decimal digit; values past 9 wrap
    pub fn digit(&self, value: u8) -> &Sprite {
        &self.digits[value as usize % GLYPH_COUNT]
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }
}

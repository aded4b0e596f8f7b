//! Packed bitmap decoding
//!
//! A packed bitmap is a run of byte-aligned scanlines, optionally holding
//! several frames back to back. Two encodings exist:
//!
//! - **1bpp**: eight pixels per byte, MSB leftmost unless byte-reversed.
//!   Set bits take the source color, clear bits are transparent.
//! - **2bpp**: four double-wide cells per byte, high bit pair leftmost.
//!   Each two-bit code indexes a palette.
//!
//! Either encoding can be unpacked into a [`Sprite`] or drawn straight onto
//! a [`Surface`], where every logical pixel becomes a box of configurable
//! pitch and size in 8.8 fixed point, centered on the descriptor's anchor.

use crate::error::{RasterError, RasterResult};
use crate::fixed::Fx8_8;
use crate::framebuffer::{ColorId, PixelFormat, Surface};
use crate::sprite::{Sprite, TRANSPARENT};
use bitflags::bitflags;

bitflags! {
    /// Decode options
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DecodeFlags: u8 {
        /// Walk the bits of each byte LSB first (1bpp only)
        const BYTE_REVERSED = 1 << 0;
        /// Start at the last scanline and walk upward
        const LINE_REVERSED = 1 << 1;
    }
}

/// Where a decoded pixel gets its color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelSource<'a> {
    /// 1bpp, one color for every set bit
    Monochrome(ColorId),
    /// 1bpp, one color per output scanline
    MonochromePerLine(&'a [ColorId]),
    /// 2bpp, codes index a shared palette; codes past its end are transparent
    Paletted(&'a [ColorId]),
    /// 2bpp, each output scanline has its own four colors
    PalettedPerLine(&'a [[ColorId; 4]]),
}

impl PixelSource<'_> {
    pub const fn bits_per_pixel(&self) -> usize {
        match self {
            PixelSource::Monochrome(_) | PixelSource::MonochromePerLine(_) => 1,
            PixelSource::Paletted(_) | PixelSource::PalettedPerLine(_) => 2,
        }
    }

    /// Color of `code` on output scanline `row`; `None` is transparent.
    /// 1bpp sources are only asked about set bits.
    fn color(&self, row: usize, code: usize) -> Option<ColorId> {
        match *self {
            PixelSource::Monochrome(ink) => Some(ink),
            PixelSource::MonochromePerLine(inks) => inks.get(row).copied(),
            PixelSource::Paletted(palette) => palette.get(code).copied(),
            PixelSource::PalettedPerLine(lines) => lines.get(row).map(|colors| colors[code]),
        }
    }

    fn line_table_len(&self) -> Option<usize> {
        match self {
            PixelSource::MonochromePerLine(colors) => Some(colors.len()),
            PixelSource::PalettedPerLine(lines) => Some(lines.len()),
            _ => None,
        }
    }
}

// =============================================================================
// DESCRIPTOR
// =============================================================================

/// Everything needed to decode one frame of a packed bitmap
#[derive(Debug, Clone, Copy)]
pub struct BitmapDescriptor<'a> {
    /// Packed scanlines for every frame
    pub raw: &'a [u8],
    /// Logical width in pixels, a multiple of 8
    pub width: usize,
    pub height: usize,
    /// Which frame of `raw` to decode
    pub frame: usize,
    pub source: PixelSource<'a>,
    /// Step between cell origins
    pub pitch_x: Fx8_8,
    pub pitch_y: Fx8_8,
    /// Visible cell size
    pub dot_width: Fx8_8,
    pub dot_height: Fx8_8,
    /// Surface point the bitmap is centered on
    pub anchor_x: Fx8_8,
    pub anchor_y: Fx8_8,
}

impl<'a> BitmapDescriptor<'a> {
    /// One-to-one cells, frame 0, anchored at the origin
    pub fn new(raw: &'a [u8], width: usize, height: usize, source: PixelSource<'a>) -> Self {
        Self {
            raw,
            width,
            height,
            frame: 0,
            source,
            pitch_x: Fx8_8::ONE,
            pitch_y: Fx8_8::ONE,
            dot_width: Fx8_8::ONE,
            dot_height: Fx8_8::ONE,
            anchor_x: Fx8_8::ZERO,
            anchor_y: Fx8_8::ZERO,
        }
    }

    pub fn frame(mut self, frame: usize) -> Self {
        self.frame = frame;
        self
    }

    pub fn cells(mut self, pitch_x: Fx8_8, pitch_y: Fx8_8, dot_width: Fx8_8, dot_height: Fx8_8) -> Self {
        self.pitch_x = pitch_x;
        self.pitch_y = pitch_y;
        self.dot_width = dot_width;
        self.dot_height = dot_height;
        self
    }

    pub fn anchored_at(mut self, x: Fx8_8, y: Fx8_8) -> Self {
        self.anchor_x = x;
        self.anchor_y = y;
        self
    }

    #[inline]
    pub fn bytes_per_line(&self) -> usize {
        self.width >> 3
    }

    /// Bytes occupied by one frame
    #[inline]
    pub fn frame_size(&self) -> usize {
        self.bytes_per_line() * self.height
    }

    fn validate(&self) -> RasterResult<()> {
        if self.width % 8 != 0 {
            return Err(RasterError::UnalignedBitmapWidth);
        }
        if self.raw.len() < self.frame_size() * (self.frame + 1) {
            return Err(RasterError::SourceTooShort);
        }
        if let Some(rows) = self.source.line_table_len() {
            if rows < self.height {
                return Err(RasterError::PaletteTooShort);
            }
        }
        Ok(())
    }
}

// =============================================================================
// SCANLINE WALK
// =============================================================================

/// One decoded logical pixel (or double-wide cell)
#[derive(Debug, Clone, Copy)]
struct Cell {
    column: usize,
    row: usize,
    /// Logical columns covered: 1 for 1bpp, 2 for 2bpp
    span: usize,
    /// `None` is transparent
    color: Option<ColorId>,
}

/// Visit every cell of the descriptor's frame in output order
fn walk<F>(desc: &BitmapDescriptor<'_>, flags: DecodeFlags, mut emit: F) -> RasterResult<()>
where
    F: FnMut(Cell),
{
    desc.validate()?;

    let bpl = desc.bytes_per_line();
    let base = desc.frame_size() * desc.frame;
    let byte_reversed = flags.contains(DecodeFlags::BYTE_REVERSED);

    for row in 0..desc.height {
        let line = if flags.contains(DecodeFlags::LINE_REVERSED) {
            desc.height - 1 - row
        } else {
            row
        };
        let start = base + line * bpl;

        for (k, &byte) in desc.raw[start..start + bpl].iter().enumerate() {
            if desc.source.bits_per_pixel() == 1 {
                for i in 0..8 {
                    let mask = if byte_reversed { 1 << i } else { 0x80 >> i };
                    emit(Cell {
                        column: k * 8 + i,
                        row,
                        span: 1,
                        color: if byte & mask != 0 { desc.source.color(row, 1) } else { None },
                    });
                }
            } else {
                for p in 0..4 {
                    let code = ((byte >> (6 - 2 * p)) & 3) as usize;
                    emit(Cell {
                        column: k * 8 + 2 * p,
                        row,
                        span: 2,
                        color: desc.source.color(row, code),
                    });
                }
            }
        }
    }
    Ok(())
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Unpack one frame into a `width * height` sprite resolved for `format`
pub fn decode_to_sprite(
    desc: &BitmapDescriptor<'_>,
    format: PixelFormat,
    flags: DecodeFlags,
) -> RasterResult<Sprite> {
    let mut sprite = Sprite::blank(desc.width, desc.height);
    let width = desc.width;
    let raster = sprite.pixels_mut();

    walk(desc, flags, |cell| {
        let value = cell.color.map_or(TRANSPARENT, |c| format.resolve1(c));
        let start = cell.row * width + cell.column;
        raster[start..start + cell.span].fill(value);
    })?;

    Ok(sprite)
}

/// Draw one frame straight onto `surface` as clipped, scaled cells
pub fn decode_to_surface(
    desc: &BitmapDescriptor<'_>,
    surface: &mut Surface<'_>,
    flags: DecodeFlags,
) -> RasterResult<()> {
    let extent_x = desc.pitch_x.times(desc.width as i32);
    let extent_y = desc.pitch_y.times(desc.height as i32);
    let origin_x = desc.anchor_x - desc.dot_width.half() - extent_x.half();
    let origin_y = desc.anchor_y - desc.dot_height.half() - extent_y.half();
    let dot_h = desc.dot_height.to_int();

    walk(desc, flags, |cell| {
        let Some(color) = cell.color else {
            return;
        };
        let x = origin_x + desc.pitch_x.times(cell.column as i32);
        let y = origin_y + desc.pitch_y.times(cell.row as i32);
        let w = desc.dot_width.times(cell.span as i32);
        surface.fill_rect(color, x.to_int(), y.to_int(), w.to_int(), dot_h);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    const ZERO: [u8; 6] = [0xfc, 0x84, 0x84, 0x84, 0x84, 0xfc];
    const RGBW: [ColorId; 4] = [ColorId::RED, ColorId::GREEN, ColorId::BLUE, ColorId::WHITE];

    fn mask_of(sprite: &Sprite) -> Vec<u8> {
        (0..sprite.height())
            .map(|y| {
                (0..sprite.width()).fold(0u8, |acc, x| {
                    (acc << 1) | (sprite.pixel(x, y).unwrap() != 0) as u8
                })
            })
            .collect()
    }

    #[test]
    fn test_digit_zero_unpacks_msb_first() {
        let desc = BitmapDescriptor::new(&ZERO, 8, 6, PixelSource::Monochrome(ColorId::WHITE));
        let sprite = decode_to_sprite(&desc, PixelFormat::Argb8, DecodeFlags::empty()).unwrap();
        assert_eq!((sprite.width(), sprite.height()), (8, 6));
        assert_eq!(sprite.pixels().len(), 48);
        assert_eq!(mask_of(&sprite), ZERO.to_vec());
        assert_eq!(sprite.pixel(0, 0), Some(0xFF));
        assert_eq!(sprite.pixel(7, 0), Some(0));
    }

    #[test]
    fn test_byte_reversal_mirrors_rows() {
        let raw = [0x80, 0x03];
        let desc = BitmapDescriptor::new(&raw, 8, 2, PixelSource::Monochrome(ColorId::WHITE));
        let sprite = decode_to_sprite(&desc, PixelFormat::Argb8, DecodeFlags::BYTE_REVERSED).unwrap();
        assert_eq!(mask_of(&sprite), vec![0x01, 0xC0]);
    }

    #[test]
    fn test_line_reversal_flips_vertically() {
        let raw = [0x01, 0x02, 0x04];
        let desc = BitmapDescriptor::new(&raw, 8, 3, PixelSource::Monochrome(ColorId::WHITE));
        let sprite = decode_to_sprite(&desc, PixelFormat::Argb8, DecodeFlags::LINE_REVERSED).unwrap();
        assert_eq!(mask_of(&sprite), vec![0x04, 0x02, 0x01]);
    }

    #[test]
    fn test_frame_index_selects_frame() {
        let raw = [0x00, 0x00, 0xAA, 0x55];
        let desc = BitmapDescriptor::new(&raw, 8, 2, PixelSource::Monochrome(ColorId::WHITE)).frame(1);
        let sprite = decode_to_sprite(&desc, PixelFormat::Argb8, DecodeFlags::empty()).unwrap();
        assert_eq!(mask_of(&sprite), vec![0xAA, 0x55]);
    }

    #[test]
    fn test_per_line_ink() {
        let raw = [0x80, 0x80];
        let inks = [ColorId::RED, ColorId::BLUE];
        let desc = BitmapDescriptor::new(&raw, 8, 2, PixelSource::MonochromePerLine(&inks));
        let sprite = decode_to_sprite(&desc, PixelFormat::Argb8, DecodeFlags::empty()).unwrap();
        assert_eq!(sprite.pixel(0, 0), Some(0xF0));
        assert_eq!(sprite.pixel(0, 1), Some(0xC3));
    }

    #[test]
    fn test_paletted_cells_are_double_wide() {
        let raw = [0b00_01_10_11];
        let desc = BitmapDescriptor::new(&raw, 8, 1, PixelSource::Paletted(&RGBW));
        let sprite = decode_to_sprite(&desc, PixelFormat::Argb8, DecodeFlags::empty()).unwrap();
        assert_eq!(sprite.pixels(), &[0xF0, 0xF0, 0xCC, 0xCC, 0xC3, 0xC3, 0xFF, 0xFF]);
    }

    #[test]
    fn test_short_palette_codes_are_transparent() {
        let raw = [0b11_00_11_00];
        let palette = [ColorId::WHITE];
        let desc = BitmapDescriptor::new(&raw, 8, 1, PixelSource::Paletted(&palette));
        let sprite = decode_to_sprite(&desc, PixelFormat::Argb8, DecodeFlags::empty()).unwrap();
        assert_eq!(sprite.pixels(), &[0, 0, 0xFF, 0xFF, 0, 0, 0xFF, 0xFF]);
    }

    #[test]
    fn test_per_line_palette() {
        let raw = [0b11_11_11_11, 0b11_11_11_11];
        let lines = [RGBW, [ColorId::BLACK; 4]];
        let desc = BitmapDescriptor::new(&raw, 8, 2, PixelSource::PalettedPerLine(&lines));
        let sprite = decode_to_sprite(&desc, PixelFormat::Argb8, DecodeFlags::empty()).unwrap();
        assert!(sprite.pixels()[..8].iter().all(|&p| p == 0xFF));
        assert!(sprite.pixels()[8..].iter().all(|&p| p == 0xC0));
    }

    #[test]
    fn test_validation_errors() {
        let mono = PixelSource::Monochrome(ColorId::WHITE);
        let desc = BitmapDescriptor::new(&ZERO, 6, 6, mono);
        assert_eq!(
            decode_to_sprite(&desc, PixelFormat::Argb8, DecodeFlags::empty()).err(),
            Some(RasterError::UnalignedBitmapWidth)
        );
        let desc = BitmapDescriptor::new(&ZERO, 8, 6, mono).frame(1);
        assert_eq!(
            decode_to_sprite(&desc, PixelFormat::Argb8, DecodeFlags::empty()).err(),
            Some(RasterError::SourceTooShort)
        );
        let inks = [ColorId::RED];
        let desc = BitmapDescriptor::new(&ZERO, 8, 6, PixelSource::MonochromePerLine(&inks));
        assert_eq!(
            decode_to_sprite(&desc, PixelFormat::Argb8, DecodeFlags::empty()).err(),
            Some(RasterError::PaletteTooShort)
        );
    }

    #[test]
    fn test_surface_cells_are_scaled_and_centered() {
        let one = [0x30, 0x10, 0x10, 0x10, 0x10, 0x78];
        let mut buf = vec![0u8; 32 * 32];
        let mut surface = Surface::new(&mut buf, 32, 32, PixelFormat::Argb8).unwrap();
        let two = Fx8_8::from_int(2);
        let desc = BitmapDescriptor::new(&one, 8, 6, PixelSource::Monochrome(ColorId::WHITE))
            .cells(two, two, two, two)
            .anchored_at(Fx8_8::from_int(16), Fx8_8::from_int(16));
        decode_to_surface(&desc, &mut surface, DecodeFlags::empty()).unwrap();

        // origin = 16 - 1 - 8 = 7 horizontally, 16 - 1 - 6 = 9 vertically
        assert_eq!(surface.pixel(11, 9), Some(0xFF));
        assert_eq!(surface.pixel(14, 10), Some(0xFF));
        assert_eq!(surface.pixel(10, 9), Some(0));
        assert_eq!(surface.pixel(15, 9), Some(0));
        assert_eq!(surface.pixel(11, 11), Some(0));
        assert_eq!(surface.pixel(13, 11), Some(0xFF));
        assert_eq!(surface.pixel(11, 8), Some(0));
    }

    #[test]
    fn test_surface_paletted_row() {
        let raw = [0b00_01_10_11];
        let mut buf = vec![0u8; 8 * 2];
        let mut surface = Surface::new(&mut buf, 8, 2, PixelFormat::Argb8).unwrap();
        let desc = BitmapDescriptor::new(&raw, 8, 1, PixelSource::Paletted(&RGBW))
            .anchored_at(Fx8_8::from_raw(0x480), Fx8_8::ONE);
        decode_to_surface(&desc, &mut surface, DecodeFlags::empty()).unwrap();
        assert_eq!(surface.row(0), &[0xF0, 0xF0, 0xCC, 0xCC, 0xC3, 0xC3, 0xFF, 0xFF]);
        assert!(surface.row(1).iter().all(|&p| p == 0));
    }

    #[test]
    fn test_surface_decode_clips_offscreen_cells() {
        let mut buf = vec![0u8; 4 * 4];
        let mut surface = Surface::new(&mut buf, 4, 4, PixelFormat::Mono8).unwrap();
        let desc = BitmapDescriptor::new(&ZERO, 8, 6, PixelSource::Monochrome(ColorId::RED));
        decode_to_surface(&desc, &mut surface, DecodeFlags::empty()).unwrap();
        // centered on the origin: only the lower right quarter lands on screen
        assert_eq!(surface.pixel(0, 0), Some(0xFF));
        assert_eq!(surface.pixel(3, 3), Some(0));
    }

    #[test]
    fn test_surface_decode_with_huge_pitch_is_clipped() {
        let mut buf = vec![0u8; 4 * 4];
        let mut surface = Surface::new(&mut buf, 4, 4, PixelFormat::Argb8).unwrap();
        let far = Fx8_8::from_raw(i32::MAX / 4);
        let desc = BitmapDescriptor::new(&ZERO, 8, 6, PixelSource::Monochrome(ColorId::WHITE))
            .cells(far, Fx8_8::ONE, Fx8_8::ONE, Fx8_8::ONE);
        decode_to_surface(&desc, &mut surface, DecodeFlags::empty()).unwrap();
        assert!(buf.iter().all(|&p| p == 0));
    }
}

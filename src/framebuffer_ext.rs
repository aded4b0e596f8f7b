//! Scaled sprite blitting against a clip region
use crate::error::{RasterError, RasterResult};
use crate::fixed::{Scale4_4, SAMPLE_FRAC_BITS};
use crate::framebuffer::Surface;
use crate::sprite::{Sprite, TRANSPARENT};

/// Height of the status band the stock clip keeps clear
pub const HEADER_BAND: i32 = 16;

/// Rectangular viewport for blits; low edges inclusive, high edges exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRegion {
    pub x_lo: i32,
    pub x_hi: i32,
    pub y_lo: i32,
    pub y_hi: i32,
}

impl ClipRegion {
    pub const fn new(x_lo: i32, x_hi: i32, y_lo: i32, y_hi: i32) -> Self {
        Self { x_lo, x_hi, y_lo, y_hi }
    }

    /// The whole `width * height` area
    pub const fn full(width: usize, height: usize) -> Self {
        Self::new(0, width as i32, 0, height as i32)
    }

    /// The whole area minus a band of `header` rows at the top
    pub const fn below_header(width: usize, height: usize, header: i32) -> Self {
        Self::new(0, width as i32, header, height as i32)
    }

    /// Intersection with the physical extents of a surface
    pub fn clamped_to(&self, width: usize, height: usize) -> Self {
        Self {
            x_lo: self.x_lo.max(0),
            x_hi: self.x_hi.min(width as i32),
            y_lo: self.y_lo.max(0),
            y_hi: self.y_hi.min(height as i32),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x_lo >= self.x_hi || self.y_lo >= self.y_hi
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x_lo && x < self.x_hi && y >= self.y_lo && y < self.y_hi
    }
}

/// Sprite operations
impl Surface<'_> {
    /// Draw `sprite` with its scaled top-left corner at `(x, y)`.
    ///
    /// Sampling is nearest-neighbour inverse mapping: each destination pixel
    /// steps the source cursors by `0x8000 / scale`. Transparent source
    /// pixels are skipped; opaque ones are written as `sample & tint`, so a
    /// white sprite takes on the tint color and `0xFF` leaves colors alone.
    /// Nothing outside `clip` (or the surface) is touched.
    pub fn blit(
        &mut self,
        clip: &ClipRegion,
        mut x: i32,
        mut y: i32,
        scale_x: Scale4_4,
        scale_y: Scale4_4,
        sprite: &Sprite,
        tint: u8,
    ) -> RasterResult<()> {
        if scale_x.is_zero() || scale_y.is_zero() {
            return Err(RasterError::InvalidScale);
        }

        let clip = clip.clamped_to(self.width(), self.height());
        let mut lines = scale_y.apply(sprite.height());
        let mut pixels = scale_x.apply(sprite.width());
        let ui = scale_x.reciprocal();
        let vi = scale_y.reciprocal();
        let mut u: u32 = 0;
        let mut v: u32 = 0;

        // Trivially reject anything completely outside the clip window
        if y >= clip.y_hi
            || y.saturating_add(lines) <= clip.y_lo
            || x >= clip.x_hi
            || x.saturating_add(pixels) <= clip.x_lo
        {
            return Ok(());
        }

        if y < clip.y_lo {
            let cly = clip.y_lo - y;
            lines -= cly;
            y += cly;
            v += cly as u32 * vi;
        }
        if lines > clip.y_hi - y {
            lines = clip.y_hi - y;
        }
        if x < clip.x_lo {
            let clx = clip.x_lo - x;
            pixels -= clx;
            x += clx;
            u += clx as u32 * ui;
        }
        if pixels > clip.x_hi - x {
            pixels = clip.x_hi - x;
        }
        if lines <= 0 || pixels <= 0 {
            return Ok(());
        }

        let src = sprite.pixels();
        let src_width = sprite.width();
        let (x, y) = (x as usize, y as usize);
        let u0 = u;

        for j in 0..lines as usize {
            let line = (v >> SAMPLE_FRAC_BITS) as usize * src_width;
            let dest = &mut self.row_mut(y + j)[x..x + pixels as usize];
            u = u0;
            for px in dest.iter_mut() {
                let ch = src[line + (u >> SAMPLE_FRAC_BITS) as usize];
                if ch != TRANSPARENT {
                    *px = ch & tint;
                }
                u += ui;
            }
            v += vi;
        }
        Ok(())
    }
}

//! Directly addressed pixel surface with aligned and clipped box fills
use crate::error::{RasterError, RasterResult};
use crate::framebuffer::color::{ColorId, PixelFormat};
use embedded_graphics::{pixelcolor::Rgb888, primitives::Rectangle};
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    Pixel,
};

/// Native resolution of the watch display
pub const DISPLAY_WIDTH: usize = 144;
pub const DISPLAY_HEIGHT: usize = 168;

// =============================================================================
// FILL CHUNKS
// =============================================================================

/// Granularity of one aligned fill store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkWidth {
    Byte = 1,
    Half = 2,
    Word = 4,
}

impl ChunkWidth {
    #[inline]
    pub const fn bytes(self) -> usize {
        self as usize
    }

    /// Widest chunk that evenly divides `width`
    pub const fn widest_for(width: usize) -> Self {
        if width % 4 == 0 {
            ChunkWidth::Word
        } else if width % 2 == 0 {
            ChunkWidth::Half
        } else {
            ChunkWidth::Byte
        }
    }
}

/// A resolved pixel pattern; its width selects the store size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillPattern {
    Byte(u8),
    Half(u16),
    Word(u32),
}

impl FillPattern {
    /// Resolve `color` for `format` at the given chunk width
    pub fn resolve(format: PixelFormat, color: ColorId, chunk: ChunkWidth) -> Self {
        match chunk {
            ChunkWidth::Byte => FillPattern::Byte(format.resolve1(color)),
            ChunkWidth::Half => FillPattern::Half(format.resolve2(color)),
            ChunkWidth::Word => FillPattern::Word(format.resolve4(color)),
        }
    }

    #[inline]
    pub const fn chunk(self) -> ChunkWidth {
        match self {
            FillPattern::Byte(_) => ChunkWidth::Byte,
            FillPattern::Half(_) => ChunkWidth::Half,
            FillPattern::Word(_) => ChunkWidth::Word,
        }
    }
}

// =============================================================================
// SURFACE
// =============================================================================

/// One byte per pixel view over a borrowed output buffer.
///
/// The buffer is owned by the host for the lifetime of a frame; the surface
/// only borrows it. `stride` is the distance in bytes between row starts.
pub struct Surface<'a> {
    buffer: &'a mut [u8],
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
}

impl<'a> Surface<'a> {
    /// Tightly packed surface (`stride == width`)
    pub fn new(
        buffer: &'a mut [u8],
        width: usize,
        height: usize,
        format: PixelFormat,
    ) -> RasterResult<Self> {
        Self::with_stride(buffer, width, height, width, format)
    }

    pub fn with_stride(
        buffer: &'a mut [u8],
        width: usize,
        height: usize,
        stride: usize,
        format: PixelFormat,
    ) -> RasterResult<Self> {
        if stride < width {
            return Err(RasterError::InvalidStride);
        }
        if buffer.len() < stride * height {
            return Err(RasterError::BufferTooSmall);
        }
        Ok(Self {
            buffer,
            width,
            height,
            stride,
            format,
        })
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
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.buffer
    }

    /// Read back one pixel, `None` outside the surface
    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.buffer[y * self.stride + x])
    }

    /// Write one raw byte; silently ignored outside the surface
    pub fn put_pixel(&mut self, x: usize, y: usize, value: u8) {
        if x < self.width && y < self.height {
            self.buffer[y * self.stride + x] = value;
        }
    }

    /// Visible bytes of row `y`
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.buffer[start..start + self.width]
    }

    /// Mutable visible bytes of row `y`
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        &mut self.buffer[start..start + self.width]
    }

    /// Fill the whole surface with the widest stores the width allows
    pub fn clear(&mut self, color: ColorId) {
        let chunk = ChunkWidth::widest_for(self.width);
        let pattern = FillPattern::resolve(self.format, color, chunk);
        // SAFETY: the full extent is in bounds and the width is a chunk multiple
        unsafe { self.fill_aligned_unchecked(pattern, 0, 0, self.width, self.height) }
    }

    // =========================================================================
    // BOX FILLS
    // =========================================================================

    /// Raw aligned box fill.
    ///
    /// # Safety
    ///
    /// No bounds or alignment checking is done. The caller guarantees
    /// `x + w <= width`, `y + h <= height`, and that `x` and `w` are
    /// multiples of the pattern's chunk width.
    pub unsafe fn fill_aligned_unchecked(
        &mut self,
        pattern: FillPattern,
        x: usize,
        y: usize,
        w: usize,
        h: usize,
    ) {
        let n = pattern.chunk().bytes();
        let chunks = w / n;
        let base = self.buffer.as_mut_ptr();

        for j in 0..h {
            let mut lp = base.add((y + j) * self.stride + x);
            for _ in 0..chunks {
                match pattern {
                    FillPattern::Byte(v) => lp.write(v),
                    FillPattern::Half(v) => (lp as *mut u16).write_unaligned(v),
                    FillPattern::Word(v) => (lp as *mut u32).write_unaligned(v),
                }
                lp = lp.add(n);
            }
        }
    }

    /// Checked aligned box fill: same stores as the raw filler, but
    /// out-of-range or misaligned requests are refused
    pub fn fill_aligned(
        &mut self,
        pattern: FillPattern,
        x: usize,
        y: usize,
        w: usize,
        h: usize,
    ) -> RasterResult<()> {
        let n = pattern.chunk().bytes();
        if x % n != 0 || w % n != 0 {
            return Err(RasterError::MisalignedFill);
        }
        let inside = matches!(x.checked_add(w), Some(right) if right <= self.width)
            && matches!(y.checked_add(h), Some(bottom) if bottom <= self.height);
        if !inside {
            return Err(RasterError::OutOfBounds);
        }
        // SAFETY: bounds and alignment were verified above
        unsafe { self.fill_aligned_unchecked(pattern, x, y, w, h) };
        Ok(())
    }

    /// Clipped box fill, safe for any rectangle.
    ///
    /// Rectangles whose origin is past the right or bottom edge, or that clip
    /// away entirely, draw nothing. Wide chunks require `x`, `w` and the
    /// surface width to be chunk multiples.
    pub fn clipped_fill(
        &mut self,
        color: ColorId,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        chunk: ChunkWidth,
    ) -> RasterResult<()> {
        let n = chunk.bytes() as i32;
        if n > 1 && (x.rem_euclid(n) != 0 || w.rem_euclid(n) != 0 || self.width as i32 % n != 0) {
            return Err(RasterError::MisalignedFill);
        }

        if let Some((x, y, w, h)) = self.clip_rect(x, y, w, h) {
            let pattern = FillPattern::resolve(self.format, color, chunk);
            // SAFETY: the rectangle was clipped to the surface and alignment of
            // x and w is preserved because both clip edges are chunk multiples
            unsafe { self.fill_aligned_unchecked(pattern, x, y, w, h) };
        }
        Ok(())
    }

    /// Clipped single-byte box fill; any rectangle is accepted
    pub fn fill_rect(&mut self, color: ColorId, x: i32, y: i32, w: i32, h: i32) {
        if let Some((x, y, w, h)) = self.clip_rect(x, y, w, h) {
            let pattern = FillPattern::Byte(self.format.resolve1(color));
            // SAFETY: clipped to the surface, byte stores are always aligned
            unsafe { self.fill_aligned_unchecked(pattern, x, y, w, h) };
        }
    }

    /// Intersect a rectangle with the surface, `None` when nothing is left
    fn clip_rect(&self, mut x: i32, mut y: i32, mut w: i32, mut h: i32) -> Option<(usize, usize, usize, usize)> {
        let xrez = self.width as i32;
        let yrez = self.height as i32;

        if x >= xrez || y >= yrez {
            return None;
        }
        if x < 0 {
            w = w.saturating_add(x);
            x = 0;
        }
        if y < 0 {
            h = h.saturating_add(y);
            y = 0;
        }
        // x and y now lie inside the surface, so these differences cannot overflow
        if w > xrez - x {
            w = xrez - x;
        }
        if h > yrez - y {
            h = yrez - y;
        }
        if w <= 0 || h <= 0 {
            return None;
        }
        Some((x as usize, y as usize, w as usize, h as usize))
    }
}

// Implement DrawTarget for embedded-graphics
impl DrawTarget for Surface<'_> {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }
            let value = self.format.resolve1(ColorId::from(color));
            self.put_pixel(x as usize, y as usize, value);
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_rect(
            ColorId::from(color),
            area.top_left.x,
            area.top_left.y,
            area.size.width.min(i32::MAX as u32) as i32,
            area.size.height.min(i32::MAX as u32) as i32,
        );
        Ok(())
    }
}

impl OriginDimensions for Surface<'_> {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

//! In-memory display host
use crate::error::RasterResult;
use crate::framebuffer::{PixelFormat, Surface, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::host::DisplayHost;
use alloc::vec;
use alloc::vec::Vec;

/// A display whose frame buffer is a plain heap allocation
pub struct BufferDisplay {
    buffer: Vec<u8>,
    width: usize,
    height: usize,
    format: PixelFormat,
    frames: u32,
}

impl BufferDisplay {
    pub fn new(width: usize, height: usize, format: PixelFormat) -> Self {
        Self {
            buffer: vec![0; width * height],
            width,
            height,
            format,
            frames: 0,
        }
    }

    /// 144x168 color display
    pub fn watch() -> Self {
        Self::new(DISPLAY_WIDTH, DISPLAY_HEIGHT, PixelFormat::Argb8)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.buffer
    }

    /// Number of times the buffer has been released back to the display
    pub fn frames_presented(&self) -> u32 {
        self.frames
    }
}

impl DisplayHost for BufferDisplay {
    fn format(&self) -> PixelFormat {
        self.format
    }

    fn with_frame(
        &mut self,
        draw: &mut dyn FnMut(&mut Surface<'_>) -> RasterResult<()>,
    ) -> RasterResult<()> {
        let result = {
            let mut surface = Surface::new(&mut self.buffer, self.width, self.height, self.format)?;
            draw(&mut surface)
        };
        self.frames += 1;
        log::trace!("frame {} released", self.frames);
        result
    }
}

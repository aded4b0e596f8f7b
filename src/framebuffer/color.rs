//! Color identifiers and per-format color resolution
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

/// A 24-bit `0xRRGGBB` color id. Any high byte is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorId(u32);

impl ColorId {
    pub const BLACK: ColorId = ColorId(0x000000);
    pub const WHITE: ColorId = ColorId(0xFFFFFF);
    pub const RED: ColorId = ColorId(0xFF0000);
    pub const GREEN: ColorId = ColorId(0x00FF00);
    pub const BLUE: ColorId = ColorId(0x0000FF);
    pub const YELLOW: ColorId = ColorId(0xFFFF00);
    pub const ORANGE: ColorId = ColorId(0xFF8000);

    pub const fn from_hex(hex: u32) -> Self {
        Self(hex & 0x00FF_FFFF)
    }

    pub const fn hex(self) -> u32 {
        self.0
    }

    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    pub fn to_rgb888(self) -> Rgb888 {
        Rgb888::new(self.r(), self.g(), self.b())
    }

    pub fn from_rgb888(color: Rgb888) -> Self {
        Self(((color.r() as u32) << 16) | ((color.g() as u32) << 8) | color.b() as u32)
    }
}

impl From<Rgb888> for ColorId {
    fn from(color: Rgb888) -> Self {
        ColorId::from_rgb888(color)
    }
}

/// How one byte of the output buffer encodes a pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// `0bAARRGGBB`, two bits per channel, alpha always fully set
    Argb8,
    /// No color channel; any drawn pixel is fully set
    Mono8,
}

impl PixelFormat {
    /// Whether pixels carry independent color
    pub const fn has_color(self) -> bool {
        matches!(self, PixelFormat::Argb8)
    }

    /// Native single-byte encoding of `color`
    pub fn resolve1(self, color: ColorId) -> u8 {
        match self {
            PixelFormat::Mono8 => 0xFF,
            PixelFormat::Argb8 => {
                let rgb = color.to_rgb888();
                0xC0 | ((rgb.r() >> 6) << 4) | ((rgb.g() >> 6) << 2) | (rgb.b() >> 6)
            }
        }
    }

    /// `resolve1` replicated into both bytes of a half-word store
    pub fn resolve2(self, color: ColorId) -> u16 {
        match self {
            PixelFormat::Mono8 => 0xFFFF,
            PixelFormat::Argb8 => u16::from_ne_bytes([self.resolve1(color); 2]),
        }
    }

    /// `resolve1` replicated into all four bytes of a word store
    pub fn resolve4(self, color: ColorId) -> u32 {
        match self {
            PixelFormat::Mono8 => 0xFFFF_FFFF,
            PixelFormat::Argb8 => u32::from_ne_bytes([self.resolve1(color); 4]),
        }
    }
}

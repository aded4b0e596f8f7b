//! # Frame Composer
//!
//! Draws one frame of the watchface: a trail of echoed hour digits swept
//! along a direction set by the minute hand, then the crisp hour on top.
//!
//! ## Trail Geometry
//!
//! ```text
//!   minute 0          minute 15
//!
//!      0 3  <- echo 0
//!      0 3               [03]0 3 0 3 0 3 ...
//!      ...
//!     [03]  <- foreground, drawn last
//! ```
//!
//! The direction vector comes from the trig lookup scaled to the theme's
//! radius, then divided so its dominant axis moves exactly one pixel
//! (16 in 12.4) per echo.

use crate::error::{RasterError, RasterResult};
use crate::fixed::Fx12_4;
use crate::framebuffer::{ColorId, PixelFormat, Surface};
use crate::framebuffer_ext::{ClipRegion, HEADER_BAND};
use crate::glyphs::GlyphTable;
use crate::trig::{cos_lookup, sin_lookup, TRIG_MAX_RATIO};
use crate::ui::clock::TimeState;
use crate::ui::theme::Theme;

/// Watch angle units per minute of the hand's sweep
const ANGLE_PER_MINUTE: i32 = (0x8000 / 60) * 2;

/// Per-echo step along the minute hand, dominant axis normalized to 1.0
pub fn trail_direction(minute: u8, radius: i32) -> (Fx12_4, Fx12_4) {
    let angle = ANGLE_PER_MINUTE * minute as i32;
    let mut tx = sin_lookup(angle) * radius / TRIG_MAX_RATIO;
    let mut ty = -cos_lookup(angle) * radius / TRIG_MAX_RATIO;

    let major = tx.abs().max(ty.abs()) >> 4;
    if major == 0 {
        return (Fx12_4::ZERO, Fx12_4::ZERO);
    }
    tx /= major;
    ty /= major;
    (Fx12_4::from_raw(tx), Fx12_4::from_raw(ty))
}

// =============================================================================
// ENGINE
// =============================================================================

/// Everything the renderer keeps between frames
pub struct Engine {
    format: PixelFormat,
    theme: Theme,
    clip: ClipRegion,
    time: TimeState,
    glyphs: Option<GlyphTable>,
}

impl Engine {
    /// Engine without glyphs; call [`Engine::init_glyphs`] before rendering
    pub fn new(format: PixelFormat, theme: Theme) -> RasterResult<Self> {
        theme.validate()?;
        Ok(Self {
            format,
            theme,
            // Unbounded below the header; clamped to the surface at draw time
            clip: ClipRegion::new(0, i32::MAX, HEADER_BAND, i32::MAX),
            time: TimeState::new(),
            glyphs: None,
        })
    }

    /// Engine with its digit sprites already built
    pub fn with_glyphs(format: PixelFormat, theme: Theme) -> RasterResult<Self> {
        let mut engine = Self::new(format, theme)?;
        engine.init_glyphs()?;
        Ok(engine)
    }

    /// Build the ten digit sprites; rebuilding replaces the old table
    pub fn init_glyphs(&mut self) -> RasterResult<()> {
        self.glyphs = Some(GlyphTable::build(self.format)?);
        Ok(())
    }

    /// Drop the digit sprites
    pub fn release_glyphs(&mut self) {
        if self.glyphs.take().is_some() {
            log::debug!("released digit glyphs");
        }
    }

    pub fn glyphs_loaded(&self) -> bool {
        self.glyphs.is_some()
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn time(&self) -> &TimeState {
        &self.time
    }

    pub fn clip(&self) -> ClipRegion {
        self.clip
    }

    pub fn set_clip(&mut self, clip: ClipRegion) {
        self.clip = clip;
    }

    /// Render one frame for the given wall-clock reading.
    ///
    /// A surface without color is left untouched.
    pub fn render_frame(
        &mut self,
        surface: &mut Surface<'_>,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> RasterResult<()> {
        self.time.observe(hour, minute, second);

        let glyphs = self.glyphs.as_ref().ok_or(RasterError::GlyphsNotLoaded)?;
        if !surface.format().has_color() {
            log::trace!("monochrome surface, skipping frame");
            return Ok(());
        }

        let theme = &self.theme;
        self.clip.y_lo = theme.header_band;
        let clip = self.clip.clamped_to(surface.width(), surface.height());

        if let Some(background) = theme.background {
            surface.clear(background);
        }

        let pair = DigitPair {
            glyphs,
            theme,
            clip,
            tens: self.time.digits[0],
            units: self.time.digits[1],
        };

        let (tx, ty) = trail_direction(self.time.minute, theme.trail_radius);
        let px = Fx12_4::from_raw((surface.width() as i32) << 3);
        let py = Fx12_4::from_raw((surface.height() as i32) << 3);

        let mut ox = tx.times(-theme.echo_count);
        let mut oy = ty.times(-theme.echo_count);
        for step in 0..theme.echo_count {
            ox += tx;
            oy += ty;
            pair.draw(surface, px - ox, py - oy, theme.band(step))?;
        }

        pair.draw(surface, px, py, theme.highlight)?;

        log::trace!(
            "frame {:02}:{:02}:{:02} drawn, step ({}, {})",
            self.time.hour,
            self.time.minute,
            self.time.second,
            tx.raw(),
            ty.raw()
        );
        Ok(())
    }
}

/// The two hour digits as one drawable
struct DigitPair<'a> {
    glyphs: &'a GlyphTable,
    theme: &'a Theme,
    clip: ClipRegion,
    tens: u8,
    units: u8,
}

impl DigitPair<'_> {
    /// Draw the pair centred on `(xp, yp)` tinted `color`
    fn draw(&self, surface: &mut Surface<'_>, xp: Fx12_4, yp: Fx12_4, color: ColorId) -> RasterResult<()> {
        let tint = surface.format().resolve1(color);
        let mut txp = xp + self.theme.pair_offset_x;
        let typ = yp + self.theme.pair_offset_y;

        for digit in [self.tens, self.units] {
            surface.blit(
                &self.clip,
                txp.to_int() + self.theme.digit_nudge_x,
                typ.to_int(),
                self.theme.digit_scale_x,
                self.theme.digit_scale_y,
                self.glyphs.digit(digit),
                tint,
            )?;
            txp += self.theme.digit_advance;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
    use alloc::vec;

    fn render(engine: &mut Engine, h: u8, m: u8, s: u8) -> alloc::vec::Vec<u8> {
        let mut buf = vec![0u8; DISPLAY_WIDTH * DISPLAY_HEIGHT];
        let mut surface =
            Surface::new(&mut buf, DISPLAY_WIDTH, DISPLAY_HEIGHT, PixelFormat::Argb8).unwrap();
        engine.render_frame(&mut surface, h, m, s).unwrap();
        buf
    }

    fn at(buf: &[u8], x: usize, y: usize) -> u8 {
        buf[y * DISPLAY_WIDTH + x]
    }

    #[test]
    fn test_direction_at_quarter_hours() {
        assert_eq!(trail_direction(0, 0x1000), (Fx12_4::ZERO, Fx12_4::from_raw(-16)));
        assert_eq!(trail_direction(15, 0x1000), (Fx12_4::from_raw(16), Fx12_4::ZERO));
        assert_eq!(trail_direction(30, 0x1000), (Fx12_4::ZERO, Fx12_4::from_raw(16)));
        assert_eq!(trail_direction(45, 0x1000), (Fx12_4::from_raw(-16), Fx12_4::ZERO));
    }

    #[test]
    fn test_direction_dominant_axis_is_unit() {
        for minute in 0..60 {
            let (tx, ty) = trail_direction(minute, 0x1000);
            let (ax, ay) = (tx.raw().abs(), ty.raw().abs());
            assert_eq!(ax.max(ay), 16, "minute {}", minute);
            assert!(ax.min(ay) <= 16);
        }
        assert_eq!(trail_direction(7, 8), (Fx12_4::ZERO, Fx12_4::ZERO));
    }

    #[test]
    fn test_render_requires_glyphs() {
        let mut engine = Engine::new(PixelFormat::Argb8, Theme::classic()).unwrap();
        let mut buf = vec![0u8; 16 * 16];
        let mut surface = Surface::new(&mut buf, 16, 16, PixelFormat::Argb8).unwrap();
        assert_eq!(
            engine.render_frame(&mut surface, 3, 0, 0),
            Err(RasterError::GlyphsNotLoaded)
        );
    }

    #[test]
    fn test_foreground_digits_for_three_oclock() {
        let mut engine = Engine::with_glyphs(PixelFormat::Argb8, Theme::classic()).unwrap();
        let buf = render(&mut engine, 3, 0, 0);
        assert_eq!(engine.time().digits[..2], [0, 3]);

        // '0' top-left cell at (36, 60), '3' starts at x = 76
        assert_eq!(at(&buf, 36, 60), 0xFF);
        assert_eq!(at(&buf, 41, 67), 0xFF);
        assert_eq!(at(&buf, 83, 60), 0xFF);
        // '3' has a clear first column
        assert_ne!(at(&buf, 76, 60), 0xFF);
    }

    #[test]
    fn test_trail_extends_toward_twelve_with_bands() {
        let mut engine = Engine::with_glyphs(PixelFormat::Argb8, Theme::classic()).unwrap();
        let buf = render(&mut engine, 3, 0, 0);
        let purple = PixelFormat::Argb8.resolve1(ColorId::from_hex(0x770777));
        let blue = PixelFormat::Argb8.resolve1(ColorId::from_hex(0x004dff));
        let black = PixelFormat::Argb8.resolve1(ColorId::BLACK);

        // first echo sits 55 rows above the foreground
        assert_eq!(at(&buf, 36, 4), black);
        assert_eq!(at(&buf, 36, 5), purple);
        assert_eq!(at(&buf, 36, 12), purple);
        assert_eq!(at(&buf, 36, 13), blue);
        // nothing is drawn to the side of the vertical trail
        assert_eq!(at(&buf, 20, 30), black);
    }

    #[test]
    fn test_monochrome_surface_is_untouched() {
        let mut engine = Engine::with_glyphs(PixelFormat::Mono8, Theme::classic()).unwrap();
        let mut buf = vec![0u8; DISPLAY_WIDTH * DISPLAY_HEIGHT];
        let mut surface =
            Surface::new(&mut buf, DISPLAY_WIDTH, DISPLAY_HEIGHT, PixelFormat::Mono8).unwrap();
        engine.render_frame(&mut surface, 10, 10, 10).unwrap();
        assert!(buf.iter().all(|&p| p == 0));
        assert_eq!(engine.time().hour, 10);
    }

    #[test]
    fn test_composer_opens_clip_to_header_band() {
        let mut engine = Engine::with_glyphs(PixelFormat::Argb8, Theme::classic()).unwrap();
        assert_eq!(engine.clip().y_lo, HEADER_BAND);
        render(&mut engine, 3, 0, 0);
        assert_eq!(engine.clip().y_lo, 0);
        // The bottom row stays drawable
        let clip = engine.clip().clamped_to(DISPLAY_WIDTH, DISPLAY_HEIGHT);
        assert_eq!(clip.y_hi, DISPLAY_HEIGHT as i32);
        assert!(clip.contains(0, DISPLAY_HEIGHT as i32 - 1));
    }

    #[test]
    fn test_out_of_range_theme_is_refused() {
        let theme = Theme { band_shift: 32, ..Theme::classic() };
        assert_eq!(Engine::new(PixelFormat::Argb8, theme).err(), Some(RasterError::InvalidTheme));
        let theme = Theme { trail_radius: 0x10000, ..Theme::classic() };
        assert_eq!(Engine::new(PixelFormat::Argb8, theme).err(), Some(RasterError::InvalidTheme));
    }

    #[test]
    fn test_largest_trail_radius_renders() {
        let theme = Theme { trail_radius: crate::ui::theme::MAX_TRAIL_RADIUS, ..Theme::classic() };
        let mut engine = Engine::with_glyphs(PixelFormat::Argb8, theme).unwrap();
        for minute in [0, 7, 15, 38, 59] {
            render(&mut engine, 3, minute, 0);
        }
        assert_eq!(trail_direction(15, theme.trail_radius), (Fx12_4::from_raw(16), Fx12_4::ZERO));
    }

    #[test]
    fn test_release_glyphs() {
        let mut engine = Engine::with_glyphs(PixelFormat::Argb8, Theme::classic()).unwrap();
        assert!(engine.glyphs_loaded());
        engine.release_glyphs();
        assert!(!engine.glyphs_loaded());
    }
}

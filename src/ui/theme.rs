use crate::error::{RasterError, RasterResult};
use crate::fixed::{Fx12_4, Scale4_4};
use crate::framebuffer::ColorId;
use crate::trig::TRIG_MAX_RATIO;

/// Most echoes a theme may ask for
pub const MAX_ECHOES: i32 = 1024;
/// Largest radius whose product with a trig ratio fits in `i32`
pub const MAX_TRAIL_RADIUS: i32 = i32::MAX / TRIG_MAX_RATIO;

/// Trail colors of the stock face, one band per eight echoes
pub const CLASSIC_BANDS: [ColorId; 7] = [
    ColorId::from_hex(0x770777), // Purple
    ColorId::from_hex(0x004dff), // Blue
    ColorId::from_hex(0x00ff00), // Green
    ColorId::from_hex(0xffff00), // Yellow
    ColorId::from_hex(0xff8000), // Orange
    ColorId::from_hex(0xff0000), // Red
    ColorId::from_hex(0x000000), // Black
];

const EMBER_BANDS: [ColorId; 4] = [
    ColorId::from_hex(0x550000),
    ColorId::from_hex(0xaa0000),
    ColorId::from_hex(0xff5500),
    ColorId::from_hex(0xffaa00),
];

/// Watchface look and timing
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Echo copies drawn along the trail
    pub echo_count: i32,
    /// `step >> band_shift` picks the band color
    pub band_shift: u32,
    pub bands: &'static [ColorId],
    /// Color of the crisp foreground digits
    pub highlight: ColorId,
    /// Cleared before each frame when set
    pub background: Option<ColorId>,
    pub digit_scale_x: Scale4_4,
    pub digit_scale_y: Scale4_4,
    /// Offset from a trail point to the first digit's corner
    pub pair_offset_x: Fx12_4,
    pub pair_offset_y: Fx12_4,
    /// Step from one digit of the pair to the next
    pub digit_advance: Fx12_4,
    /// Whole-pixel horizontal nudge applied to every digit
    pub digit_nudge_x: i32,
    /// Rows at the top the composer keeps out of its clip region
    pub header_band: i32,
    /// Length of the raw direction vector before normalization
    pub trail_radius: i32,
    pub redraw_interval_ms: u32,
}

impl Theme {
    /// The stock rainbow trail
    pub fn classic() -> Self {
        let gap = Fx12_4::from_raw(2 << 6);
        let digit_span = Fx12_4::from_raw(6 << 6);
        Self {
            echo_count: 56,
            band_shift: 3,
            bands: &CLASSIC_BANDS,
            highlight: ColorId::WHITE,
            background: Some(ColorId::BLACK),
            digit_scale_x: Scale4_4::times(6),
            digit_scale_y: Scale4_4::times(8),
            pair_offset_x: -(digit_span + gap),
            pair_offset_y: -Fx12_4::from_raw(3 << 7),
            digit_advance: gap.times(2) + digit_span,
            digit_nudge_x: -4,
            header_band: 0,
            trail_radius: 0x1000,
            redraw_interval_ms: 60_000,
        }
    }

    /// A shorter warm trail refreshed every second
    pub fn ember() -> Self {
        Self {
            echo_count: 32,
            bands: &EMBER_BANDS,
            highlight: ColorId::from_hex(0xffffaa),
            redraw_interval_ms: 1_000,
            ..Self::classic()
        }
    }

    /// Band color for trail step `step`; steps past the table use its last entry
    pub fn band(&self, step: i32) -> ColorId {
        let index = (step.max(0) >> self.band_shift) as usize;
        self.bands[index.min(self.bands.len() - 1)]
    }

    pub fn validate(&self) -> RasterResult<()> {
        if self.bands.is_empty() {
            return Err(RasterError::EmptyPalette);
        }
        if self.digit_scale_x.is_zero() || self.digit_scale_y.is_zero() {
            return Err(RasterError::InvalidScale);
        }
        if self.band_shift >= i32::BITS
            || !(0..=MAX_ECHOES).contains(&self.echo_count)
            || !(-MAX_TRAIL_RADIUS..=MAX_TRAIL_RADIUS).contains(&self.trail_radius)
        {
            return Err(RasterError::InvalidTheme);
        }
        Ok(())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_layout_constants() {
        let t = Theme::classic();
        assert_eq!(t.pair_offset_x.raw(), -512);
        assert_eq!(t.pair_offset_y.raw(), -384);
        assert_eq!(t.digit_advance.raw(), 640);
        assert_eq!(t.digit_scale_x.raw(), 96);
        assert_eq!(t.digit_scale_y.raw(), 128);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_band_groups_of_eight() {
        let t = Theme::classic();
        assert_eq!(t.band(0), CLASSIC_BANDS[0]);
        assert_eq!(t.band(7), CLASSIC_BANDS[0]);
        assert_eq!(t.band(8), CLASSIC_BANDS[1]);
        assert_eq!(t.band(55), CLASSIC_BANDS[6]);
        assert_eq!(t.band(500), CLASSIC_BANDS[6]);
    }

    #[test]
    fn test_validation() {
        let t = Theme { bands: &[], ..Theme::classic() };
        assert_eq!(t.validate(), Err(RasterError::EmptyPalette));
        let t = Theme { digit_scale_y: Scale4_4::from_raw(0), ..Theme::classic() };
        assert_eq!(t.validate(), Err(RasterError::InvalidScale));
        assert!(Theme::ember().validate().is_ok());
    }

    #[test]
    fn test_trail_settings_out_of_range() {
        for t in [
            Theme { band_shift: 32, ..Theme::classic() },
            Theme { trail_radius: 0x10000, ..Theme::classic() },
            Theme { trail_radius: -(MAX_TRAIL_RADIUS + 1), ..Theme::classic() },
            Theme { echo_count: -1, ..Theme::classic() },
            Theme { echo_count: MAX_ECHOES + 1, ..Theme::classic() },
        ] {
            assert_eq!(t.validate(), Err(RasterError::InvalidTheme));
        }
        let edge = Theme { band_shift: 31, trail_radius: MAX_TRAIL_RADIUS, ..Theme::classic() };
        assert!(edge.validate().is_ok());
        assert_eq!(edge.band(i32::MAX), CLASSIC_BANDS[0]);
    }
}

//! # Fixed-Point Types
//!
//! The engine never touches floats on the drawing path. Three encodings are
//! used and each gets its own type so the shift amounts live in one place:
//!
//! | Type        | Layout | One unit | Used for                          |
//! |-------------|--------|----------|-----------------------------------|
//! | [`Fx8_8`]   | 8.8    | 256      | bitmap cell pitch, size, anchor   |
//! | [`Scale4_4`]| 4.4    | 16       | blit scale factors                |
//! | [`Fx12_4`]  | 12.4   | 16       | trail positions in the composer   |
//!
//! The blitter's source cursors carry [`SAMPLE_FRAC_BITS`] fractional bits.

use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Fractional bits of the blitter's source sampling cursors
pub const SAMPLE_FRAC_BITS: u32 = 11;

/// 1.0 expressed with [`SAMPLE_FRAC_BITS`] fractional bits, shifted once more
/// so dividing by a 4.4 scale lands back on 11 fractional bits.
const SAMPLE_RECIPROCAL_NUMERATOR: u32 = 0x8000;

// =============================================================================
// 8.8
// =============================================================================

/// Signed 8.8 fixed point (value = raw / 256)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Fx8_8(i32);

impl Fx8_8 {
    pub const FRAC_BITS: u32 = 8;
    pub const ONE: Fx8_8 = Fx8_8(1 << 8);
    pub const ZERO: Fx8_8 = Fx8_8(0);

    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn from_int(value: i32) -> Self {
        Self(value << Self::FRAC_BITS)
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Whole part, rounding toward negative infinity
    #[inline]
    pub const fn to_int(self) -> i32 {
        self.0 >> Self::FRAC_BITS
    }

    #[inline]
    pub const fn half(self) -> Self {
        Self(self.0 >> 1)
    }

    /// Multiply by a plain integer count (e.g. pixels * pitch), saturating
    #[inline]
    pub const fn times(self, count: i32) -> Self {
        Self(self.0.saturating_mul(count))
    }
}

// Bitmap geometry comes from callers; saturate so far-off cells just clip away

impl Add for Fx8_8 {
    type Output = Fx8_8;
    fn add(self, rhs: Fx8_8) -> Fx8_8 {
        Fx8_8(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Fx8_8 {
    type Output = Fx8_8;
    fn sub(self, rhs: Fx8_8) -> Fx8_8 {
        Fx8_8(self.0.saturating_sub(rhs.0))
    }
}

impl AddAssign for Fx8_8 {
    fn add_assign(&mut self, rhs: Fx8_8) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

// =============================================================================
// 4.4
// =============================================================================

/// Unsigned 4.4 scale factor; `16` is 1.0x
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Scale4_4(u16);

impl Scale4_4 {
    pub const FRAC_BITS: u32 = 4;
    pub const ONE: Scale4_4 = Scale4_4(16);

    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Integer magnification, `times(6)` is 6.0x
    #[inline]
    pub const fn times(factor: u16) -> Self {
        Self(factor << Self::FRAC_BITS)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Destination length of `len` source pixels at this scale
    #[inline]
    pub const fn apply(self, len: usize) -> i32 {
        ((len as u32 * self.0 as u32) >> Self::FRAC_BITS) as i32
    }

    /// Source advance per destination pixel with [`SAMPLE_FRAC_BITS`]
    /// fractional bits. Caller guarantees a nonzero scale.
    #[inline]
    pub const fn reciprocal(self) -> u32 {
        SAMPLE_RECIPROCAL_NUMERATOR / self.0 as u32
    }
}

// =============================================================================
// 12.4
// =============================================================================

/// Signed 12.4 fixed point (value = raw / 16)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Fx12_4(i32);

impl Fx12_4 {
    pub const FRAC_BITS: u32 = 4;
    pub const ONE: Fx12_4 = Fx12_4(16);
    pub const ZERO: Fx12_4 = Fx12_4(0);

    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn from_int(value: i32) -> Self {
        Self(value << Self::FRAC_BITS)
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn to_int(self) -> i32 {
        self.0 >> Self::FRAC_BITS
    }

    #[inline]
    pub const fn times(self, count: i32) -> Self {
        Self(self.0 * count)
    }
}

impl Add for Fx12_4 {
    type Output = Fx12_4;
    fn add(self, rhs: Fx12_4) -> Fx12_4 {
        Fx12_4(self.0 + rhs.0)
    }
}

impl Sub for Fx12_4 {
    type Output = Fx12_4;
    fn sub(self, rhs: Fx12_4) -> Fx12_4 {
        Fx12_4(self.0 - rhs.0)
    }
}

impl AddAssign for Fx12_4 {
    fn add_assign(&mut self, rhs: Fx12_4) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Fx12_4 {
    fn sub_assign(&mut self, rhs: Fx12_4) {
        self.0 -= rhs.0;
    }
}

impl Neg for Fx12_4 {
    type Output = Fx12_4;
    fn neg(self) -> Fx12_4 {
        Fx12_4(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fx8_8_whole_part_floors() {
        assert_eq!(Fx8_8::from_int(3).to_int(), 3);
        assert_eq!(Fx8_8::from_raw(0x180).to_int(), 1);
        assert_eq!(Fx8_8::from_raw(-1).to_int(), -1);
    }

    #[test]
    fn test_fx8_8_saturates() {
        let far = Fx8_8::from_raw(i32::MAX / 2);
        assert_eq!(far.times(8).raw(), i32::MAX);
        assert_eq!((far + far + far).raw(), i32::MAX);
        assert_eq!((Fx8_8::from_raw(i32::MIN) - Fx8_8::ONE).raw(), i32::MIN);
    }

    #[test]
    fn test_scale_identity_reciprocal_is_one_sample() {
        assert_eq!(Scale4_4::ONE.reciprocal(), 1 << SAMPLE_FRAC_BITS);
        assert_eq!(Scale4_4::ONE.apply(8), 8);
    }

    #[test]
    fn test_scale_magnifies() {
        let six = Scale4_4::times(6);
        assert_eq!(six.raw(), 96);
        assert_eq!(six.apply(8), 48);
        assert_eq!(Scale4_4::from_raw(8).apply(6), 3);
    }

    #[test]
    fn test_fx12_4_arithmetic() {
        let a = Fx12_4::from_int(72);
        let b = Fx12_4::ONE.times(-56);
        assert_eq!((a - b).to_int(), 128);
        assert_eq!((-Fx12_4::ONE).raw(), -16);
    }
}

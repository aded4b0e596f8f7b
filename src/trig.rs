//! Integer trig lookup in watch units: a full turn is [`TRIG_MAX_ANGLE`] and
//! results are scaled by [`TRIG_MAX_RATIO`].

pub const TRIG_MAX_ANGLE: i32 = 0x10000;
pub const TRIG_MAX_RATIO: i32 = 0xFFFF;

fn radians(angle: i32) -> f64 {
    (angle.rem_euclid(TRIG_MAX_ANGLE) as f64) * (2.0 * core::f64::consts::PI) / TRIG_MAX_ANGLE as f64
}

pub fn sin_lookup(angle: i32) -> i32 {
    libm::round(libm::sin(radians(angle)) * TRIG_MAX_RATIO as f64) as i32
}

pub fn cos_lookup(angle: i32) -> i32 {
    libm::round(libm::cos(radians(angle)) * TRIG_MAX_RATIO as f64) as i32
}

//! # Watchface Module
//!
//! The scene built on top of the raster primitives.
//!
//! ## Modules
//!
//! - `theme`: Look and timing presets (classic rainbow trail, ember)
//! - `clock`: Cached time fields and hour/minute edge detection
//! - `face`: The frame composer and the [`Engine`] context that owns the
//!   clip region, time state and digit sprites
//!
//! ## Example
//!
//! ```ignore
//! use trail_raster::ui::{Engine, Theme};
//!
//! let mut engine = Engine::with_glyphs(PixelFormat::Argb8, Theme::classic())?;
//! engine.render_frame(&mut surface, 3, 0, 0)?;
//! ```

pub mod clock;
pub mod face;
pub mod theme;

pub use clock::{ClockEdges, TimeState};
pub use face::{trail_direction, Engine};
pub use theme::Theme;

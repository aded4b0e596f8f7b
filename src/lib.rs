//! # trail-raster
//!
//! A small software raster engine for a 144x168 watchface. It writes pixels
//! straight into the display's byte buffer and composes a time-driven scene:
//! the hour, echoed along a trail that sweeps with the minute hand.
//!
//! ## Layers
//!
//! ```text
//!   host        DisplayHost / TimeSource / Watchface, global engine slot
//!   ui          Engine (frame composer), Theme, TimeState
//!   glyphs      packed numerals -> digit sprites
//!   sprite      Sprite, bitmap decoder, ASCII-art definitions
//!   blit        Surface::blit + ClipRegion   (framebuffer_ext)
//!   framebuffer Surface box fills, ColorId -> pixel resolution
//!   fixed/trig  8.8, 4.4, 12.4 fixed point; integer trig lookup
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod error;
pub mod fixed;
pub mod framebuffer;
pub mod framebuffer_ext;
pub mod glyphs;
pub mod host;
pub mod sprite;
pub mod trig;
pub mod ui;

pub use error::{RasterError, RasterResult};
pub use fixed::{Fx12_4, Fx8_8, Scale4_4};
pub use framebuffer::{ChunkWidth, ColorId, FillPattern, PixelFormat, Surface};
pub use framebuffer_ext::ClipRegion;
pub use glyphs::GlyphTable;
pub use host::{init_glyphs, release_glyphs, render_frame, DisplayHost, TimeSource, Watchface};
pub use sprite::{Sprite, SpriteDefinition};
pub use ui::{Engine, Theme};

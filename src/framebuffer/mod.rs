//! # Framebuffer Graphics Module
//!
//! Direct access to the watch's output buffer.
//!
//! ## Modules
//!
//! - `framebuffer`: [`Surface`] with raw, checked and clipped box fills
//! - `color`: [`ColorId`] and per-format color resolution
//!
//! ## Pixel Layout
//!
//! One byte addresses one pixel. Box fills may store 1, 2 or 4 bytes at a
//! time; wider stores write the same resolved byte into every lane, so they
//! are only a faster way to lay down a solid run of pixels.
//!
//! Sprite blitting lives in `framebuffer_ext`, next to the clip region it
//! honours.

pub mod color;
pub mod framebuffer;

pub use color::{ColorId, PixelFormat};
pub use framebuffer::{ChunkWidth, FillPattern, Surface, DISPLAY_HEIGHT, DISPLAY_WIDTH};

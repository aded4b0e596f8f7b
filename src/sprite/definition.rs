//! ASCII-art sprite definitions
//!
//! Authoring-time only: a grid of characters plus a symbol table that maps
//! each character to a palette slot. Rasterized once into a [`Sprite`].

use crate::error::{RasterError, RasterResult};
use crate::framebuffer::{ColorId, PixelFormat};
use crate::sprite::Sprite;

/// Rows a definition may hold
pub const MAX_DEFINITION_ROWS: usize = 64;
/// Symbol table and palette size
pub const DEFINITION_SLOTS: usize = 16;

#[derive(Debug, Clone, Copy)]
pub struct SpriteDefinition<'a> {
    /// One string per row; bytes past the end of a short row use slot 0
    pub rows: &'a [&'a str],
    /// Up to 16 symbols; position `i` maps to `palette[i]`
    pub symbols: &'a [u8],
    pub palette: [ColorId; DEFINITION_SLOTS],
    pub width: usize,
    pub height: usize,
}

impl SpriteDefinition<'_> {
    /// Palette slot for `ch`; first match wins, unmapped symbols use slot 0
    pub fn slot_of(&self, ch: u8) -> usize {
        self.symbols
            .iter()
            .take(DEFINITION_SLOTS)
            .position(|&s| s == ch)
            .unwrap_or(0)
    }
}

impl Sprite {
    /// Rasterize `def` with every color resolved for `format`
    pub fn from_definition(def: &SpriteDefinition<'_>, format: PixelFormat) -> RasterResult<Sprite> {
        if def.height > MAX_DEFINITION_ROWS {
            return Err(RasterError::DefinitionTooTall);
        }

        let resolved = def.palette.map(|c| format.resolve1(c));
        let mut sprite = Sprite::blank(def.width, def.height);
        let width = def.width;
        let raster = sprite.pixels_mut();

        for (i, dest) in raster.chunks_exact_mut(width.max(1)).enumerate().take(def.height) {
            let row = def.rows.get(i).map(|r| r.as_bytes()).unwrap_or(&[]);
            for (j, px) in dest.iter_mut().enumerate() {
                let ch = row.get(j).copied().unwrap_or(0);
                *px = resolved[def.slot_of(ch)];
            }
        }

        Ok(sprite)
    }
}

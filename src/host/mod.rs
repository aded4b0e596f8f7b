//! # Host Glue
//!
//! The raster engine does not own a window, a timer or a clock. This module
//! describes what it needs from the watch shell and wires one periodic tick
//! together:
//!
//! 1. [`TimeSource`] supplies the wall-clock reading
//! 2. [`DisplayHost`] lends the frame buffer for the duration of a closure
//! 3. [`Watchface::tick`] renders one frame between acquire and release
//!
//! Hosts that prefer free functions can install a single engine in the
//! process-wide slot with [`init_glyphs`] and drive it with [`render_frame`].

use crate::error::{RasterError, RasterResult};
use crate::framebuffer::{PixelFormat, Surface};
use crate::ui::{Engine, Theme};
use spin::Mutex;

pub mod display;

pub use display::BufferDisplay;

// =============================================================================
// COLLABORATORS
// =============================================================================

/// One wall-clock reading (hour 0-23, minute 0-59, second 0-60)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallClock {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl WallClock {
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self { hour, minute, second }
    }
}

pub trait TimeSource {
    fn now(&self) -> WallClock;
}

impl<F> TimeSource for F
where
    F: Fn() -> WallClock,
{
    fn now(&self) -> WallClock {
        self()
    }
}

/// A clock that reports whatever it was last set to
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedClock {
    time: WallClock,
}

impl FixedClock {
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            time: WallClock::new(hour, minute, second),
        }
    }

    pub fn set(&mut self, time: WallClock) {
        self.time = time;
    }
}

impl TimeSource for FixedClock {
    fn now(&self) -> WallClock {
        self.time
    }
}

/// Owner of the output buffer.
///
/// `with_frame` acquires the buffer, hands it to `draw` as a [`Surface`]
/// and releases it afterwards, whatever `draw` returns.
pub trait DisplayHost {
    fn format(&self) -> PixelFormat;

    fn with_frame(
        &mut self,
        draw: &mut dyn FnMut(&mut Surface<'_>) -> RasterResult<()>,
    ) -> RasterResult<()>;
}

// =============================================================================
// WATCHFACE
// =============================================================================

/// Engine plus the clock that drives it
pub struct Watchface<C: TimeSource> {
    engine: Engine,
    clock: C,
}

impl<C: TimeSource> Watchface<C> {
    /// Build the digit sprites in the host's pixel format and get ready for
    /// the first tick
    pub fn new<H: DisplayHost>(host: &H, theme: Theme, clock: C) -> RasterResult<Self> {
        let engine = Engine::with_glyphs(host.format(), theme)?;
        log::debug!(
            "watchface ready, redraw every {} ms",
            theme.redraw_interval_ms
        );
        Ok(Self { engine, clock })
    }

    /// Render one frame into the host's buffer
    pub fn tick<H: DisplayHost>(&mut self, host: &mut H) -> RasterResult<()> {
        let now = self.clock.now();
        let engine = &mut self.engine;
        host.with_frame(&mut |surface: &mut Surface<'_>| {
            engine.render_frame(surface, now.hour, now.minute, now.second)
        })
    }

    /// Period the host timer should use between ticks
    pub fn redraw_interval_ms(&self) -> u32 {
        self.engine.theme().redraw_interval_ms
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Tear down, freeing the digit sprites
    pub fn release(mut self) -> C {
        self.engine.release_glyphs();
        self.clock
    }
}

// =============================================================================
// GLOBAL ENGINE SLOT
// =============================================================================

static ENGINE: Mutex<Option<Engine>> = Mutex::new(None);

/// Install a classic-theme engine and build its digit sprites
pub fn init_glyphs(format: PixelFormat) -> RasterResult<()> {
    init_glyphs_with(format, Theme::classic())
}

pub fn init_glyphs_with(format: PixelFormat, theme: Theme) -> RasterResult<()> {
    let engine = Engine::with_glyphs(format, theme)?;
    *ENGINE.lock() = Some(engine);
    Ok(())
}

/// Free the digit sprites and uninstall the engine
pub fn release_glyphs() {
    if let Some(mut engine) = ENGINE.lock().take() {
        engine.release_glyphs();
    }
}

/// Render one frame with the installed engine
pub fn render_frame(surface: &mut Surface<'_>, hour: u8, minute: u8, second: u8) -> RasterResult<()> {
    let mut guard = ENGINE.lock();
    let engine = guard.as_mut().ok_or(RasterError::NotInitialized)?;
    engine.render_frame(surface, hour, minute, second)
}

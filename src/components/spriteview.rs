//! Sprite view: playback controller for one sprite-sheet animation.
//!
//! A [`SpriteView`] owns everything needed to animate a single sheet:
//!
//! - the grid and playback configuration, plus the derived cell size,
//! - a [`FrameSequencer`] tracking the cell being drawn,
//! - an [`AnimationClock`] deciding when to tick,
//! - a [`Notifier`] queueing lifecycle events for the host.
//!
//! # State machine
//!
//! ```text
//!            start()              pause()
//!  Stopped ───────────▶ Running ───────────▶ Paused
//!     ▲                  │  ▲                  │
//!     │      stop()      │  └──── start() ─────┘
//!     └──────────────────┘
//! ```
//!
//! Every call is valid from every state. Misconfiguration (no sheet, a frame
//! rate too high to schedule) turns [`SpriteView::start`] into a no-op
//! instead of an error, so a view can be configured piece by piece.
//!
//! # Threading
//!
//! The clock may tick on another thread, but it only *signals*. Ticks are
//! applied by [`SpriteView::pump_clock`], which the host calls from the same
//! context that renders the view, so the sequencer has one writer and one
//! reader on one thread.
//!
//! # Related
//!
//! - [`crate::systems::render::render_frame`] – draws the current cell
//! - [`crate::systems::spriteview`] – ECS systems driving views

use std::time::Duration;

use bevy_ecs::prelude::Component;
use log::{debug, info, warn};

use crate::components::grid::{GridConfig, PixelRect, cell_size};
use crate::components::playback::{PlaybackConfig, PlaybackState};
use crate::components::sequencer::FrameSequencer;
use crate::components::spritesheet::SpriteSheet;
use crate::events::spriteview::{Notifier, SpriteViewEvent, StateChangeListener};
use crate::resources::clock::{AnimationClock, ThreadedClock};

#[derive(Component)]
pub struct SpriteView {
    sheet: Option<SpriteSheet>,
    grid: GridConfig,
    playback: PlaybackConfig,
    sequencer: FrameSequencer,
    cell_width: f64,
    cell_height: f64,
    state: PlaybackState,
    clock: Box<dyn AnimationClock>,
    notifier: Notifier,
    redraw_requested: bool,
    last_blit: Option<PixelRect>,
}

impl Default for SpriteView {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteView {
    /// An empty, stopped view with default configuration and a
    /// [`ThreadedClock`].
    pub fn new() -> Self {
        let grid = GridConfig::default();
        let playback = PlaybackConfig::default();
        Self {
            sheet: None,
            grid,
            playback,
            sequencer: FrameSequencer::new(
                &grid,
                playback.last_frame_for(&grid),
                playback.fixed_row(),
                playback.render_row(),
            ),
            cell_width: 0.0,
            cell_height: 0.0,
            state: PlaybackState::Stopped,
            clock: Box::new(ThreadedClock::new()),
            notifier: Notifier::default(),
            redraw_requested: true,
            last_blit: None,
        }
    }

    /// A configured view. Starts right away when `playback` asks for
    /// auto-play and the configuration is playable.
    pub fn from_config(
        sheet: Option<SpriteSheet>,
        grid: GridConfig,
        playback: PlaybackConfig,
    ) -> Self {
        Self::new().configured(sheet, grid, playback)
    }

    /// Builder form of [`SpriteView::from_config`], for use after
    /// [`SpriteView::with_clock`] and [`SpriteView::with_listener`].
    pub fn configured(
        mut self,
        sheet: Option<SpriteSheet>,
        grid: GridConfig,
        playback: PlaybackConfig,
    ) -> Self {
        self.sheet = sheet;
        self.sequencer = FrameSequencer::new(
            &grid,
            playback.last_frame_for(&grid),
            playback.fixed_row(),
            playback.render_row(),
        );
        self.reconfigure(grid, playback);
        if self.playback.auto_play() {
            self.start();
        }
        self
    }

    /// Replace the clock. A running view keeps running on the new clock.
    pub fn with_clock(mut self, clock: impl AnimationClock + 'static) -> Self {
        self.clock.cancel();
        self.clock = Box::new(clock);
        if self.is_running() {
            self.clock
                .schedule(Duration::from_millis(self.playback.period_millis()));
        }
        self
    }

    pub fn with_listener(mut self, listener: impl StateChangeListener + 'static) -> Self {
        self.set_listener(Some(Box::new(listener)));
        self
    }

    pub fn set_listener(&mut self, listener: Option<Box<dyn StateChangeListener>>) {
        self.notifier.set_listener(listener);
    }

    // ---------------------------------------------------------------------
    // Configuration
    // ---------------------------------------------------------------------

    /// Apply a new grid and playback configuration in one step.
    ///
    /// Cell size, `last_frame` and the sequencer bounds are all recomputed
    /// together, so no reader ever sees a half-updated view. Playback state
    /// is untouched; a new frame rate is picked up by the next
    /// [`SpriteView::start`]. The initial row is only applied while the
    /// view sits stopped at its first frame.
    pub fn reconfigure(&mut self, grid: GridConfig, playback: PlaybackConfig) {
        self.grid = grid;
        self.playback = playback;
        self.sequencer.configure(
            &grid,
            playback.last_frame_for(&grid),
            playback.fixed_row(),
        );
        if self.state == PlaybackState::Stopped && self.sequencer.current_frame() == 0 {
            self.sequencer.set_render_row(playback.render_row());
        }
        self.recompute_geometry();
        self.request_redraw();
        debug!(
            "[sprite] reconfigured {}x{} grid, fps={}, last_frame={}, fixed_row={}",
            grid.columns(),
            grid.rows(),
            playback.fps(),
            self.sequencer.last_frame(),
            playback.fixed_row()
        );
    }

    pub fn set_image(&mut self, sheet: Option<SpriteSheet>) {
        self.sheet = sheet;
        self.recompute_geometry();
        self.request_redraw();
    }

    /// Change the column count. `last_frame` follows the new cell count.
    pub fn set_columns(&mut self, columns: i32) {
        let grid = self.grid.with_columns(columns);
        self.reconfigure(grid, self.playback.with_default_last_frame());
    }

    /// Change the row count. `last_frame` follows the new cell count.
    pub fn set_rows(&mut self, rows: i32) {
        let grid = self.grid.with_rows(rows);
        self.reconfigure(grid, self.playback.with_default_last_frame());
    }

    pub fn set_fps(&mut self, fps: i32) {
        self.reconfigure(self.grid, self.playback.with_fps(fps));
    }

    pub fn set_last_frame(&mut self, last_frame: i32) {
        self.reconfigure(self.grid, self.playback.with_last_frame(last_frame));
    }

    pub fn set_fixed_row(&mut self, fixed_row: bool) {
        self.reconfigure(self.grid, self.playback.with_fixed_row(fixed_row));
    }

    pub fn set_auto_play(&mut self, auto_play: bool) {
        self.playback = self.playback.with_auto_play(auto_play);
    }

    /// Move the drawn row directly, whatever the playback state.
    pub fn set_render_row(&mut self, render_row: i32) {
        self.playback = self.playback.with_render_row(render_row);
        self.sequencer.set_render_row(self.playback.render_row());
        self.request_redraw();
    }

    fn recompute_geometry(&mut self) {
        let (w, h) = cell_size(self.sheet.as_ref(), &self.grid);
        self.cell_width = w;
        self.cell_height = h;
    }

    // ---------------------------------------------------------------------
    // Commands
    // ---------------------------------------------------------------------

    /// Start playing from the first frame.
    ///
    /// Does nothing without a sheet or when the frame rate is too high for a
    /// whole-millisecond period. A running view is stopped first, so only
    /// one clock ever ticks.
    pub fn start(&mut self) {
        let Some(sheet) = self.sheet.as_ref() else {
            debug!("[sprite] start ignored: no sprite sheet");
            return;
        };
        let tex_key = sheet.tex_key.clone();
        let period = self.playback.period_millis();
        if period == 0 {
            debug!(
                "[sprite] start ignored: fps={} is too high to schedule",
                self.playback.fps()
            );
            return;
        }

        self.stop();
        self.recompute_geometry();
        self.clock.schedule(Duration::from_millis(period));
        if !self.clock.is_scheduled() {
            warn!("[sprite] start failed: clock could not be scheduled");
            return;
        }
        self.state = PlaybackState::Running;
        self.notifier.post(SpriteViewEvent::Started);
        info!(
            "[sprite] started key='{}' grid={}x{} fps={}",
            tex_key,
            self.grid.columns(),
            self.grid.rows(),
            self.playback.fps()
        );
    }

    /// Halt the clock and keep the current frame on screen.
    pub fn pause(&mut self) {
        self.clock.cancel();
        self.state = PlaybackState::Paused;
    }

    /// Halt the clock and return to the first frame.
    ///
    /// `Stopped` is only announced when the view had advanced at least one
    /// frame; stopping an idle view is silent.
    pub fn stop(&mut self) {
        let had_frames = self.sequencer.current_frame() > 0;
        self.clock.cancel();
        if had_frames {
            self.notifier.post(SpriteViewEvent::Stopped);
            info!("[sprite] stopped");
        }
        self.sequencer.reset();
        self.request_redraw();
        self.state = PlaybackState::Stopped;
    }

    /// Return to the first frame without touching playback state.
    pub fn reset_frames(&mut self) {
        self.sequencer.reset();
        self.request_redraw();
    }

    /// Clock callback: advance one frame and ask for a redraw.
    ///
    /// Returns `false` (and does nothing) unless the view is running, so a
    /// tick that raced a pause is harmless.
    pub fn tick(&mut self) -> bool {
        if self.state != PlaybackState::Running {
            return false;
        }
        self.sequencer.advance();
        self.request_redraw();
        true
    }

    /// Apply every tick the clock has due. Returns the number applied.
    pub fn pump_clock(&mut self, delta: Duration) -> u32 {
        let due = self.clock.poll(delta);
        let mut applied = 0;
        for _ in 0..due {
            if self.tick() {
                applied += 1;
            }
        }
        applied
    }

    /// Deliver queued events to the listener, oldest first.
    ///
    /// Returns the delivered events so hosts can forward them elsewhere.
    /// Events are drained even when no listener is registered.
    pub fn dispatch_notifications(&mut self) -> Vec<SpriteViewEvent> {
        let pending = self.notifier.take_pending();
        if pending.is_empty() {
            return Vec::new();
        }
        if let Some(mut listener) = self.notifier.take_listener() {
            for event in pending.iter() {
                event.deliver(listener.as_mut(), self);
            }
            self.notifier.set_listener(Some(listener));
        }
        pending.into()
    }

    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PlaybackState::Running
    }

    pub fn current_frame(&self) -> u32 {
        self.sequencer.current_frame()
    }

    pub fn render_row(&self) -> u32 {
        self.sequencer.render_row()
    }

    pub fn render_column(&self) -> u32 {
        self.sequencer.render_column()
    }

    /// Width of one cell in sheet pixels.
    pub fn sprite_width(&self) -> f64 {
        self.cell_width
    }

    /// Height of one cell in sheet pixels.
    pub fn sprite_height(&self) -> f64 {
        self.cell_height
    }

    pub fn columns(&self) -> u32 {
        self.grid.columns()
    }

    pub fn rows(&self) -> u32 {
        self.grid.rows()
    }

    pub fn fps(&self) -> u32 {
        self.playback.fps()
    }

    pub fn last_frame(&self) -> u32 {
        self.sequencer.last_frame()
    }

    pub fn period_millis(&self) -> u64 {
        self.playback.period_millis()
    }

    pub fn grid(&self) -> GridConfig {
        self.grid
    }

    pub fn playback(&self) -> PlaybackConfig {
        self.playback
    }

    pub fn sheet(&self) -> Option<&SpriteSheet> {
        self.sheet.as_ref()
    }

    pub fn redraw_requested(&self) -> bool {
        self.redraw_requested
    }

    pub fn pending_events(&self) -> Vec<SpriteViewEvent> {
        self.notifier.pending().copied().collect()
    }

    pub fn clock_scheduled(&self) -> bool {
        self.clock.is_scheduled()
    }

    // ---------------------------------------------------------------------
    // Renderer access
    // ---------------------------------------------------------------------

    pub(crate) fn sequencer_mut(&mut self) -> &mut FrameSequencer {
        &mut self.sequencer
    }

    pub(crate) fn notifier_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }

    pub(crate) fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    pub(crate) fn last_blit(&self) -> Option<PixelRect> {
        self.last_blit
    }

    pub(crate) fn set_last_blit(&mut self, src: Option<PixelRect>) {
        self.last_blit = src;
    }
}

impl Drop for SpriteView {
    fn drop(&mut self) {
        self.clock.cancel();
    }
}

impl std::fmt::Debug for SpriteView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpriteView")
            .field("sheet", &self.sheet)
            .field("grid", &self.grid)
            .field("playback", &self.playback)
            .field("sequencer", &self.sequencer)
            .field("state", &self.state)
            .field("notifier", &self.notifier)
            .finish()
    }
}

//! Sprite runner library.
//!
//! Plays a sprite sheet (one image divided into a grid of equal cells) as a
//! frame-by-frame animation on any drawing surface.
//!
//! - [`components`] – the [`SpriteView`](components::spriteview::SpriteView)
//!   playback controller and its configuration
//! - [`events`] – start/stop/frame notifications
//! - [`resources`] – clocks, surfaces, sheet store, configuration
//! - [`systems`] – rendering and the `bevy_ecs` systems driving views
//! - [`error`] – configuration errors
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use spriterunner::components::grid::GridConfig;
//! use spriterunner::components::playback::PlaybackConfig;
//! use spriterunner::components::spritesheet::SpriteSheet;
//! use spriterunner::components::spriteview::SpriteView;
//! use spriterunner::resources::surface::RecordingSurface;
//! use spriterunner::systems::render::render_frame;
//!
//! let mut view = SpriteView::from_config(
//!     Some(SpriteSheet::new("tile", 600, 600)),
//!     GridConfig::new(8, 8),
//!     PlaybackConfig::new(16),
//! );
//! let mut surface = RecordingSurface::new(300, 300);
//! loop {
//!     view.pump_clock(Duration::from_millis(16));
//!     if view.redraw_requested() {
//!         render_frame(&mut view, &mut surface);
//!     }
//!     view.dispatch_notifications();
//!     std::thread::sleep(Duration::from_millis(16));
//! }
//! ```

pub mod components;
pub mod error;
pub mod events;
pub mod resources;
pub mod systems;

//! Sprite view components.
//!
//! Data carried by a sprite view and its parts. A [`spriteview::SpriteView`]
//! is also an ECS component, so hosts built on `bevy_ecs` can spawn views as
//! entities.
//!
//! Submodules overview:
//! - [`grid`] – grid division of a sheet and cell rectangles
//! - [`playback`] – frame rate, wrap point and playback state
//! - [`sequencer`] – frame counter and grid position
//! - [`spritesheet`] – handle to a decoded sheet
//! - [`spriteview`] – the playback controller
//! - [`viewbounds`] – where on the host surface a view is drawn

pub mod grid;
pub mod playback;
pub mod sequencer;
pub mod spritesheet;
pub mod spriteview;
pub mod viewbounds;

//! Systems driving sprite views.
//!
//! Submodules overview
//! - [`clock`] – timer thread body and the per-frame clock pump
//! - [`render`] – draw the active cell of each view
//! - [`spriteconfig`] – push configuration changes into views
//! - [`spriteview`] – deliver notifications as listener calls and ECS messages
//! - [`time`] – update the host frame time

pub mod clock;
pub mod render;
pub mod spriteconfig;
pub mod spriteview;
pub mod time;

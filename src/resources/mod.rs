//! Long-lived host resources.
//!
//! Overview
//! - `clock` – animation clocks (timer thread, frame-delta driven)
//! - `frametime` – host frame delta fed to frame clocks
//! - `raylibsurface` – raylib textures and surface (feature `raylib`)
//! - `sheetstore` – registered sprite sheets keyed by name
//! - `spriteconfig` – INI/JSON sprite view configuration
//! - `surface` – drawing surface trait and in-memory implementations
pub mod clock;
pub mod frametime;
#[cfg(feature = "raylib")]
pub mod raylibsurface;
pub mod sheetstore;
pub mod spriteconfig;
pub mod surface;

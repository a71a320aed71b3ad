//! Event types delivered to sprite view observers.
//!
//! Submodules:
//! - [`spriteview`] – lifecycle/frame events, the listener trait and the ECS message
pub mod spriteview;

//! Engine systems.
//!
//! Submodules overview
//! - [`animation`] – fire animation ticks, dispatch frame events, handle control events
//! - [`sprite`] – apply frame events to sprites
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod sprite;
pub mod time;

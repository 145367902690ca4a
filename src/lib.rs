//! Aberred sprite animation library.
//!
//! This module exposes the animation core, plus the ECS components,
//! resources, systems and events that drive it, for use in integration tests
//! and as a reusable library.

pub mod animation;
pub mod components;
pub mod error;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;

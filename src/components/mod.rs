//! ECS components for entities.
//!
//! Submodules overview:
//! - [`animator`] – per-entity animation scheduler
//! - [`sprite`] – the sprite key currently shown for an entity

pub mod animator;
pub mod sprite;

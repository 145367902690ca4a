//! Event types used by the engine.
//!
//! Submodules:
//! - [`animation`] – play / pause / resume requests for animators
//! - [`framechange`] – notification for every frame an animator shows
pub mod animation;
pub mod framechange;

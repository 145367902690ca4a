//! Animation control events.
//!
//! Requests to start, suspend or continue an entity's animation. They are
//! handled by observers in [`crate::systems::animation`]; requests for
//! entities without a
//! [`SpriteAnimator`](crate::components::animator::SpriteAnimator) or for
//! unknown segment names are logged and dropped.
//!
//! # Example
//!
//! ```ignore
//! world.trigger(PlayAnimationEvent::new(witch, "attack_then_idle"));
//! world.trigger(PauseAnimationEvent { entity: witch });
//! world.trigger(ResumeAnimationEvent { entity: witch });
//! ```

use bevy_ecs::prelude::*;

/// Start `segment` on `entity`, replacing whatever it was playing.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct PlayAnimationEvent {
    pub entity: Entity,
    /// Segment name in the [`SegmentStore`](crate::resources::segmentstore::SegmentStore).
    pub segment: String,
    /// Inter-frame delay; the configured default when `None`.
    pub delay_ms: Option<u64>,
}

impl PlayAnimationEvent {
    pub fn new(entity: Entity, segment: impl Into<String>) -> Self {
        Self {
            entity,
            segment: segment.into(),
            delay_ms: None,
        }
    }

    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseAnimationEvent {
    pub entity: Entity,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResumeAnimationEvent {
    pub entity: Entity,
}

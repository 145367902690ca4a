//! Shared animation clock.
//!
//! One [`TimerQueue`] serves every [`SpriteAnimator`] in the world. Timers are
//! tagged with the owning entity so the
//! [`animation_timers`](crate::systems::animation::animation_timers) system can
//! route each fired handle back to its animator.
//!
//! [`SpriteAnimator`]: crate::components::animator::SpriteAnimator

use bevy_ecs::prelude::*;

use crate::animation::timer::{BoundTimers, TimerQueue};

#[derive(Resource, Debug, Default)]
pub struct AnimationClock {
    pub queue: TimerQueue<Entity>,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timer service for `entity`'s animator.
    pub fn timers_for(&mut self, entity: Entity) -> BoundTimers<'_, Entity> {
        self.queue.bind(entity)
    }

    pub fn now_ms(&self) -> u64 {
        self.queue.now_ms()
    }
}

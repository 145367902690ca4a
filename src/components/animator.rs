//! Sprite animator component.
//!
//! Each animated entity owns one [`SpriteAnimator`], which wraps a
//! [`Scheduler`] over sprite keys. The animator is driven entirely through
//! events and systems:
//!
//! - [`PlayAnimationEvent`](crate::events::animation::PlayAnimationEvent),
//!   [`PauseAnimationEvent`](crate::events::animation::PauseAnimationEvent) and
//!   [`ResumeAnimationEvent`](crate::events::animation::ResumeAnimationEvent)
//!   are handled by observers in [`crate::systems::animation`].
//! - [`animation_timers`](crate::systems::animation::animation_timers) fires
//!   the animator's ticks from the shared
//!   [`AnimationClock`](crate::resources::animationclock::AnimationClock).
//! - Frame changes leave through the
//!   [`FrameBridge`](crate::resources::framebridge::FrameBridge) and are
//!   triggered as [`FrameChangedEvent`](crate::events::framechange::FrameChangedEvent)s.

use bevy_ecs::prelude::Component;

use crate::animation::library::FrameKey;
use crate::animation::scheduler::{BoundaryMode, Scheduler, SchedulerState};

#[derive(Component, Debug, Default)]
pub struct SpriteAnimator {
    pub scheduler: Scheduler<FrameKey>,
}

impl SpriteAnimator {
    pub fn new(boundary: BoundaryMode) -> Self {
        Self {
            scheduler: Scheduler::with_boundary(boundary),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.state() == SchedulerState::Running
    }
}

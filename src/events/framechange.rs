//! Frame change notifications.
//!
//! One [`FrameChangedEvent`] is triggered for every frame an animator puts
//! on screen, in the order the frames were shown.
//!
//! # Related
//!
//! - [`crate::systems::animation::dispatch_frame_changes`] – triggers these events
//! - [`crate::systems::sprite::sprite_frame_observer`] – applies them to
//!   [`Sprite`](crate::components::sprite::Sprite)

use bevy_ecs::prelude::*;

use crate::animation::library::FrameKey;
use crate::animation::scheduler::FrameChange;
use crate::animation::segment::FrameSequence;
use crate::animation::timer::TimerHandle;

#[derive(Event, Debug, Clone, PartialEq)]
pub struct FrameChangedEvent {
    pub entity: Entity,
    pub index: usize,
    /// `frames[index]`.
    pub frame: FrameKey,
    pub frames: FrameSequence<FrameKey>,
    /// Handle of the next tick, if one is scheduled. Opaque; only useful to
    /// cancel that tick on the
    /// [`AnimationClock`](crate::resources::animationclock::AnimationClock).
    pub timer: Option<TimerHandle>,
}

impl FrameChangedEvent {
    pub fn new(entity: Entity, change: FrameChange<FrameKey>) -> Self {
        Self {
            entity,
            index: change.index,
            frame: change.frame().clone(),
            frames: change.frames,
            timer: change.timer,
        }
    }
}

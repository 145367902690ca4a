use bevy_ecs::prelude::Component;

use crate::animation::library::FrameKey;

/// Sprite shown for an entity.
///
/// Updated from [`FrameChangedEvent`](crate::events::framechange::FrameChangedEvent)s
/// by [`sprite_frame_observer`](crate::systems::sprite::sprite_frame_observer).
/// Rendering reads `frame_key` and nothing else.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Sprite {
    pub frame_key: FrameKey,
    pub frame_index: usize,
    /// Mirror horizontally when drawn, e.g. for the character on the right.
    pub flip_h: bool,
}

impl Sprite {
    pub fn new(frame_key: impl Into<FrameKey>) -> Self {
        Self {
            frame_key: frame_key.into(),
            frame_index: 0,
            flip_h: false,
        }
    }

    pub fn flipped(mut self) -> Self {
        self.flip_h = true;
        self
    }
}

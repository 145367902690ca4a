//! Sprite update observer.
//!
//! Stands in for the renderer's side of the frame contract: every
//! [`FrameChangedEvent`] replaces the entity's [`Sprite`] key.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::sprite::Sprite;
use crate::events::framechange::FrameChangedEvent;

pub fn sprite_frame_observer(trigger: On<FrameChangedEvent>, mut sprites: Query<&mut Sprite>) {
    let event = trigger.event();
    if let Ok(mut sprite) = sprites.get_mut(event.entity) {
        debug!("{:?} shows {} ({})", event.entity, event.frame, event.index);
        sprite.frame_key = event.frame.clone();
        sprite.frame_index = event.index;
    }
}

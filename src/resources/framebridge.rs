//! Channel carrying frame notifications out of schedulers.
//!
//! Scheduler listeners run inside systems and observers that already hold
//! the animator borrowed, so they cannot trigger events themselves. Each
//! listener instead owns a [`Sender`] clone and pushes a
//! [`FrameChangedEvent`]; the
//! [`dispatch_frame_changes`](crate::systems::animation::dispatch_frame_changes)
//! system drains the channel in order and triggers the events.

use bevy_ecs::prelude::Resource;
use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::events::framechange::FrameChangedEvent;

#[derive(Resource, Debug, Clone)]
pub struct FrameBridge {
    tx: Sender<FrameChangedEvent>,
    rx: Receiver<FrameChangedEvent>,
}

impl Default for FrameBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBridge {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> Sender<FrameChangedEvent> {
        self.tx.clone()
    }

    /// Take every queued notification, oldest first.
    pub fn drain(&self) -> Vec<FrameChangedEvent> {
        self.rx.try_iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

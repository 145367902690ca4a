//! Animation segment registry.
//!
//! Holds the caller-owned [`SegmentTable`] that animators play from. Systems
//! look segments up by name; the table itself is shared with every running
//! scheduler and never mutated.

use std::sync::Arc;

use bevy_ecs::prelude::Resource;

use crate::animation::library::FrameKey;
use crate::animation::segment::{SegmentId, SegmentTable};

#[derive(Resource, Debug, Clone)]
pub struct SegmentStore {
    table: Arc<SegmentTable<FrameKey>>,
}

impl SegmentStore {
    pub fn new(table: SegmentTable<FrameKey>) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    pub fn table(&self) -> Arc<SegmentTable<FrameKey>> {
        Arc::clone(&self.table)
    }

    pub fn lookup(&self, name: &str) -> Option<SegmentId> {
        self.table.lookup(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.table.names()
    }
}

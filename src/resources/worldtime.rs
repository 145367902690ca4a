use bevy_ecs::prelude::Resource;

/// Simulation clock in milliseconds.
///
/// [`update_world_time`](crate::systems::time::update_world_time) advances it
/// once per frame; the animation clock follows `elapsed_ms`.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed_ms: u64,
    pub delta_ms: u64,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed_ms: 0,
            delta_ms: 0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}

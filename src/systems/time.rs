//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, applying `time_scale` to the provided delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Advance `WorldTime` by `dt_ms` unscaled milliseconds.
///
/// The scaled delta is rounded to whole milliseconds; a negative or NaN
/// scale freezes the clock.
pub fn update_world_time(world: &mut World, dt_ms: u64) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled = (dt_ms as f64 * f64::from(wt.time_scale)).round();
    let scaled_dt = if scaled.is_finite() && scaled > 0.0 {
        scaled as u64
    } else {
        0
    };
    wt.elapsed_ms += scaled_dt;
    wt.delta_ms = scaled_dt;
    wt.frame_count += 1;
}

//! World setup and the battle demo scene.
//!
//! [`build_world`] inserts the resources and observers every animated world
//! needs. [`spawn_battle`] recreates the two-witch scene: the left witch
//! attacks and then idles forever, the right witch dies and resurrects in a
//! loop. [`FramePump`] runs the per-frame systems in order.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::info;

use crate::animation::library::FrameKey;
use crate::animation::segment::SegmentTable;
use crate::components::animator::SpriteAnimator;
use crate::components::sprite::Sprite;
use crate::events::animation::{PauseAnimationEvent, PlayAnimationEvent, ResumeAnimationEvent};
use crate::resources::animationclock::AnimationClock;
use crate::resources::framebridge::FrameBridge;
use crate::resources::segmentstore::SegmentStore;
use crate::resources::settings::SchedulerSettings;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::{
    animation_timers, dispatch_frame_changes, pause_animation_observer, play_animation_observer,
    release_animator_timers, resume_animation_observer,
};
use crate::systems::sprite::sprite_frame_observer;
use crate::systems::time::update_world_time;

/// Sprite shown before any animation has played.
pub const REST_FRAME: &str = "witch/witch1.svg";

/// Marker for the two characters of the battle scene.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Create a world with animation resources and observers installed.
pub fn build_world(settings: SchedulerSettings, table: SegmentTable<FrameKey>) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(settings.time_scale));
    world.insert_resource(AnimationClock::new());
    world.insert_resource(FrameBridge::new());
    world.insert_resource(SegmentStore::new(table));
    world.insert_resource(settings);

    world.spawn(Observer::new(play_animation_observer));
    world.spawn(Observer::new(pause_animation_observer));
    world.spawn(Observer::new(resume_animation_observer));
    world.spawn(Observer::new(sprite_frame_observer));
    world.flush();
    world
}

/// Spawn an animated character using the configured boundary mode.
pub fn spawn_character(world: &mut World, sprite: Sprite) -> Entity {
    let boundary = world.resource::<SchedulerSettings>().boundary;
    world.spawn((SpriteAnimator::new(boundary), sprite)).id()
}

/// Spawn both witches and start their animations.
pub fn spawn_battle(world: &mut World) -> (Entity, Entity) {
    let left = spawn_character(world, Sprite::new(REST_FRAME));
    world.entity_mut(left).insert(Side::Left);
    let right = spawn_character(world, Sprite::new(REST_FRAME).flipped());
    world.entity_mut(right).insert(Side::Right);

    world.trigger(PlayAnimationEvent::new(left, "attack_then_idle"));
    world.trigger(PlayAnimationEvent::new(right, "dying"));
    info!("Battle started: {left:?} attacks, {right:?} is dying");
    (left, right)
}

pub fn pause_all(world: &mut World) {
    let entities: Vec<Entity> = world
        .query_filtered::<Entity, With<SpriteAnimator>>()
        .iter(world)
        .collect();
    for entity in entities {
        world.trigger(PauseAnimationEvent { entity });
    }
}

pub fn resume_all(world: &mut World) {
    let entities: Vec<Entity> = world
        .query_filtered::<Entity, With<SpriteAnimator>>()
        .iter(world)
        .collect();
    for entity in entities {
        world.trigger(ResumeAnimationEvent { entity });
    }
}

/// Runs the per-frame animation schedule.
pub struct FramePump {
    schedule: Schedule,
}

impl Default for FramePump {
    fn default() -> Self {
        Self::new()
    }
}

impl FramePump {
    pub fn new() -> Self {
        let mut schedule = Schedule::default();
        schedule.add_systems(
            (release_animator_timers, animation_timers, dispatch_frame_changes).chain(),
        );
        Self { schedule }
    }

    /// Deliver frames queued outside a frame, e.g. by a play request.
    pub fn flush(&mut self, world: &mut World) {
        self.schedule.run(world);
    }

    /// Advance world time by `dt_ms` and run the schedule.
    pub fn step(&mut self, world: &mut World, dt_ms: u64) {
        update_world_time(world, dt_ms);
        self.schedule.run(world);
        world.clear_trackers();
    }
}

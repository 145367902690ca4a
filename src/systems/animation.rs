//! Animation systems.
//!
//! - [`animation_timers`] fires due animation ticks from the shared
//!   [`AnimationClock`] and routes each one to the animator that scheduled it.
//! - [`dispatch_frame_changes`] turns queued scheduler notifications into
//!   [`FrameChangedEvent`]s.
//! - [`play_animation_observer`], [`pause_animation_observer`] and
//!   [`resume_animation_observer`] apply control events to animators.
//!
//! # Animation Flow
//!
//! 1. Segments are defined in [`SegmentStore`]
//! 2. A [`PlayAnimationEvent`] starts a run on the entity's [`SpriteAnimator`];
//!    the first frame is queued immediately
//! 3. Each frame, [`update_world_time`](crate::systems::time::update_world_time)
//!    advances [`WorldTime`], then `animation_timers` fires every tick due by
//!    then, triggering each tick's frame before the next tick fires
//! 4. `dispatch_frame_changes` triggers frames queued by play requests
//!
//! # Related
//!
//! - [`crate::animation::scheduler`] – the stepping rules
//! - [`crate::components::animator::SpriteAnimator`] – per-entity scheduler

use bevy_ecs::prelude::*;
use log::{trace, warn};

use crate::animation::timer::TickDelay;
use crate::components::animator::SpriteAnimator;
use crate::events::animation::{PauseAnimationEvent, PlayAnimationEvent, ResumeAnimationEvent};
use crate::events::framechange::FrameChangedEvent;
use crate::resources::animationclock::AnimationClock;
use crate::resources::framebridge::FrameBridge;
use crate::resources::segmentstore::SegmentStore;
use crate::resources::settings::SchedulerSettings;
use crate::resources::worldtime::WorldTime;

/// Fire every animation tick due by `WorldTime::elapsed_ms`.
///
/// Ticks are fired one at a time in due order, so an animator that falls
/// several frames behind catches up frame by frame within one call. The
/// frames each tick reports are triggered as [`FrameChangedEvent`]s before
/// the next tick fires, so an observer that cancels the payload timer stops
/// the very next tick. Ticks whose entity no longer has an animator are
/// dropped.
///
/// Exclusive because observers of the frame events may need the
/// [`AnimationClock`] between two ticks.
pub fn animation_timers(world: &mut World) {
    let now = world.resource::<WorldTime>().elapsed_ms;
    let mut fired = 0usize;
    loop {
        let due = world.resource_mut::<AnimationClock>().queue.pop_due(now);
        let Some((handle, owner)) = due else {
            break;
        };
        world.resource_scope(|world, mut clock: Mut<AnimationClock>| {
            match world.get_mut::<SpriteAnimator>(owner) {
                Some(mut animator) => {
                    animator.scheduler.fire(handle, &mut clock.queue.bind(owner));
                }
                None => trace!("Dropping {handle} for {owner:?} without animator"),
            }
        });
        deliver_frame_changes(world);
        fired += 1;
    }
    world.resource_mut::<AnimationClock>().queue.move_clock_to(now);
    reconcile_animators(world);
    if fired > 0 {
        trace!("Fired {fired} animation ticks at {now}ms");
    }
}

/// Trigger queued notifications until the bridge is empty. Observers may
/// start new runs, whose first frames are delivered in the same call.
fn deliver_frame_changes(world: &mut World) {
    loop {
        let events = world.resource::<FrameBridge>().drain();
        if events.is_empty() {
            break;
        }
        for event in events {
            world.trigger(event);
        }
    }
}

/// Let every animator notice ticks cancelled through frame payload handles.
fn reconcile_animators(world: &mut World) {
    world.resource_scope(|world, mut clock: Mut<AnimationClock>| {
        let mut animators = world.query::<(Entity, &mut SpriteAnimator)>();
        for (entity, mut animator) in animators.iter_mut(world) {
            let stale = animator
                .scheduler
                .pending_timer()
                .is_some_and(|handle| !clock.queue.is_pending(handle));
            if stale {
                animator.scheduler.reconcile(&clock.timers_for(entity));
            }
        }
    });
}

/// Trigger a [`FrameChangedEvent`] for every queued notification, oldest
/// first.
pub fn dispatch_frame_changes(bridge: Res<FrameBridge>, mut commands: Commands) {
    for event in bridge.drain() {
        commands.trigger(event);
    }
}

/// Start the requested segment on the entity's animator.
pub fn play_animation_observer(
    trigger: On<PlayAnimationEvent>,
    store: Res<SegmentStore>,
    settings: Res<SchedulerSettings>,
    bridge: Res<FrameBridge>,
    mut clock: ResMut<AnimationClock>,
    mut animators: Query<&mut SpriteAnimator>,
) {
    let event = trigger.event();
    let Ok(mut animator) = animators.get_mut(event.entity) else {
        warn!("PlayAnimationEvent for {:?} without SpriteAnimator", event.entity);
        return;
    };
    let Some(segment) = store.lookup(&event.segment) else {
        warn!("Unknown animation segment '{}'", event.segment);
        return;
    };
    let delay = match event.delay_ms {
        None => settings.delay,
        Some(ms) => match TickDelay::from_millis(ms) {
            Ok(delay) => delay,
            Err(e) => {
                warn!("Ignoring play of '{}': {}", event.segment, e);
                return;
            }
        },
    };

    let entity = event.entity;
    let sender = bridge.sender();
    let result = animator.scheduler.play(
        store.table(),
        segment,
        delay,
        move |change| {
            // The receiver lives as long as the world's FrameBridge.
            let _ = sender.send(FrameChangedEvent::new(entity, change));
        },
        &mut clock.timers_for(entity),
    );
    if let Err(e) = result {
        warn!("Failed to play '{}' on {:?}: {}", event.segment, entity, e);
    }
}

pub fn pause_animation_observer(
    trigger: On<PauseAnimationEvent>,
    mut clock: ResMut<AnimationClock>,
    mut animators: Query<&mut SpriteAnimator>,
) {
    let entity = trigger.event().entity;
    match animators.get_mut(entity) {
        Ok(mut animator) => {
            if !animator.scheduler.pause(&mut clock.timers_for(entity)) {
                trace!("Pause ignored for {entity:?}: not running");
            }
        }
        Err(_) => warn!("PauseAnimationEvent for {entity:?} without SpriteAnimator"),
    }
}

pub fn resume_animation_observer(
    trigger: On<ResumeAnimationEvent>,
    mut clock: ResMut<AnimationClock>,
    mut animators: Query<&mut SpriteAnimator>,
) {
    let entity = trigger.event().entity;
    match animators.get_mut(entity) {
        Ok(mut animator) => {
            if !animator.scheduler.resume(&mut clock.timers_for(entity)) {
                trace!("Resume ignored for {entity:?}: not paused");
            }
        }
        Err(_) => warn!("ResumeAnimationEvent for {entity:?} without SpriteAnimator"),
    }
}

/// Drop the pending ticks of entities whose animator was removed.
pub fn release_animator_timers(
    mut removed: RemovedComponents<SpriteAnimator>,
    mut clock: ResMut<AnimationClock>,
) {
    for entity in removed.read() {
        let dropped = clock.queue.cancel_owned_by(&entity);
        if dropped > 0 {
            trace!("Released {dropped} timers of {entity:?}");
        }
    }
}

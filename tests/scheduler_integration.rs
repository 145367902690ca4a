//! Scheduler integration tests against the bundled witch library.
//!
//! Uses the engine-agnostic core only: a [`Scheduler`] driven by a
//! [`TimerQueue`], no ECS world.

use std::sync::{Arc, Mutex};

use aberredsprite::animation::library::{FrameKey, witch_library};
use aberredsprite::animation::scheduler::{BoundaryMode, Scheduler, SchedulerState};
use aberredsprite::animation::segment::SegmentTable;
use aberredsprite::animation::timer::{TickDelay, TimerQueue};

struct Rig {
    table: Arc<SegmentTable<FrameKey>>,
    queue: TimerQueue<()>,
    scheduler: Scheduler<FrameKey>,
    shown: Arc<Mutex<Vec<String>>>,
}

impl Rig {
    fn new(boundary: BoundaryMode) -> Self {
        Self {
            table: Arc::new(witch_library().unwrap()),
            queue: TimerQueue::new(),
            scheduler: Scheduler::with_boundary(boundary),
            shown: Arc::default(),
        }
    }

    fn play(&mut self, name: &str) {
        let start = self.table.lookup(name).unwrap();
        let shown = self.shown.clone();
        self.scheduler
            .play(
                self.table.clone(),
                start,
                TickDelay::from_millis(100).unwrap(),
                move |change| shown.lock().unwrap().push(change.frame().to_string()),
                &mut self.queue,
            )
            .unwrap();
    }

    fn advance(&mut self, millis: u64) {
        let scheduler = &mut self.scheduler;
        self.queue.advance_by(millis, |queue, handle, _| {
            scheduler.fire(handle, queue);
        });
    }

    fn shown(&self) -> Vec<String> {
        self.shown.lock().unwrap().clone()
    }
}

fn witch(n: u32) -> String {
    format!("witch/witch{n}.svg")
}

#[test]
fn bundled_library_defines_every_segment() {
    let table = witch_library().unwrap();
    assert_eq!(
        table.names(),
        vec![
            "attack",
            "attack_then_idle",
            "charge_loop",
            "death",
            "dying",
            "idle_loop",
            "resurrect",
            "reviving",
            "run_loop",
        ]
    );
}

#[test]
fn death_cycle_alternates_forever() {
    let mut rig = Rig::new(BoundaryMode::LastFrame);
    rig.play("dying");

    // Death at 0..=1400, resurrect at 1500..=2900, death again at 3000.
    rig.advance(3050);

    let mut expected: Vec<String> = (29..=43).map(witch).collect();
    expected.extend((29..=43).rev().map(witch));
    expected.push(witch(29));
    assert_eq!(rig.shown(), expected);
    assert_eq!(rig.scheduler.state(), SchedulerState::Running);
    assert_eq!(rig.queue.len(), 1);
}

#[test]
fn death_cycle_lookahead_skips_last_frame_and_keeps_going() {
    let mut rig = Rig::new(BoundaryMode::Lookahead);
    rig.play("dying");
    rig.advance(1400);

    let mut expected: Vec<String> = (29..=42).map(witch).collect();
    expected.push(witch(43));
    assert_eq!(rig.shown(), expected);
    assert_eq!(rig.table.lookup("reviving"), rig.scheduler.segment());
}

#[test]
fn one_shot_death_ends_on_last_frame() {
    let mut rig = Rig::new(BoundaryMode::LastFrame);
    rig.play("death");
    rig.advance(10_000);

    let shown = rig.shown();
    assert_eq!(shown.len(), 15);
    assert_eq!(shown.last(), Some(&witch(43)));
    assert_eq!(rig.scheduler.state(), SchedulerState::Finished);
    assert!(rig.queue.is_empty());
}

#[test]
fn attack_hands_off_to_idle_loop() {
    let mut rig = Rig::new(BoundaryMode::LastFrame);
    rig.play("attack_then_idle");
    // 9 attack frames at 0..=800, idle starts at 900.
    rig.advance(900 + 100 * 11);

    let shown = rig.shown();
    assert_eq!(&shown[..9], &(20..=28).map(witch).collect::<Vec<_>>()[..]);
    let idle: Vec<String> = (1..=6).chain(1..=6).map(witch).collect();
    assert_eq!(&shown[9..], &idle[..]);
    assert_eq!(rig.table.lookup("idle_loop"), rig.scheduler.segment());
}

#[test]
fn pause_mid_cycle_then_replay_starts_fresh() {
    let mut rig = Rig::new(BoundaryMode::LastFrame);
    rig.play("run_loop");
    rig.advance(250);
    assert!(rig.scheduler.pause(&mut rig.queue));
    rig.advance(1000);
    assert_eq!(rig.shown(), vec![witch(7), witch(8), witch(9)]);

    rig.play("charge_loop");
    assert_eq!(rig.scheduler.state(), SchedulerState::Running);
    rig.advance(100);
    assert_eq!(rig.shown()[3..], [witch(15), witch(16)]);
}

//! Animation scheduler.
//!
//! A [`Scheduler`] walks a [`SegmentTable`] one frame per tick. Every tick it
//! reports the frame on screen through the listener given to
//! [`play`](Scheduler::play), and asks its [`TimerService`] for the next tick.
//! The timer owner calls [`fire`](Scheduler::fire) when that tick is due.
//!
//! # States
//!
//! ```text
//!            play                 pause
//!   Idle ──────────► Running ◄──────────► Paused
//!                      │         resume
//!                      │ last pass, no successor
//!                      ▼
//!                   Finished
//! ```
//!
//! `play` from any state discards the current run and starts over.
//!
//! # Boundary
//!
//! With [`BoundaryMode::Lookahead`] a pass ends when the *next* index is the
//! last index of the sequence, one tick before the literal wraparound, and a
//! terminal pass reports nothing on its final tick. [`BoundaryMode::LastFrame`]
//! ends a pass on the last index itself and reports that frame before
//! finishing, so every frame of every pass is shown.

use std::fmt;
use std::sync::Arc;

use log::{debug, trace};

use crate::animation::segment::{FrameSequence, RepeatCount, SegmentId, SegmentTable};
use crate::animation::timer::{TickDelay, TimerHandle, TimerService};
use crate::error::AnimationError;

/// Payload delivered to the frame listener on every frame change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameChange<F> {
    /// Index of the frame now on screen.
    pub index: usize,
    pub frames: FrameSequence<F>,
    /// Timer of the already-scheduled next tick. `None` on the final frame of
    /// a run or of a segment that hands off to its successor.
    pub timer: Option<TimerHandle>,
}

impl<F> FrameChange<F> {
    pub fn frame(&self) -> &F {
        &self.frames[self.index]
    }
}

/// Where a pass through a segment's frames is considered complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryMode {
    #[default]
    Lookahead,
    LastFrame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Nothing has been played yet.
    Idle,
    Running,
    Paused,
    Finished,
}

/// Work the pending (or paused) timer performs when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Step,
    Chain(SegmentId),
}

type FrameListener<F> = Box<dyn FnMut(FrameChange<F>) + Send + Sync>;

struct RunState<F> {
    table: Arc<SegmentTable<F>>,
    segment: SegmentId,
    frame_index: usize,
    remaining: RepeatCount,
    delay: TickDelay,
    next: Option<Pending>,
    timer: Option<TimerHandle>,
    listener: FrameListener<F>,
}

impl<F> RunState<F> {
    fn enter(&mut self, segment: SegmentId, remaining: RepeatCount) {
        self.segment = segment;
        self.frame_index = 0;
        self.remaining = remaining;
        self.next = Some(Pending::Step);
        self.timer = None;
    }

    fn finish(&mut self) {
        self.next = None;
        self.timer = None;
    }
}

/// Drives one animation run at a time.
pub struct Scheduler<F> {
    boundary: BoundaryMode,
    run: Option<RunState<F>>,
}

impl<F> Default for Scheduler<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> fmt::Debug for Scheduler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("boundary", &self.boundary)
            .field("state", &self.state())
            .field("segment", &self.segment())
            .field("frame_index", &self.frame_index())
            .field("pending_timer", &self.pending_timer())
            .finish()
    }
}

impl<F> Scheduler<F> {
    pub fn new() -> Self {
        Self {
            boundary: BoundaryMode::default(),
            run: None,
        }
    }

    pub fn with_boundary(boundary: BoundaryMode) -> Self {
        Self {
            boundary,
            run: None,
        }
    }

    pub fn boundary(&self) -> BoundaryMode {
        self.boundary
    }

    /// Current state. A tick cancelled directly on the timer service still
    /// reads as `Running` until [`reconcile`](Self::reconcile), `pause` or
    /// `resume` sees the service.
    pub fn state(&self) -> SchedulerState {
        match &self.run {
            None => SchedulerState::Idle,
            Some(run) if run.next.is_none() => SchedulerState::Finished,
            Some(run) if run.timer.is_some() => SchedulerState::Running,
            Some(_) => SchedulerState::Paused,
        }
    }

    /// Segment of the current run, kept after the run finishes.
    pub fn segment(&self) -> Option<SegmentId> {
        self.run.as_ref().map(|run| run.segment)
    }

    /// Index the next step will report.
    pub fn frame_index(&self) -> Option<usize> {
        self.run.as_ref().map(|run| run.frame_index)
    }

    pub fn remaining_repeats(&self) -> Option<RepeatCount> {
        self.run.as_ref().map(|run| run.remaining)
    }

    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.run.as_ref().and_then(|run| run.timer)
    }

    pub fn delay(&self) -> Option<TickDelay> {
        self.run.as_ref().map(|run| run.delay)
    }

    /// Start a new run at `start`, cancelling the previous run's pending
    /// timer. The first frame is reported before this returns.
    ///
    /// Fails only if `start` is not part of `table`; the previous run is left
    /// untouched in that case.
    pub fn play<T>(
        &mut self,
        table: Arc<SegmentTable<F>>,
        start: SegmentId,
        delay: TickDelay,
        on_change: impl FnMut(FrameChange<F>) + Send + Sync + 'static,
        timers: &mut T,
    ) -> Result<(), AnimationError>
    where
        T: TimerService + ?Sized,
    {
        let remaining = table
            .get(start)
            .ok_or(AnimationError::UnknownSegment(start))?
            .repeat_or_default();

        if let Some(previous) = self.run.take() {
            if let Some(handle) = previous.timer {
                timers.cancel(handle);
            }
            debug!(
                "Superseding run at segment {} frame {}",
                previous.segment, previous.frame_index
            );
        }

        debug!("Playing segment {start} (repeat {remaining}, delay {}ms)", delay.as_millis());
        self.run = Some(RunState {
            table,
            segment: start,
            frame_index: 0,
            remaining,
            delay,
            next: Some(Pending::Step),
            timer: None,
            listener: Box::new(on_change),
        });
        self.step(timers);
        Ok(())
    }

    /// Suspend the run, keeping its position. Returns `false` when there is
    /// nothing to pause.
    pub fn pause<T>(&mut self, timers: &mut T) -> bool
    where
        T: TimerService + ?Sized,
    {
        self.reconcile(&*timers);
        let Some(run) = self.run.as_mut() else {
            return false;
        };
        let Some(handle) = run.timer.take() else {
            return false;
        };
        timers.cancel(handle);
        debug!("Paused at segment {} frame {}", run.segment, run.frame_index);
        true
    }

    /// Forget a pending timer that `timers` no longer holds, e.g. one a
    /// listener cancelled through its [`FrameChange::timer`] handle. The run
    /// is then [`Paused`](SchedulerState::Paused) and `resume` restarts it.
    ///
    /// Returns `true` if a timer was forgotten.
    pub fn reconcile<T>(&mut self, timers: &T) -> bool
    where
        T: TimerService + ?Sized,
    {
        let Some(run) = self.run.as_mut() else {
            return false;
        };
        match run.timer {
            Some(handle) if !timers.is_pending(handle) => {
                run.timer = None;
                debug!("Tick {handle} was cancelled outside the scheduler");
                true
            }
            _ => false,
        }
    }

    /// Continue a paused run. The wait restarts with the full delay.
    /// Returns `false` when the run is not paused.
    pub fn resume<T>(&mut self, timers: &mut T) -> bool
    where
        T: TimerService + ?Sized,
    {
        self.reconcile(&*timers);
        let Some(run) = self.run.as_mut() else {
            return false;
        };
        if run.timer.is_some() || run.next.is_none() {
            return false;
        }
        run.timer = Some(timers.schedule(run.delay));
        debug!("Resumed at segment {} frame {}", run.segment, run.frame_index);
        true
    }

    /// Perform the tick that `handle` was scheduled for. Handles that do not
    /// belong to the current run are ignored and `false` is returned.
    pub fn fire<T>(&mut self, handle: TimerHandle, timers: &mut T) -> bool
    where
        T: TimerService + ?Sized,
    {
        let Some(run) = self.run.as_mut() else {
            return false;
        };
        if run.timer != Some(handle) {
            trace!("Ignoring stale {handle}");
            return false;
        }
        run.timer = None;

        let next = run.next;
        match next {
            Some(Pending::Step) => self.step(timers),
            Some(Pending::Chain(next)) => {
                let Some(segment) = run.table.get(next) else {
                    run.finish();
                    return true;
                };
                debug!("Chaining to segment {next}");
                let remaining = segment.repeat_or_default();
                run.enter(next, remaining);
                self.step(timers);
            }
            None => {}
        }
        true
    }

    /// One tick of the current segment.
    fn step<T>(&mut self, timers: &mut T)
    where
        T: TimerService + ?Sized,
    {
        let boundary = self.boundary;
        let Some(run) = self.run.as_mut() else {
            return;
        };
        let table = Arc::clone(&run.table);
        let Some(segment) = table.get(run.segment) else {
            run.finish();
            return;
        };
        let frames = segment.frames().clone();
        let index = run.frame_index;
        let next_index = (index + 1) % frames.len();
        let at_boundary = match boundary {
            BoundaryMode::Lookahead => next_index == frames.last_index(),
            BoundaryMode::LastFrame => index == frames.last_index(),
        };

        let remaining = if !at_boundary || run.remaining.is_infinite() {
            Some(run.remaining)
        } else {
            run.remaining.decremented()
        };

        if let Some(remaining) = remaining {
            run.remaining = remaining;
            let handle = timers.schedule(run.delay);
            run.timer = Some(handle);
            run.next = Some(Pending::Step);
            trace!("Frame {index} of segment {}, next tick {handle}", run.segment);
            (run.listener)(FrameChange {
                index,
                frames,
                timer: Some(handle),
            });
            run.frame_index = next_index;
        } else if let Some(successor) = segment.successor() {
            run.timer = Some(timers.schedule(run.delay));
            run.next = Some(Pending::Chain(successor));
            trace!("Final frame {index} of segment {}, chaining to {successor}", run.segment);
            (run.listener)(FrameChange {
                index,
                frames,
                timer: None,
            });
        } else {
            run.finish();
            debug!("Run finished at segment {} frame {index}", run.segment);
            if boundary == BoundaryMode::LastFrame {
                (run.listener)(FrameChange {
                    index,
                    frames,
                    timer: None,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::animation::segment::{AnimationSegment, SegmentTableBuilder};
    use crate::animation::timer::TimerQueue;

    type Log = Arc<Mutex<Vec<(u64, &'static str)>>>;

    /// Scheduler plus queue, recording every reported frame with the clock
    /// value at which it was reported.
    struct Harness {
        queue: TimerQueue<()>,
        scheduler: Scheduler<&'static str>,
        log: Log,
        clock: Arc<Mutex<u64>>,
    }

    impl Harness {
        fn new(boundary: BoundaryMode) -> Self {
            Self {
                queue: TimerQueue::new(),
                scheduler: Scheduler::with_boundary(boundary),
                log: Arc::default(),
                clock: Arc::default(),
            }
        }

        fn play(&mut self, table: &Arc<SegmentTable<&'static str>>, start: SegmentId) {
            *self.clock.lock().unwrap() = self.queue.now_ms();
            let log = Arc::clone(&self.log);
            let clock = Arc::clone(&self.clock);
            self.scheduler
                .play(
                    Arc::clone(table),
                    start,
                    TickDelay::from_millis(100).unwrap(),
                    move |change| {
                        let at = *clock.lock().unwrap();
                        log.lock().unwrap().push((at, *change.frame()));
                    },
                    &mut self.queue,
                )
                .unwrap();
        }

        fn advance(&mut self, millis: u64) {
            let clock = Arc::clone(&self.clock);
            let scheduler = &mut self.scheduler;
            self.queue.advance_by(millis, |queue, handle, _| {
                *clock.lock().unwrap() = queue.now_ms();
                scheduler.fire(handle, queue);
            });
        }

        fn frames(&self) -> Vec<&'static str> {
            self.log.lock().unwrap().iter().map(|(_, f)| *f).collect()
        }

        fn times(&self) -> Vec<u64> {
            self.log.lock().unwrap().iter().map(|(t, _)| *t).collect()
        }
    }

    fn seq(frames: &[&'static str]) -> FrameSequence<&'static str> {
        FrameSequence::new(frames.to_vec()).unwrap()
    }

    fn looping(frames: &[&'static str]) -> AnimationSegment<&'static str> {
        AnimationSegment::new(seq(frames)).with_repeat(RepeatCount::Infinite)
    }

    fn repeated(frames: &[&'static str], times: u32) -> AnimationSegment<&'static str> {
        AnimationSegment::new(seq(frames)).with_repeat(RepeatCount::times(times).unwrap())
    }

    fn single(
        segment: AnimationSegment<&'static str>,
    ) -> (Arc<SegmentTable<&'static str>>, SegmentId) {
        let mut builder = SegmentTable::builder();
        let id = builder.insert(segment);
        (Arc::new(builder.build().unwrap()), id)
    }

    #[test]
    fn play_reports_first_frame_synchronously() {
        let (table, id) = single(AnimationSegment::new(seq(&["f0", "f1", "f2"])));
        let mut h = Harness::new(BoundaryMode::Lookahead);
        h.play(&table, id);
        assert_eq!(h.frames(), vec!["f0"]);
        assert_eq!(h.scheduler.state(), SchedulerState::Running);
        assert_eq!(h.scheduler.frame_index(), Some(1));
    }

    #[test]
    fn lookahead_single_pass_stops_one_tick_before_wrap() {
        let (table, id) = single(AnimationSegment::new(seq(&["f0", "f1", "f2"])));
        let mut h = Harness::new(BoundaryMode::Lookahead);
        h.play(&table, id);
        h.advance(1000);
        assert_eq!(h.frames(), vec!["f0"]);
        assert_eq!(h.scheduler.state(), SchedulerState::Finished);
        assert_eq!(h.scheduler.pending_timer(), None);
        assert!(h.queue.is_empty());
    }

    #[test]
    fn lookahead_repeat_twice() {
        let (table, id) = single(repeated(&["f0", "f1", "f2"], 2));
        let mut h = Harness::new(BoundaryMode::Lookahead);
        h.play(&table, id);
        h.advance(1000);
        assert_eq!(h.frames(), vec!["f0", "f1", "f2", "f0"]);
        assert_eq!(h.times(), vec![0, 100, 200, 300]);
        assert_eq!(h.scheduler.state(), SchedulerState::Finished);
    }

    #[test]
    fn last_frame_single_pass_reports_every_frame() {
        let (table, id) = single(AnimationSegment::new(seq(&["f0", "f1", "f2"])));
        let mut h = Harness::new(BoundaryMode::LastFrame);
        h.play(&table, id);
        h.advance(1000);
        assert_eq!(h.frames(), vec!["f0", "f1", "f2"]);
        assert_eq!(h.times(), vec![0, 100, 200]);
        assert_eq!(h.scheduler.state(), SchedulerState::Finished);
        assert!(h.queue.is_empty());
    }

    #[test]
    fn last_frame_repeats_whole_passes() {
        let (table, id) = single(repeated(&["f0", "f1", "f2"], 3));
        let mut h = Harness::new(BoundaryMode::LastFrame);
        h.play(&table, id);
        h.advance(10_000);
        assert_eq!(h.frames().len(), 9);
        assert_eq!(h.frames()[..6], ["f0", "f1", "f2", "f0", "f1", "f2"]);
    }

    #[test]
    fn last_frame_single_frame_segment() {
        let (table, id) = single(AnimationSegment::new(seq(&["only"])));
        let mut h = Harness::new(BoundaryMode::LastFrame);
        h.play(&table, id);
        assert_eq!(h.frames(), vec!["only"]);
        assert_eq!(h.scheduler.state(), SchedulerState::Finished);
    }

    #[test]
    fn infinite_cycles_every_frame() {
        for boundary in [BoundaryMode::Lookahead, BoundaryMode::LastFrame] {
            let (table, id) = single(looping(&["f0", "f1", "f2"]));
            let mut h = Harness::new(boundary);
            h.play(&table, id);
            h.advance(700);
            assert_eq!(h.frames(), vec!["f0", "f1", "f2", "f0", "f1", "f2", "f0", "f1"]);
            assert_eq!(h.scheduler.state(), SchedulerState::Running);
        }
    }

    #[test]
    fn pause_and_resume_keep_position() {
        let (table, id) = single(looping(&["f0", "f1", "f2", "f3"]));
        let mut h = Harness::new(BoundaryMode::Lookahead);
        h.play(&table, id);
        h.advance(100);
        assert_eq!(h.frames(), vec!["f0", "f1"]);

        assert!(h.scheduler.pause(&mut h.queue));
        assert_eq!(h.scheduler.state(), SchedulerState::Paused);
        assert!(!h.scheduler.pause(&mut h.queue));
        assert!(h.queue.is_empty());

        h.advance(1000);
        assert_eq!(h.frames(), vec!["f0", "f1"]);

        assert!(h.scheduler.resume(&mut h.queue));
        assert!(!h.scheduler.resume(&mut h.queue));
        h.advance(99);
        assert_eq!(h.frames().len(), 2);
        h.advance(1);
        assert_eq!(h.frames(), vec!["f0", "f1", "f2"]);
        assert_eq!(h.times()[2], 1200);
    }

    #[test]
    fn pause_and_resume_without_run_are_noops() {
        let mut queue = TimerQueue::new();
        let mut scheduler = Scheduler::<u8>::new();
        assert!(!scheduler.pause(&mut queue));
        assert!(!scheduler.resume(&mut queue));
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert!(queue.is_empty());
    }

    #[test]
    fn resume_after_finish_is_noop() {
        let (table, id) = single(AnimationSegment::new(seq(&["f0"])));
        let mut h = Harness::new(BoundaryMode::Lookahead);
        h.play(&table, id);
        assert_eq!(h.scheduler.state(), SchedulerState::Finished);
        assert!(!h.scheduler.resume(&mut h.queue));
        assert!(!h.scheduler.pause(&mut h.queue));
        assert!(h.queue.is_empty());
    }

    #[test]
    fn successor_starts_after_one_delay() {
        let mut builder = SegmentTable::builder();
        let b = builder.insert(looping(&["b0", "b1"]));
        let a = builder.insert(AnimationSegment::new(seq(&["a0", "a1", "a2"])).with_successor(b));
        let table = Arc::new(builder.build().unwrap());

        let mut h = Harness::new(BoundaryMode::LastFrame);
        h.play(&table, a);
        h.advance(500);
        assert_eq!(h.frames(), vec!["a0", "a1", "a2", "b0", "b1", "b0"]);
        assert_eq!(h.times(), vec![0, 100, 200, 300, 400, 500]);
        assert_eq!(h.scheduler.segment(), Some(b));
    }

    #[test]
    fn final_frame_before_successor_carries_no_timer() {
        let mut builder = SegmentTable::builder();
        let b = builder.insert(AnimationSegment::new(seq(&["b0"])));
        let a = builder.insert(AnimationSegment::new(seq(&["a0", "a1"])).with_successor(b));
        let table = Arc::new(builder.build().unwrap());

        let changes: Arc<Mutex<Vec<FrameChange<&'static str>>>> = Arc::default();
        let sink = Arc::clone(&changes);
        let mut queue = TimerQueue::new();
        let mut scheduler = Scheduler::new();
        scheduler
            .play(
                table,
                a,
                TickDelay::from_millis(10).unwrap(),
                move |c| sink.lock().unwrap().push(c),
                &mut queue,
            )
            .unwrap();

        // Lookahead: a0 is already the final frame of a two-frame segment.
        let changes = changes.lock().unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].index, 0);
        assert_eq!(changes[0].timer, None);
        assert_eq!(scheduler.state(), SchedulerState::Running);
    }

    #[test]
    fn pause_holds_successor_handoff() {
        let mut builder = SegmentTable::builder();
        let b = builder.insert(looping(&["b0", "b1"]));
        let a = builder.insert(AnimationSegment::new(seq(&["a0"])).with_successor(b));
        let table = Arc::new(builder.build().unwrap());

        let mut h = Harness::new(BoundaryMode::LastFrame);
        h.play(&table, a);
        assert!(h.scheduler.pause(&mut h.queue));
        h.advance(1000);
        assert_eq!(h.frames(), vec!["a0"]);

        assert!(h.scheduler.resume(&mut h.queue));
        h.advance(100);
        assert_eq!(h.frames(), vec!["a0", "b0"]);
        assert_eq!(h.scheduler.segment(), Some(b));
    }

    #[test]
    fn cyclic_chain_runs_in_constant_space() {
        let mut builder = SegmentTable::builder();
        let death = builder.reserve();
        let resurrect =
            builder.insert(AnimationSegment::new(seq(&["d2", "d1", "d0"])).with_successor(death));
        let dying = AnimationSegment::new(seq(&["d0", "d1", "d2"])).with_successor(resurrect);
        builder.define(death, dying).unwrap();
        let table = Arc::new(builder.build().unwrap());

        let mut h = Harness::new(BoundaryMode::LastFrame);
        h.play(&table, death);
        h.advance(100 * 6 * 50);
        assert_eq!(h.queue.len(), 1);
        assert_eq!(h.frames().len(), 6 * 50 + 1);
        assert_eq!(h.frames()[..7], ["d0", "d1", "d2", "d2", "d1", "d0", "d0"]);

        assert!(h.scheduler.pause(&mut h.queue));
        assert!(h.queue.is_empty());
    }

    #[test]
    fn replay_cancels_previous_run() {
        let mut builder = SegmentTable::builder();
        let a = builder.insert(looping(&["a0", "a1", "a2"]));
        let b = builder.insert(looping(&["b0", "b1", "b2"]));
        let table = Arc::new(builder.build().unwrap());

        let mut h = Harness::new(BoundaryMode::Lookahead);
        h.play(&table, a);
        h.advance(50);
        let stale = h.scheduler.pending_timer().unwrap();

        h.play(&table, b);
        assert!(!h.queue.is_pending(stale));
        assert!(!TimerService::cancel(&mut h.queue, stale));
        assert!(!h.scheduler.fire(stale, &mut h.queue));

        h.advance(200);
        assert_eq!(h.frames(), vec!["a0", "b0", "b1", "b2"]);
        assert_eq!(h.queue.len(), 1);
    }

    #[test]
    fn replay_with_unknown_segment_keeps_current_run() {
        let (table, id) = single(looping(&["f0", "f1"]));
        let (other, _) = single(AnimationSegment::new(seq(&["x"])));
        let mut builder = SegmentTableBuilder::<&'static str>::new();
        builder.reserve();
        let missing = builder.reserve();

        let mut h = Harness::new(BoundaryMode::Lookahead);
        h.play(&table, id);
        let pending = h.scheduler.pending_timer();
        let err = h
            .scheduler
            .play(other, missing, TickDelay::from_millis(5).unwrap(), |_| {}, &mut h.queue)
            .unwrap_err();
        assert_eq!(err, AnimationError::UnknownSegment(missing));
        assert_eq!(h.scheduler.pending_timer(), pending);
        assert_eq!(h.scheduler.state(), SchedulerState::Running);
    }

    #[test]
    fn listener_may_cancel_next_tick_with_payload_handle() {
        let (table, id) = single(looping(&["f0", "f1", "f2"]));
        let handles: Arc<Mutex<Vec<TimerHandle>>> = Arc::default();
        let sink = Arc::clone(&handles);
        let mut queue: TimerQueue<()> = TimerQueue::new();
        let mut scheduler = Scheduler::new();
        scheduler
            .play(
                table,
                id,
                TickDelay::from_millis(10).unwrap(),
                move |c: FrameChange<&'static str>| sink.lock().unwrap().extend(c.timer),
                &mut queue,
            )
            .unwrap();

        let handle = handles.lock().unwrap()[0];
        assert!(TimerService::cancel(&mut queue, handle));
        assert_eq!(queue.advance_by(100, |_, _, _| {}), 0);

        assert!(scheduler.reconcile(&queue));
        assert_eq!(scheduler.pending_timer(), None);
        assert_eq!(scheduler.state(), SchedulerState::Paused);
        assert!(!scheduler.reconcile(&queue));
    }

    #[test]
    fn resume_restarts_run_stopped_through_payload_handle() {
        let (table, id) = single(looping(&["f0", "f1", "f2"]));
        let mut h = Harness::new(BoundaryMode::Lookahead);
        h.play(&table, id);
        h.advance(100);
        let handle = h.scheduler.pending_timer().unwrap();
        assert!(TimerService::cancel(&mut h.queue, handle));

        h.advance(500);
        assert_eq!(h.frames(), vec!["f0", "f1"]);
        assert!(h.scheduler.resume(&mut h.queue));
        assert_eq!(h.scheduler.state(), SchedulerState::Running);
        h.advance(100);
        assert_eq!(h.frames(), vec!["f0", "f1", "f2"]);
        assert_eq!(h.times()[2], 700);
    }

    #[test]
    fn pause_after_payload_cancel_reports_nothing_to_pause() {
        let (table, id) = single(looping(&["f0", "f1"]));
        let mut h = Harness::new(BoundaryMode::Lookahead);
        h.play(&table, id);
        let handle = h.scheduler.pending_timer().unwrap();
        TimerService::cancel(&mut h.queue, handle);

        assert!(!h.scheduler.pause(&mut h.queue));
        assert_eq!(h.scheduler.state(), SchedulerState::Paused);
        assert!(h.scheduler.resume(&mut h.queue));
    }

    #[test]
    fn three_frames_repeated_twice_per_boundary_mode() {
        // The look-ahead boundary ends the second pass one tick early; the
        // last-frame boundary shows both passes whole. Neither re-enters the
        // second pass at f1, so neither yields f0,f1,f2,f1,f2.
        let expected = [
            (BoundaryMode::Lookahead, vec!["f0", "f1", "f2", "f0"]),
            (BoundaryMode::LastFrame, vec!["f0", "f1", "f2", "f0", "f1", "f2"]),
        ];
        for (boundary, frames) in expected {
            let (table, id) = single(repeated(&["f0", "f1", "f2"], 2));
            let mut h = Harness::new(boundary);
            h.play(&table, id);
            h.advance(1000);
            assert_eq!(
                h.frames(),
                frames,
                "{boundary:?} with repeat 2 differs from the f0,f1,f2,f1,f2 sequence",
            );
            assert_ne!(h.frames(), vec!["f0", "f1", "f2", "f1", "f2"]);
            assert_eq!(h.scheduler.state(), SchedulerState::Finished);
        }
    }
}

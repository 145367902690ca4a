//! Single-shot timers for the animation scheduler.
//!
//! The scheduler never touches a clock directly. It asks a [`TimerService`]
//! for a [`TimerHandle`] that fires after a [`TickDelay`], and the code that
//! owns the service calls [`Scheduler::fire`](super::scheduler::Scheduler::fire)
//! with that handle once it is due.
//!
//! [`TimerQueue`] is the service used throughout the crate: a monotonic,
//! millisecond clock advanced explicitly by its owner (usually once per frame
//! from [`WorldTime`](crate::resources::worldtime::WorldTime)). Each timer
//! carries an owner key so one queue can serve many schedulers.

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU64;
use std::time::Duration;

use rustc_hash::FxHashMap;

use crate::error::AnimationError;

/// Opaque token for a scheduled timer.
///
/// Only meaningful to the service that minted it. Handed to frame listeners
/// so they can cancel the next tick themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Wrap a service-specific id.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer:{}", self.0)
    }
}

/// Positive inter-frame delay in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickDelay(NonZeroU64);

impl TickDelay {
    pub const fn new(millis: NonZeroU64) -> Self {
        TickDelay(millis)
    }

    pub fn from_millis(millis: u64) -> Result<Self, AnimationError> {
        NonZeroU64::new(millis)
            .map(TickDelay)
            .ok_or(AnimationError::ZeroDelay)
    }

    pub fn as_millis(self) -> u64 {
        self.0.get()
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0.get())
    }
}

impl TryFrom<Duration> for TickDelay {
    type Error = AnimationError;

    fn try_from(value: Duration) -> Result<Self, Self::Error> {
        TickDelay::from_millis(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }
}

/// Source of single-shot timers.
pub trait TimerService {
    /// Arrange for a timer to fire once after `delay`.
    fn schedule(&mut self, delay: TickDelay) -> TimerHandle;

    /// Cancel a pending timer. Returns `false` if the handle already fired,
    /// was already cancelled, or was never issued by this service.
    fn cancel(&mut self, handle: TimerHandle) -> bool;

    /// Whether `handle` is still waiting to fire. A handle cancelled by
    /// someone else reads as not pending.
    fn is_pending(&self, handle: TimerHandle) -> bool;
}

/// Deterministic timer service driven by explicit clock advances.
///
/// Timers due at the same instant fire in the order they were scheduled.
#[derive(Debug, Clone)]
pub struct TimerQueue<K> {
    now: u64,
    next_id: u64,
    queue: BTreeMap<(u64, u64), K>,
    due: FxHashMap<u64, u64>,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> TimerQueue<K> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_id: 1,
            queue: BTreeMap::new(),
            due: FxHashMap::default(),
        }
    }

    /// Move the clock forward to `target` without firing anything. A
    /// `target` in the past leaves the clock where it is.
    pub fn move_clock_to(&mut self, target: u64) {
        self.now = self.now.max(target);
    }

    /// Current clock value in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.due.contains_key(&handle.0)
    }

    /// Due time of the earliest pending timer.
    pub fn next_due(&self) -> Option<u64> {
        self.queue.keys().next().map(|&(due, _)| due)
    }

    pub fn schedule_for(&mut self, owner: K, delay: TickDelay) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        let due = self.now.saturating_add(delay.as_millis());
        self.queue.insert((due, id), owner);
        self.due.insert(id, due);
        TimerHandle(id)
    }

    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.due.remove(&handle.0) {
            Some(due) => self.queue.remove(&(due, handle.0)).is_some(),
            None => false,
        }
    }

    /// Remove every timer belonging to `owner`.
    pub fn cancel_owned_by(&mut self, owner: &K) -> usize
    where
        K: PartialEq,
    {
        let stale: Vec<(u64, u64)> = self
            .queue
            .iter()
            .filter(|(_, k)| *k == owner)
            .map(|(key, _)| *key)
            .collect();
        for key in &stale {
            self.queue.remove(key);
            self.due.remove(&key.1);
        }
        stale.len()
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, until: u64) -> Option<(TimerHandle, K)> {
        let &(due, id) = self.queue.keys().next()?;
        if due > until {
            return None;
        }
        let owner = self.queue.remove(&(due, id))?;
        self.due.remove(&id);
        self.now = self.now.max(due);
        Some((TimerHandle(id), owner))
    }

    /// Fire every timer due up to `target`, one at a time and in order, then
    /// leave the clock at `target`. `fire` may schedule further timers; those
    /// fire in the same call if they fall due before `target`.
    ///
    /// Returns the number of timers fired. A `target` in the past fires
    /// nothing and leaves the clock where it is.
    pub fn advance_to(
        &mut self,
        target: u64,
        mut fire: impl FnMut(&mut Self, TimerHandle, K),
    ) -> usize {
        let mut fired = 0;
        while let Some((handle, owner)) = self.pop_due(target) {
            fire(self, handle, owner);
            fired += 1;
        }
        self.move_clock_to(target);
        fired
    }

    pub fn advance_by(
        &mut self,
        millis: u64,
        fire: impl FnMut(&mut Self, TimerHandle, K),
    ) -> usize {
        let target = self.now.saturating_add(millis);
        self.advance_to(target, fire)
    }

    /// View of this queue that tags every scheduled timer with `owner`.
    pub fn bind(&mut self, owner: K) -> BoundTimers<'_, K> {
        BoundTimers { queue: self, owner }
    }
}

impl TimerService for TimerQueue<()> {
    fn schedule(&mut self, delay: TickDelay) -> TimerHandle {
        self.schedule_for((), delay)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        TimerQueue::cancel(self, handle)
    }

    fn is_pending(&self, handle: TimerHandle) -> bool {
        TimerQueue::is_pending(self, handle)
    }
}

/// [`TimerService`] over a shared [`TimerQueue`] for a single owner.
pub struct BoundTimers<'a, K> {
    queue: &'a mut TimerQueue<K>,
    owner: K,
}

impl<K: Clone> TimerService for BoundTimers<'_, K> {
    fn schedule(&mut self, delay: TickDelay) -> TimerHandle {
        self.queue.schedule_for(self.owner.clone(), delay)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.queue.cancel(handle)
    }

    fn is_pending(&self, handle: TimerHandle) -> bool {
        self.queue.is_pending(handle)
    }
}

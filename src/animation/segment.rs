//! Animation configuration tree.
//!
//! An [`AnimationSegment`] is one node of the tree: a [`FrameSequence`], a
//! [`RepeatCount`] and an optional successor. Segments live in a
//! [`SegmentTable`] and refer to each other by [`SegmentId`], so a chain may
//! loop back onto an earlier segment:
//!
//! ```ignore
//! let mut builder = SegmentTable::builder();
//! let death = builder.reserve();
//! let resurrect = builder.insert(AnimationSegment::new(resurrect_frames).with_successor(death));
//! builder.define(death, AnimationSegment::new(death_frames).with_successor(resurrect))?;
//! let table = builder.build()?;
//! ```
//!
//! Tables are immutable once built. Cycles are never checked or traversed
//! here; the scheduler only ever follows one successor link at a time.

use std::fmt;
use std::num::NonZeroU32;
use std::ops::Index;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::AnimationError;

/// Non-empty, immutable sequence of frame identifiers.
///
/// Clones share the same storage.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct FrameSequence<F> {
    frames: Arc<[F]>,
}

impl<F> Clone for FrameSequence<F> {
    fn clone(&self) -> Self {
        Self {
            frames: Arc::clone(&self.frames),
        }
    }
}

impl<F> FrameSequence<F> {
    pub fn new(frames: Vec<F>) -> Result<Self, AnimationError> {
        if frames.is_empty() {
            return Err(AnimationError::EmptyFrameSequence);
        }
        Ok(Self {
            frames: frames.into(),
        })
    }

    /// Number of frames, always at least one.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn get(&self, index: usize) -> Option<&F> {
        self.frames.get(index)
    }

    pub fn first(&self) -> &F {
        &self.frames[0]
    }

    pub fn last_index(&self) -> usize {
        self.frames.len() - 1
    }

    pub fn iter(&self) -> std::slice::Iter<'_, F> {
        self.frames.iter()
    }

    pub fn as_slice(&self) -> &[F] {
        &self.frames
    }
}

impl<F> Index<usize> for FrameSequence<F> {
    type Output = F;

    fn index(&self, index: usize) -> &F {
        &self.frames[index]
    }
}

/// How many full passes a segment plays before its successor is considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatCount {
    Times(NonZeroU32),
    /// Loop forever; the successor is never reached.
    Infinite,
}

impl RepeatCount {
    pub const ONCE: RepeatCount = RepeatCount::Times(NonZeroU32::MIN);

    pub fn times(count: u32) -> Result<Self, AnimationError> {
        NonZeroU32::new(count)
            .map(RepeatCount::Times)
            .ok_or(AnimationError::ZeroRepeat)
    }

    pub fn is_infinite(self) -> bool {
        matches!(self, RepeatCount::Infinite)
    }

    /// Count left after one more pass has been started, or `None` when this
    /// was the last one.
    pub fn decremented(self) -> Option<Self> {
        match self {
            RepeatCount::Infinite => Some(RepeatCount::Infinite),
            RepeatCount::Times(n) => NonZeroU32::new(n.get() - 1).map(RepeatCount::Times),
        }
    }
}

impl Default for RepeatCount {
    fn default() -> Self {
        RepeatCount::ONCE
    }
}

impl fmt::Display for RepeatCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepeatCount::Times(n) => write!(f, "{n}"),
            RepeatCount::Infinite => f.write_str("infinite"),
        }
    }
}

/// Index of a segment inside its [`SegmentTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(u32);

impl SegmentId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One node of the configuration tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationSegment<F> {
    frames: FrameSequence<F>,
    repeat: Option<RepeatCount>,
    successor: Option<SegmentId>,
}

impl<F> AnimationSegment<F> {
    /// Play `frames` once, with no successor.
    pub fn new(frames: FrameSequence<F>) -> Self {
        Self {
            frames,
            repeat: None,
            successor: None,
        }
    }

    pub fn with_repeat(mut self, repeat: RepeatCount) -> Self {
        self.repeat = Some(repeat);
        self
    }

    pub fn with_successor(mut self, successor: SegmentId) -> Self {
        self.successor = Some(successor);
        self
    }

    pub fn frames(&self) -> &FrameSequence<F> {
        &self.frames
    }

    /// Repeat count as configured; `None` means play once.
    pub fn repeat(&self) -> Option<RepeatCount> {
        self.repeat
    }

    /// Repeat count with the play-once default applied.
    pub fn repeat_or_default(&self) -> RepeatCount {
        self.repeat.unwrap_or_default()
    }

    pub fn successor(&self) -> Option<SegmentId> {
        self.successor
    }
}

/// Caller-owned arena of segments.
#[derive(Debug, Clone)]
pub struct SegmentTable<F> {
    segments: Vec<AnimationSegment<F>>,
    names: FxHashMap<String, SegmentId>,
}

impl<F> SegmentTable<F> {
    pub fn builder() -> SegmentTableBuilder<F> {
        SegmentTableBuilder::new()
    }

    pub fn get(&self, id: SegmentId) -> Option<&AnimationSegment<F>> {
        self.segments.get(id.index())
    }

    pub fn contains(&self, id: SegmentId) -> bool {
        id.index() < self.segments.len()
    }

    /// Look up a segment id by the name it was registered under.
    pub fn lookup(&self, name: &str) -> Option<SegmentId> {
        self.names.get(name).copied()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SegmentId, &AnimationSegment<F>)> {
        self.segments
            .iter()
            .enumerate()
            .map(|(i, segment)| (SegmentId(i as u32), segment))
    }
}

/// Builds a [`SegmentTable`], allowing forward references through
/// [`reserve`](Self::reserve) so segments can form cycles.
#[derive(Debug)]
pub struct SegmentTableBuilder<F> {
    slots: Vec<Option<AnimationSegment<F>>>,
    names: FxHashMap<String, SegmentId>,
}

impl<F> Default for SegmentTableBuilder<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> SegmentTableBuilder<F> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            names: FxHashMap::default(),
        }
    }

    /// Hand out an id whose segment will be supplied later with
    /// [`define`](Self::define).
    pub fn reserve(&mut self) -> SegmentId {
        let id = SegmentId(self.slots.len() as u32);
        self.slots.push(None);
        id
    }

    pub fn insert(&mut self, segment: AnimationSegment<F>) -> SegmentId {
        let id = SegmentId(self.slots.len() as u32);
        self.slots.push(Some(segment));
        id
    }

    /// Fill (or replace) the segment stored under `id`.
    pub fn define(
        &mut self,
        id: SegmentId,
        segment: AnimationSegment<F>,
    ) -> Result<(), AnimationError> {
        let slot = self
            .slots
            .get_mut(id.index())
            .ok_or(AnimationError::UnknownSegment(id))?;
        *slot = Some(segment);
        Ok(())
    }

    /// Register `name` for `id`.
    pub fn name(&mut self, name: impl Into<String>, id: SegmentId) -> Result<(), AnimationError> {
        let name = name.into();
        if id.index() >= self.slots.len() {
            return Err(AnimationError::UnknownSegment(id));
        }
        if self.names.contains_key(&name) {
            return Err(AnimationError::DuplicateName(name));
        }
        self.names.insert(name, id);
        Ok(())
    }

    pub fn insert_named(
        &mut self,
        name: impl Into<String>,
        segment: AnimationSegment<F>,
    ) -> Result<SegmentId, AnimationError> {
        let id = self.insert(segment);
        self.name(name, id)?;
        Ok(id)
    }

    /// Finish the table. Every reserved slot must be defined and every
    /// successor must point inside the table.
    pub fn build(self) -> Result<SegmentTable<F>, AnimationError> {
        let len = self.slots.len();
        let mut segments = Vec::with_capacity(len);
        for (i, slot) in self.slots.into_iter().enumerate() {
            let segment = slot.ok_or(AnimationError::UndefinedSegment(SegmentId(i as u32)))?;
            if let Some(next) = segment.successor {
                if next.index() >= len {
                    return Err(AnimationError::UnknownSegment(next));
                }
            }
            segments.push(segment);
        }
        Ok(SegmentTable {
            segments,
            names: self.names,
        })
    }
}

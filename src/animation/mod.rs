//! Sprite animation core.
//!
//! Engine-agnostic: nothing in here depends on the ECS. The ECS side wraps a
//! [`Scheduler`] per entity in
//! [`SpriteAnimator`](crate::components::animator::SpriteAnimator).
//!
//! - [`segment`] – frame sequences, repeat counts and the segment table
//! - [`timer`] – timer handles, the [`TimerService`] seam and [`TimerQueue`]
//! - [`scheduler`] – run state and the per-tick stepping
//! - [`library`] – JSON animation libraries

pub mod library;
pub mod scheduler;
pub mod segment;
pub mod timer;

pub use library::FrameKey;
pub use scheduler::{BoundaryMode, FrameChange, Scheduler, SchedulerState};
pub use segment::{AnimationSegment, FrameSequence, RepeatCount, SegmentId, SegmentTable};
pub use timer::{TickDelay, TimerHandle, TimerQueue, TimerService};

//! Error types.
//!
//! - [`AnimationError`] – contract violations caught while building
//!   segments, delays and repeat counts, or when starting a run.
//! - [`LibraryError`] – failures loading a JSON animation library.
//! - [`SettingsError`] – failures loading the INI settings file.
//!
//! Redundant scheduler operations (pausing a paused run, resuming a finished
//! one) are never errors; they report `false` instead.

use thiserror::Error;

use crate::animation::segment::SegmentId;

/// Contract violations in the animation core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    /// A frame sequence must hold at least one frame.
    #[error("frame sequence must not be empty")]
    EmptyFrameSequence,

    /// Repeat counts are positive; use `RepeatCount::Infinite` to loop forever.
    #[error("repeat count must be positive")]
    ZeroRepeat,

    /// Tick delays are positive millisecond values.
    #[error("tick delay must be at least one millisecond")]
    ZeroDelay,

    /// The id does not address a segment of the table.
    #[error("unknown segment {0}")]
    UnknownSegment(SegmentId),

    /// A slot handed out by `SegmentTableBuilder::reserve` was never defined.
    #[error("segment {0} was reserved but never defined")]
    UndefinedSegment(SegmentId),

    /// Two segments were registered under the same name.
    #[error("duplicate segment name '{0}'")]
    DuplicateName(String),
}

/// Failures loading an animation library file.
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("failed to read animation library: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse animation library: {0}")]
    Json(#[from] serde_json::Error),

    #[error("segment '{segment}' refers to unknown sequence '{sequence}'")]
    UnknownSequence { segment: String, sequence: String },

    #[error("segment '{segment}' chains to unknown segment '{next}'")]
    UnknownNext { segment: String, next: String },

    #[error("sequence '{0}' has no frames")]
    EmptySequence(String),

    #[error("segment '{segment}' has an invalid repeat value: {value}")]
    InvalidRepeat { segment: String, value: String },

    #[error(transparent)]
    Animation(#[from] AnimationError),
}

/// Failures loading the settings file.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to load settings file: {0}")]
    Load(String),

    #[error("failed to save settings file: {0}")]
    Save(String),

    #[error("invalid value for [{section}] {key}: {value}")]
    Invalid {
        section: &'static str,
        key: &'static str,
        value: String,
    },
}

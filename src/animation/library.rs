//! JSON animation libraries.
//!
//! A library names frame sequences and the segments built from them. Segment
//! names may be used as `next` before or after they are defined, which is how
//! looping chains are written.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "sequences": {
//!     "death":     { "pattern": "witch/witch{}.svg", "from": 29, "to": 43 },
//!     "resurrect": { "pattern": "witch/witch{}.svg", "from": 43, "to": 29 },
//!     "blink":     ["eyes/open.svg", "eyes/closed.svg"]
//!   },
//!   "segments": {
//!     "dying":    { "sequence": "death", "next": "reviving" },
//!     "reviving": { "sequence": "resurrect", "next": "dying" },
//!     "blinking": { "sequence": "blink", "repeat": "infinite" }
//!   }
//! }
//! ```
//!
//! `repeat` accepts a positive integer, `-1` or `"infinite"`; when omitted
//! the segment plays once. A range with `from > to` counts down.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::animation::segment::{AnimationSegment, FrameSequence, RepeatCount, SegmentTable};
use crate::error::LibraryError;

/// Frame identifier used by libraries: a sprite asset key.
pub type FrameKey = Arc<str>;

/// Top-level library document.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct LibraryDef {
    #[serde(default)]
    pub sequences: BTreeMap<String, SequenceDef>,
    #[serde(default)]
    pub segments: BTreeMap<String, SegmentDef>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum SequenceDef {
    List(Vec<String>),
    Range(RangeDef),
}

/// Numbered frames; every `{}` in `pattern` is replaced with the number.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RangeDef {
    pub pattern: String,
    pub from: u32,
    pub to: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SegmentDef {
    pub sequence: String,
    #[serde(default)]
    pub repeat: Option<RepeatDef>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RepeatDef {
    Count(i64),
    Keyword(String),
}

impl SequenceDef {
    fn keys(&self) -> Vec<FrameKey> {
        match self {
            SequenceDef::List(frames) => {
                frames.iter().map(|f| FrameKey::from(f.as_str())).collect()
            }
            SequenceDef::Range(range) => {
                let expand = |n: u32| FrameKey::from(range.pattern.replace("{}", &n.to_string()));
                if range.from <= range.to {
                    (range.from..=range.to).map(expand).collect()
                } else {
                    (range.to..=range.from).rev().map(expand).collect()
                }
            }
        }
    }
}

impl RepeatDef {
    fn resolve(&self, segment: &str) -> Result<RepeatCount, LibraryError> {
        let invalid = || LibraryError::InvalidRepeat {
            segment: segment.to_string(),
            value: match self {
                RepeatDef::Count(n) => n.to_string(),
                RepeatDef::Keyword(k) => k.clone(),
            },
        };
        match self {
            RepeatDef::Count(-1) => Ok(RepeatCount::Infinite),
            RepeatDef::Count(n) => u32::try_from(*n)
                .ok()
                .and_then(|n| RepeatCount::times(n).ok())
                .ok_or_else(invalid),
            RepeatDef::Keyword(k) if k.eq_ignore_ascii_case("infinite") => {
                Ok(RepeatCount::Infinite)
            }
            RepeatDef::Keyword(_) => Err(invalid()),
        }
    }
}

impl LibraryDef {
    pub fn from_json(text: &str) -> Result<Self, LibraryError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Resolve names and build the segment table. Every segment is registered
    /// under its name.
    pub fn build(&self) -> Result<SegmentTable<FrameKey>, LibraryError> {
        let mut sequences = BTreeMap::new();
        for (name, def) in &self.sequences {
            let frames = FrameSequence::new(def.keys())
                .map_err(|_| LibraryError::EmptySequence(name.clone()))?;
            sequences.insert(name.as_str(), frames);
        }

        let mut builder = SegmentTable::builder();
        let mut ids = BTreeMap::new();
        for name in self.segments.keys() {
            let id = builder.reserve();
            builder.name(name.clone(), id)?;
            ids.insert(name.as_str(), id);
        }

        for (name, def) in &self.segments {
            let frames = sequences
                .get(def.sequence.as_str())
                .cloned()
                .ok_or_else(|| LibraryError::UnknownSequence {
                    segment: name.clone(),
                    sequence: def.sequence.clone(),
                })?;
            let mut segment = AnimationSegment::new(frames);
            if let Some(repeat) = &def.repeat {
                segment = segment.with_repeat(repeat.resolve(name)?);
            }
            if let Some(next) = &def.next {
                let next_id = ids.get(next.as_str()).ok_or_else(|| LibraryError::UnknownNext {
                    segment: name.clone(),
                    next: next.clone(),
                })?;
                segment = segment.with_successor(*next_id);
            }
            builder.define(ids[name.as_str()], segment)?;
        }

        let table = builder.build()?;
        debug!(
            "Built animation library: {} sequences, {} segments",
            self.sequences.len(),
            table.len()
        );
        Ok(table)
    }
}

/// The bundled witch character library.
pub const WITCH_LIBRARY: &str = include_str!("../../assets/animations/witch.json");

pub fn witch_library() -> Result<SegmentTable<FrameKey>, LibraryError> {
    LibraryDef::from_json(WITCH_LIBRARY)?.build()
}

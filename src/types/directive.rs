//! Directives emitted by the core for the host to execute

use serde::{Deserialize, Serialize};

/// Named audio cues.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CueKind {
    /// Looping background track, playing whenever nothing else is.
    Ambient,
    /// Track covering the post-choice rebuild sequence.
    Rebuild,
}

/// A single instruction for the host, executed in emission order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "args")]
pub enum Directive {
    /// Animate opacity to the given value over the given duration, then
    /// report back with `Event::FadeFinished`.
    FadeTo { opacity: f32, duration_ms: u64 },
    /// Start one illustration fetch, then report back with
    /// `Event::FetchResolved`.
    FetchIllustration { prompt: String },
    /// Start a cue. Starting the rebuild cue pauses ambient.
    PlayCue { cue: CueKind },
    /// Stop a cue. Stopping the rebuild cue resumes ambient.
    StopCue { cue: CueKind },
}

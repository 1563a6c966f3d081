//! Events fed into the sequencing core

use serde::{Deserialize, Serialize};

use crate::types::state::Illustration;

/// Inputs to the story screen: user interaction plus completions reported
/// back by the host (animation driver, fetcher).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    /// The screen mounted: start the ambient cue and the initial fetch.
    Mount,
    /// User tapped "Next".
    Next,
    /// User tapped the policy button at `index` on the current slide.
    ChoosePolicy { index: usize },
    /// User tapped "Refresh Image".
    Refresh,
    /// The host finished the most recently requested fade.
    FadeFinished,
    /// One fetch attempt completed, success or failure.
    FetchResolved { outcome: FetchOutcome },
}

/// Terminal result of one fetch attempt, with its wall-clock duration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum FetchOutcome {
    Fetched {
        illustration: Illustration,
        elapsed_secs: f64,
    },
    Failed {
        elapsed_secs: f64,
    },
}

impl FetchOutcome {
    pub fn elapsed_secs(&self) -> f64 {
        match self {
            Self::Fetched { elapsed_secs, .. } | Self::Failed { elapsed_secs } => *elapsed_secs,
        }
    }
}

//! Screen state and choreography phase

use serde::{Deserialize, Serialize};

/// A fetched illustration, encoded as a data URI any front end can render.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Illustration {
    pub data_uri: String,
}

impl Illustration {
    /// Wrap raw PNG bytes as a `data:` URI.
    pub fn from_png_bytes(bytes: &[u8]) -> Self {
        use base64::{Engine as _, engine::general_purpose::STANDARD};
        Self {
            data_uri: format!("data:image/png;base64,{}", STANDARD.encode(bytes)),
        }
    }
}

/// What a finished fade-out leads into.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AfterFade {
    /// Advance to the target slide. The target travels in the phase so the
    /// fade-in duration is read from the deck at emission time, never from
    /// a stale captured index.
    Advance { target: usize },
    /// Reset to the first slide and rebuild: cue, fetch, fade back in.
    Rebuild,
}

/// Position within a running choreography.
///
/// User events that do not apply to the current phase are ignored, which is
/// what makes re-entrant taps harmless.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub enum Phase {
    #[default]
    Idle,
    FadingOut {
        then: AfterFade,
    },
    Fetching {
        rebuild: bool,
    },
    FadingIn {
        rebuild: bool,
    },
}

/// Mutable state owned by the story screen. Discarded on unmount; nothing
/// is persisted across launches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ScreenState {
    /// Index of the slide currently shown.
    pub slide: usize,
    /// Most recently fetched illustration, if any fetch has succeeded.
    pub illustration: Option<Illustration>,
    /// True from the moment a fetch (or a policy rebuild) starts until no
    /// fetch remains outstanding.
    pub loading: bool,
    /// Number of fetches currently in flight. Overlapping refreshes are
    /// allowed; the last completion wins the displayed illustration.
    pub fetches_in_flight: usize,
    /// Elapsed seconds of every fetch attempt, success or failure, rounded
    /// to two decimals, in completion order.
    pub latencies: Vec<f64>,
    /// Every policy the user has chosen, in selection order. Duplicates
    /// allowed.
    pub chosen_policies: Vec<String>,
    /// Choreography position.
    pub phase: Phase,
}

impl ScreenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one fetch attempt's wall-clock duration.
    pub fn record_latency(&mut self, secs: f64) {
        let clamped = secs.max(0.0);
        self.latencies.push((clamped * 100.0).round() / 100.0);
    }

    /// Latencies rendered the way the screen displays them.
    pub fn formatted_latencies(&self) -> Vec<String> {
        self.latencies.iter().map(|s| format!("{s:.2}")).collect()
    }

    pub(crate) fn begin_fetch(&mut self) {
        self.fetches_in_flight += 1;
        self.loading = true;
    }

    pub(crate) fn finish_fetch(&mut self) {
        self.fetches_in_flight = self.fetches_in_flight.saturating_sub(1);
        self.loading = self.fetches_in_flight > 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latencies_are_rounded_to_two_decimals() {
        let mut state = ScreenState::new();
        state.record_latency(1.23456);
        state.record_latency(0.999);
        assert_eq!(state.latencies, vec![1.23, 1.0]);
        assert_eq!(state.formatted_latencies(), vec!["1.23", "1.00"]);
    }

    #[test]
    fn negative_durations_are_clamped_to_zero() {
        let mut state = ScreenState::new();
        state.record_latency(-0.5);
        assert_eq!(state.latencies, vec![0.0]);
    }

    #[test]
    fn loading_tracks_outstanding_fetches() {
        let mut state = ScreenState::new();
        state.begin_fetch();
        state.begin_fetch();
        assert!(state.loading);

        state.finish_fetch();
        assert!(state.loading);

        state.finish_fetch();
        assert!(!state.loading);
        assert_eq!(state.fetches_in_flight, 0);

        // A stray completion never underflows.
        state.finish_fetch();
        assert_eq!(state.fetches_in_flight, 0);
    }

    #[test]
    fn state_round_trips_through_json() {
        let mut state = ScreenState::new();
        state.slide = 3;
        state.illustration = Some(Illustration::from_png_bytes(b"not really a png"));
        state.record_latency(2.5);
        state.chosen_policies.push("Better crop management system".into());
        state.phase = Phase::FadingIn { rebuild: true };

        let json = serde_json::to_string(&state).unwrap();
        let restored: ScreenState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, restored);
    }

    #[test]
    fn png_bytes_become_a_data_uri() {
        let illustration = Illustration::from_png_bytes(&[0x89, 0x50, 0x4e, 0x47]);
        assert!(illustration.data_uri.starts_with("data:image/png;base64,"));
    }
}

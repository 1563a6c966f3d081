//! Integration tests for the screen driver
//!
//! The screen runs against stub collaborators: a scripted illustration
//! source, a cue player that records calls, and the instant fade driver.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use storyscreen::{
    CuePlayer, Deck, FetchError, Illustration, IllustrationSource, InstantFader, StoryScreen,
    UnconfiguredSource,
};

const SCRIPT: &str = include_str!("../scripts/utopia.json");

/// Illustration source that pops pre-scripted results.
#[derive(Clone, Default)]
struct StubSource {
    results: Arc<Mutex<VecDeque<Result<Illustration, FetchError>>>>,
    calls: Arc<AtomicUsize>,
}

impl StubSource {
    fn push_success(&self, tag: &str) {
        self.results.lock().unwrap().push_back(Ok(Illustration {
            data_uri: format!("data:image/png;base64,{tag}"),
        }));
    }

    fn push_failure(&self, status: u16) {
        self.results
            .lock()
            .unwrap()
            .push_back(Err(FetchError::Api {
                status,
                message: "simulated".to_string(),
            }));
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IllustrationSource for StubSource {
    async fn fetch(&self, _prompt: &str) -> Result<Illustration, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(FetchError::Configuration(
                    "stub results exhausted".to_string(),
                ))
            })
    }
}

/// Cue player that records every call.
#[derive(Clone, Default)]
struct RecordingCues {
    calls: Arc<Mutex<Vec<&'static str>>>,
}

impl RecordingCues {
    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

impl CuePlayer for RecordingCues {
    fn play_ambient(&mut self) {
        self.calls.lock().unwrap().push("ambient");
    }
    fn start_rebuild(&mut self) {
        self.calls.lock().unwrap().push("rebuild:start");
    }
    fn stop_rebuild(&mut self) {
        self.calls.lock().unwrap().push("rebuild:stop");
    }
    fn stop_all(&mut self) {
        self.calls.lock().unwrap().push("stop_all");
    }
}

fn screen_with(source: &StubSource, cues: &RecordingCues) -> StoryScreen {
    let deck = Deck::from_json(SCRIPT).unwrap();
    StoryScreen::with_fader(
        deck,
        Box::new(source.clone()),
        Box::new(cues.clone()),
        Box::new(InstantFader),
    )
}

#[tokio::test]
async fn mount_fetches_once_and_starts_ambient() {
    let source = StubSource::default();
    source.push_success("mounted");
    let cues = RecordingCues::default();
    let mut screen = screen_with(&source, &cues);

    screen.mount().await;

    assert_eq!(source.calls(), 1);
    assert_eq!(cues.calls(), vec!["ambient"]);

    let frame = screen.frame();
    assert!(!frame.loading);
    assert!(frame.illustration.is_some());
    assert_eq!(frame.latencies.len(), 1);
    assert_eq!(frame.slide_index, 0);
}

#[tokio::test]
async fn five_nexts_end_on_the_policy_slide_and_a_sixth_stays() {
    let source = StubSource::default();
    source.push_success("mounted");
    let cues = RecordingCues::default();
    let mut screen = screen_with(&source, &cues);
    screen.mount().await;

    for _ in 0..5 {
        screen.next().await;
    }
    assert_eq!(screen.frame().slide_index, 5);
    assert!(!screen.frame().slide.policies.is_empty());

    screen.next().await;
    assert_eq!(screen.frame().slide_index, 5);
}

#[tokio::test]
async fn choosing_a_policy_logs_resets_and_refetches() {
    let source = StubSource::default();
    source.push_success("mounted");
    source.push_success("rebuilt");
    let cues = RecordingCues::default();
    let mut screen = screen_with(&source, &cues);

    screen.mount().await;
    for _ in 0..5 {
        screen.next().await;
    }

    screen.choose_policy(1).await;

    let frame = screen.frame();
    assert_eq!(
        frame.chosen_policies,
        &["Better crop management system".to_string()]
    );
    assert_eq!(frame.slide_index, 0);
    assert_eq!(source.calls(), 2);
    assert_eq!(frame.latencies.len(), 2);
    assert_eq!(cues.calls(), vec!["ambient", "rebuild:start", "rebuild:stop"]);
}

#[tokio::test]
async fn failed_fetch_keeps_the_previous_illustration() {
    let source = StubSource::default();
    source.push_success("mounted");
    source.push_failure(500);
    let cues = RecordingCues::default();
    let mut screen = screen_with(&source, &cues);

    screen.mount().await;
    let shown = screen.frame().illustration.cloned();
    assert!(shown.is_some());

    screen.refresh().await;

    let frame = screen.frame();
    assert_eq!(frame.illustration.cloned(), shown);
    assert_eq!(frame.latencies.len(), 2);
    assert!(!frame.loading);
}

#[tokio::test]
async fn policy_taps_off_the_policy_slide_are_noops() {
    let source = StubSource::default();
    source.push_success("mounted");
    let cues = RecordingCues::default();
    let mut screen = screen_with(&source, &cues);

    screen.mount().await;
    screen.choose_policy(0).await;

    let frame = screen.frame();
    assert!(frame.chosen_policies.is_empty());
    assert_eq!(source.calls(), 1);
    assert_eq!(frame.slide_index, 0);
}

#[tokio::test]
async fn unmount_releases_the_cues() {
    let source = StubSource::default();
    source.push_success("mounted");
    let cues = RecordingCues::default();
    let mut screen = screen_with(&source, &cues);

    screen.mount().await;
    screen.unmount();

    assert_eq!(cues.calls().last(), Some(&"stop_all"));
}

#[tokio::test]
async fn an_unconfigured_source_degrades_silently() {
    let deck = Deck::from_json(SCRIPT).unwrap();
    let mut screen = StoryScreen::with_fader(
        deck,
        Box::new(UnconfiguredSource),
        Box::new(RecordingCues::default()),
        Box::new(InstantFader),
    );

    screen.mount().await;

    let frame = screen.frame();
    assert!(frame.illustration.is_none());
    assert_eq!(frame.latencies.len(), 1);
    assert!(!frame.loading);

    // The slideshow itself is unaffected.
    screen.next().await;
    assert_eq!(screen.frame().slide_index, 1);
}

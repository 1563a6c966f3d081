//! Story screen driver
//!
//! `StoryScreen` plays the host role the UI toolkit filled in the original
//! screen: it runs the sequencing core, executes each emitted directive in
//! order (fades against a timer, fetches against the illustration source,
//! cues against the audio player) and feeds completion events back in
//! until the choreography settles. Each public handler is one
//! self-contained, fully awaited sequence.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::audio::CuePlayer;
use crate::fetch::IllustrationSource;
use crate::runtime;
use crate::types::{
    CueKind, Deck, Directive, Event, FetchOutcome, Illustration, ScreenState, Slide,
};

/// Drives opacity animations for the screen.
#[async_trait(?Send)]
pub trait FadeDriver {
    /// Animate to `opacity` over `duration_ms`, returning on completion.
    async fn fade(&mut self, opacity: f32, duration_ms: u64);
}

/// Fade driver backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerFader;

#[async_trait(?Send)]
impl FadeDriver for TimerFader {
    async fn fade(&mut self, _opacity: f32, duration_ms: u64) {
        tokio::time::sleep(Duration::from_millis(duration_ms)).await;
    }
}

/// Fade driver that completes immediately, for headless hosts and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantFader;

#[async_trait(?Send)]
impl FadeDriver for InstantFader {
    async fn fade(&mut self, _opacity: f32, _duration_ms: u64) {}
}

/// Render snapshot for a front end.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<'a> {
    pub slide_index: usize,
    pub slide: &'a Slide,
    pub illustration: Option<&'a Illustration>,
    pub loading: bool,
    pub opacity: f32,
    /// Latency log, already formatted to two decimals.
    pub latencies: Vec<String>,
    pub chosen_policies: &'a [String],
}

/// The interactive story screen.
pub struct StoryScreen {
    deck: Deck,
    state: ScreenState,
    source: Box<dyn IllustrationSource>,
    cues: Box<dyn CuePlayer>,
    fader: Box<dyn FadeDriver>,
    opacity: f32,
}

impl StoryScreen {
    pub fn new(deck: Deck, source: Box<dyn IllustrationSource>, cues: Box<dyn CuePlayer>) -> Self {
        Self::with_fader(deck, source, cues, Box::new(TimerFader))
    }

    pub fn with_fader(
        deck: Deck,
        source: Box<dyn IllustrationSource>,
        cues: Box<dyn CuePlayer>,
        fader: Box<dyn FadeDriver>,
    ) -> Self {
        Self {
            deck,
            state: ScreenState::new(),
            source,
            cues,
            fader,
            opacity: 1.0,
        }
    }

    /// Screen mounted: the ambient cue starts and the first fetch runs.
    pub async fn mount(&mut self) {
        self.dispatch(Event::Mount).await;
    }

    /// Advance to the next slide, fading out then in.
    pub async fn next(&mut self) {
        self.dispatch(Event::Next).await;
    }

    /// Choose the policy at `index` on the current slide.
    pub async fn choose_policy(&mut self, index: usize) {
        self.dispatch(Event::ChoosePolicy { index }).await;
    }

    /// Fetch a fresh illustration for the current prompt.
    pub async fn refresh(&mut self) {
        self.dispatch(Event::Refresh).await;
    }

    /// Stop every cue. The screen stays usable but silent.
    pub fn unmount(&mut self) {
        self.cues.stop_all();
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            slide_index: self.state.slide,
            slide: self.deck.slide(self.state.slide),
            illustration: self.state.illustration.as_ref(),
            loading: self.state.loading,
            opacity: self.opacity,
            latencies: self.state.formatted_latencies(),
            chosen_policies: &self.state.chosen_policies,
        }
    }

    async fn dispatch(&mut self, event: Event) {
        let mut pending = VecDeque::from([event]);
        while let Some(event) = pending.pop_front() {
            let (state, directives) =
                runtime::step(std::mem::take(&mut self.state), &self.deck, event);
            self.state = state;

            for directive in directives {
                if let Some(follow_up) = self.execute(directive).await {
                    pending.push_back(follow_up);
                }
            }
        }
    }

    async fn execute(&mut self, directive: Directive) -> Option<Event> {
        match directive {
            Directive::FadeTo {
                opacity,
                duration_ms,
            } => {
                self.fader.fade(opacity, duration_ms).await;
                self.opacity = opacity;
                Some(Event::FadeFinished)
            }
            Directive::FetchIllustration { prompt } => {
                let started = Instant::now();
                let outcome = match self.source.fetch(&prompt).await {
                    Ok(illustration) => FetchOutcome::Fetched {
                        illustration,
                        elapsed_secs: started.elapsed().as_secs_f64(),
                    },
                    Err(err) => {
                        log::error!("illustration fetch failed: {err}");
                        FetchOutcome::Failed {
                            elapsed_secs: started.elapsed().as_secs_f64(),
                        }
                    }
                };
                Some(Event::FetchResolved { outcome })
            }
            Directive::PlayCue { cue } => {
                match cue {
                    CueKind::Ambient => self.cues.play_ambient(),
                    CueKind::Rebuild => self.cues.start_rebuild(),
                }
                None
            }
            Directive::StopCue { cue } => {
                match cue {
                    CueKind::Ambient => self.cues.stop_all(),
                    CueKind::Rebuild => self.cues.stop_rebuild(),
                }
                None
            }
        }
    }
}

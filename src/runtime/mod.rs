//! Sequencing core for the story screen
//!
//! `step` consumes one event and returns the updated state plus the
//! directives the host must execute in order. Every choreography rule
//! lives here; the function performs no I/O and reads no clocks, so the
//! whole slideshow can be driven and tested deterministically.

use crate::types::{
    directive::{CueKind, Directive},
    event::{Event, FetchOutcome},
    slide::Deck,
    state::{AfterFade, Phase, ScreenState},
};


/// Fade-out duration for every transition, in milliseconds.
pub const TRANSITION_FADE_MS: u64 = 500;

/// Advance the screen by one event.
pub fn step(mut state: ScreenState, deck: &Deck, event: Event) -> (ScreenState, Vec<Directive>) {
    let mut directives = Vec::new();

    match event {
        Event::Mount => {
            directives.push(Directive::PlayCue {
                cue: CueKind::Ambient,
            });
            push_fetch(&mut state, deck, &mut directives);
        }
        Event::Next => on_next(&mut state, deck, &mut directives),
        Event::ChoosePolicy { index } => on_choose_policy(&mut state, deck, index, &mut directives),
        Event::Refresh => push_fetch(&mut state, deck, &mut directives),
        Event::FadeFinished => on_fade_finished(&mut state, deck, &mut directives),
        Event::FetchResolved { outcome } => on_fetch_resolved(&mut state, outcome, &mut directives),
    }

    (state, directives)
}

fn on_next(state: &mut ScreenState, deck: &Deck, directives: &mut Vec<Directive>) {
    if state.phase != Phase::Idle {
        log::debug!("ignoring Next during a running transition");
        return;
    }
    // Terminal slide: advancing is a no-op.
    if state.slide >= deck.last_index() {
        return;
    }

    let target = state.slide + 1;
    state.phase = Phase::FadingOut {
        then: AfterFade::Advance { target },
    };
    directives.push(fade_out());
}

fn on_choose_policy(
    state: &mut ScreenState,
    deck: &Deck,
    index: usize,
    directives: &mut Vec<Directive>,
) {
    if state.phase != Phase::Idle {
        log::debug!("ignoring policy choice during a running transition");
        return;
    }

    let Some(policy) = deck
        .get(state.slide)
        .and_then(|slide| slide.policies.get(index))
    else {
        log::debug!("no policy {index} on slide {}", state.slide);
        return;
    };

    state.chosen_policies.push(policy.clone());
    state.loading = true;
    state.phase = Phase::FadingOut {
        then: AfterFade::Rebuild,
    };
    directives.push(fade_out());
}

fn on_fade_finished(state: &mut ScreenState, deck: &Deck, directives: &mut Vec<Directive>) {
    match std::mem::take(&mut state.phase) {
        Phase::FadingOut {
            then: AfterFade::Advance { target },
        } => {
            state.slide = target.min(deck.last_index());
            let fade_ms = deck.slide(state.slide).fade_ms;
            state.phase = Phase::FadingIn { rebuild: false };
            directives.push(Directive::FadeTo {
                opacity: 1.0,
                duration_ms: fade_ms,
            });
        }
        Phase::FadingOut {
            then: AfterFade::Rebuild,
        } => {
            state.slide = 0;
            state.phase = Phase::Fetching { rebuild: true };
            directives.push(Directive::PlayCue {
                cue: CueKind::Rebuild,
            });
            push_fetch(state, deck, directives);
        }
        Phase::FadingIn { rebuild } => {
            state.phase = Phase::Idle;
            if rebuild {
                directives.push(Directive::StopCue {
                    cue: CueKind::Rebuild,
                });
            }
        }
        other => {
            log::debug!("stray FadeFinished in phase {other:?}");
            state.phase = other;
        }
    }
}

fn on_fetch_resolved(
    state: &mut ScreenState,
    outcome: FetchOutcome,
    directives: &mut Vec<Directive>,
) {
    // Success or failure, the attempt is logged and the loading flag is
    // recomputed; a failed fetch keeps the previous illustration on screen.
    state.record_latency(outcome.elapsed_secs());
    if let FetchOutcome::Fetched { illustration, .. } = outcome {
        state.illustration = Some(illustration);
    }
    state.finish_fetch();

    if let Phase::Fetching { rebuild } = state.phase {
        state.phase = Phase::FadingIn { rebuild };
        directives.push(Directive::FadeTo {
            opacity: 1.0,
            duration_ms: TRANSITION_FADE_MS,
        });
    }
}

fn push_fetch(state: &mut ScreenState, deck: &Deck, directives: &mut Vec<Directive>) {
    state.begin_fetch();
    directives.push(Directive::FetchIllustration {
        prompt: deck.prompt().to_string(),
    });
}

fn fade_out() -> Directive {
    Directive::FadeTo {
        opacity: 0.0,
        duration_ms: TRANSITION_FADE_MS,
    }
}

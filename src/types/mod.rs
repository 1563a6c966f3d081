//! Core data types for the story screen

pub mod directive;
pub mod event;
pub mod slide;
pub mod state;

pub use directive::{CueKind, Directive};
pub use event::{Event, FetchOutcome};
pub use slide::{DEFAULT_FADE_MS, DEFAULT_PROMPT, Deck, DeckError, Slide};
pub use state::{AfterFade, Illustration, Phase, ScreenState};

//! # storyscreen
//!
//! An interactive story screen: a scripted slideshow that narrates a short
//! story, fetches an AI-generated illustration from an image API, fades
//! between slides, lets the user pick a policy on the final slide and
//! plays background/rebuild audio cues.
//!
//! The crate splits the screen the same way its host toolkits do: a pure
//! sequencing core ([`runtime::step`]) that consumes [`Event`]s and emits
//! [`Directive`]s, and a driver ([`StoryScreen`]) that executes those
//! directives against real collaborators (HTTP fetcher, audio player,
//! timer) and feeds completion events back in.
//!
//! ## Quick start
//!
//! ```rust
//! use storyscreen::{Deck, Directive, Event, Slide, runtime};
//!
//! # fn main() -> Result<(), storyscreen::DeckError> {
//! let deck = Deck::new(vec![
//!     Slide::new("Utopia", "Intro", "We built it!", 500),
//!     Slide::new("Choices", "", "What next?", 500)
//!         .with_policies(["Better crop management system"]),
//! ])?;
//!
//! // The core is pure: feed it events, execute the directives it returns.
//! let (state, directives) = runtime::step(Default::default(), &deck, Event::Next);
//! assert!(matches!(
//!     directives[0],
//!     Directive::FadeTo { opacity, duration_ms: 500 } if opacity == 0.0
//! ));
//!
//! // The host reports the fade completion; the core advances the slide.
//! let (state, _) = runtime::step(state, &deck, Event::FadeFinished);
//! assert_eq!(state.slide, 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Driving the full screen
//!
//! ```rust
//! use storyscreen::{Deck, NullCuePlayer, Slide, StoryScreen, UnconfiguredSource};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! let deck = Deck::new(vec![Slide::new("Utopia", "Intro", "We built it!", 500)])?;
//! let mut screen = StoryScreen::new(
//!     deck,
//!     Box::new(UnconfiguredSource),
//!     Box::new(NullCuePlayer),
//! );
//!
//! // Mount fires the initial fetch; without credentials it fails silently
//! // and the screen keeps running without an illustration.
//! screen.mount().await;
//! assert_eq!(screen.frame().latencies.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod audio;
pub mod cli;
pub mod fetch;
pub mod runtime;
pub mod screen;
pub mod types;

pub use audio::{CueAssets, CuePlayer, NullCuePlayer, RodioCuePlayer};
pub use fetch::{
    FetchError, IllustrationSource, UnconfiguredSource, WorkersAiClient, WorkersAiConfig,
};
pub use screen::{FadeDriver, Frame, InstantFader, StoryScreen, TimerFader};
pub use types::{
    AfterFade, CueKind, Deck, DeckError, Directive, Event, FetchOutcome, Illustration, Phase,
    ScreenState, Slide,
};

//! Slide and deck definitions - the fixed story script

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fade-in duration applied when a slide does not configure its own.
pub const DEFAULT_FADE_MS: u64 = 500;

/// Prompt sent to the image API when the script does not override it.
pub const DEFAULT_PROMPT: &str = "bit graphic for an icon for food policy";

/// One step of the narrative script.
///
/// Slides are immutable and have no identity beyond their position in the
/// deck.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Slide {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub body: String,
    /// Fade-in duration in milliseconds when this slide becomes visible.
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,
    /// Policy choices this slide offers. Only the final slide of a deck may
    /// carry any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub policies: Vec<String>,
}

fn default_fade_ms() -> u64 {
    DEFAULT_FADE_MS
}

impl Slide {
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        body: impl Into<String>,
        fade_ms: u64,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            body: body.into(),
            fade_ms,
            policies: Vec::new(),
        }
    }

    pub fn with_policies<I, S>(mut self, policies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.policies = policies.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_policies(&self) -> bool {
        !self.policies.is_empty()
    }
}

/// Errors raised when assembling a deck.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DeckError {
    #[error("a deck needs at least one slide")]
    Empty,

    #[error("slide {index} offers policies but is not the final slide")]
    PoliciesBeforeFinal { index: usize },
}

/// The fixed, ordered sequence of slides shown by the screen, plus the
/// prompt used for every illustration fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Deck {
    slides: Vec<Slide>,
    #[serde(default = "default_prompt")]
    illustration_prompt: String,
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

impl Deck {
    /// Build a deck from slides, validating its shape.
    pub fn new(slides: Vec<Slide>) -> Result<Self, DeckError> {
        let deck = Self {
            slides,
            illustration_prompt: default_prompt(),
        };
        deck.validate()?;
        Ok(deck)
    }

    /// Replace the illustration prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.illustration_prompt = prompt.into();
        self
    }

    /// Parse and validate a JSON script.
    pub fn from_json(src: &str) -> anyhow::Result<Self> {
        let deck: Self = serde_json::from_str(src)?;
        deck.validate()?;
        Ok(deck)
    }

    fn validate(&self) -> Result<(), DeckError> {
        if self.slides.is_empty() {
            return Err(DeckError::Empty);
        }
        for (index, slide) in self.slides[..self.slides.len() - 1].iter().enumerate() {
            if slide.has_policies() {
                return Err(DeckError::PoliciesBeforeFinal { index });
            }
        }
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// Slide at `index`, clamped to the final slide. A deck is never empty.
    pub fn slide(&self, index: usize) -> &Slide {
        &self.slides[index.min(self.last_index())]
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.slides.len().saturating_sub(1)
    }

    pub fn prompt(&self) -> &str {
        &self.illustration_prompt
    }
}

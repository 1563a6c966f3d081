//! Interactive player mode
//!
//! Renders the current frame to the terminal and maps input to screen
//! handlers: Enter advances, digits choose a policy on the final slide,
//! `r` refreshes the illustration, `q` quits.

use std::io::{self, Write};
use std::path::PathBuf;

use crate::audio::{CueAssets, CuePlayer, NullCuePlayer, RodioCuePlayer};
use crate::fetch::{IllustrationSource, UnconfiguredSource, WorkersAiClient, WorkersAiConfig};
use crate::screen::StoryScreen;
use crate::types::Deck;

/// Options for a player session.
#[derive(Debug, Clone, Default)]
pub struct PlayOptions {
    /// Print the raw screen state after every frame.
    pub debug: bool,
    /// Directory holding the ambient and rebuild tracks.
    pub audio_dir: Option<PathBuf>,
}

/// Run the player until the user quits.
pub async fn run_play(deck: Deck, options: PlayOptions) -> anyhow::Result<()> {
    let source: Box<dyn IllustrationSource> = match WorkersAiConfig::from_env() {
        Ok(config) => Box::new(WorkersAiClient::new(config)),
        Err(err) => {
            eprintln!("note: {err}; the screen runs without illustrations");
            Box::new(UnconfiguredSource)
        }
    };

    let cues: Box<dyn CuePlayer> = match &options.audio_dir {
        Some(dir) => match CueAssets::locate(dir).and_then(RodioCuePlayer::new) {
            Some(player) => Box::new(player),
            None => {
                eprintln!("note: audio unavailable, continuing silently");
                Box::new(NullCuePlayer)
            }
        },
        None => Box::new(NullCuePlayer),
    };

    let mut screen = StoryScreen::new(deck, source, cues);

    println!("=== storyscreen player ===");
    println!();
    println!("Controls:");
    println!("  Enter: next slide");
    println!("  1-9:   choose a policy (final slide)");
    println!("  r:     refresh the illustration");
    println!("  q:     quit");
    println!();

    screen.mount().await;

    loop {
        render(&screen, options.debug);

        let input = read_input()?;
        match input.as_str() {
            "q" => break,
            "r" => screen.refresh().await,
            "" => screen.next().await,
            other => match other.parse::<usize>() {
                Ok(n) if (1..=9).contains(&n) => screen.choose_policy(n - 1).await,
                _ => println!("Press Enter, a policy number, 'r', or 'q'."),
            },
        }
    }

    screen.unmount();
    println!("Goodbye!");
    Ok(())
}

fn render(screen: &StoryScreen, debug: bool) {
    let frame = screen.frame();

    println!();
    println!("== {} ==", frame.slide.title);
    if !frame.slide.subtitle.is_empty() {
        println!("-- {} --", frame.slide.subtitle);
    }
    println!("{}", frame.slide.body);
    println!();

    match (frame.loading, frame.illustration) {
        (true, _) => println!("[illustration: loading...]"),
        (false, Some(illustration)) => println!(
            "[illustration: data URI, {} bytes]",
            illustration.data_uri.len()
        ),
        (false, None) => println!("[illustration: none]"),
    }

    if !frame.latencies.is_empty() {
        println!("API response times (s): {}", frame.latencies.join(", "));
    }
    if !frame.chosen_policies.is_empty() {
        println!("Chosen policies: {}", frame.chosen_policies.join("; "));
    }

    if !frame.slide.policies.is_empty() {
        println!();
        println!("--- Policies ---");
        for (i, policy) in frame.slide.policies.iter().enumerate() {
            println!("{}. {}", i + 1, policy);
        }
    }

    if debug {
        let state = serde_json::to_string(screen.state()).unwrap_or_else(|_| "{}".to_string());
        println!("[debug] {state}");
    }
}

fn read_input() -> io::Result<String> {
    print!("> ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

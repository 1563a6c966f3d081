//! Headless walkthrough of the built-in story.
//!
//! Runs the screen with no network, no audio and instant fades, advances
//! to the policy slide, chooses a policy and prints each frame.
//!
//! ```bash
//! cargo run --example policy_walkthrough
//! ```

use storyscreen::{Deck, InstantFader, NullCuePlayer, StoryScreen, UnconfiguredSource};

const SCRIPT: &str = include_str!("../scripts/utopia.json");

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let deck = Deck::from_json(SCRIPT)?;
    let last = deck.last_index();

    let mut screen = StoryScreen::with_fader(
        deck,
        Box::new(UnconfiguredSource),
        Box::new(NullCuePlayer),
        Box::new(InstantFader),
    );

    screen.mount().await;
    print_frame(&screen);

    for _ in 0..last {
        screen.next().await;
        print_frame(&screen);
    }

    println!(">>> choosing policy 2");
    screen.choose_policy(1).await;
    print_frame(&screen);

    screen.unmount();
    Ok(())
}

fn print_frame(screen: &StoryScreen) {
    let frame = screen.frame();
    println!(
        "[slide {}] {} / {}",
        frame.slide_index, frame.slide.title, frame.slide.subtitle
    );
    println!("  {}", frame.slide.body);
    if !frame.latencies.is_empty() {
        println!("  response times (s): {}", frame.latencies.join(", "));
    }
    if !frame.chosen_policies.is_empty() {
        println!("  chosen: {}", frame.chosen_policies.join("; "));
    }
}

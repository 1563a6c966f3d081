//! CLI entry point for storyscreen

use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context as _;
use storyscreen::cli::play::{PlayOptions, run_play};
use storyscreen::types::Deck;

const BUILTIN_SCRIPT: &str = include_str!("../scripts/utopia.json");

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "play" => {
            let mut script: Option<PathBuf> = None;
            let mut options = PlayOptions::default();

            let mut rest = args[2..].iter();
            while let Some(arg) = rest.next() {
                match arg.as_str() {
                    "--debug" => options.debug = true,
                    "--audio" => match rest.next() {
                        Some(dir) => options.audio_dir = Some(PathBuf::from(dir)),
                        None => {
                            eprintln!("Error: --audio needs a directory");
                            process::exit(1);
                        }
                    },
                    other if script.is_none() && !other.starts_with('-') => {
                        script = Some(PathBuf::from(other));
                    }
                    other => {
                        eprintln!("Error: unexpected argument '{other}'");
                        eprintln!();
                        print_usage();
                        process::exit(1);
                    }
                }
            }

            run(script, options);
        }
        "--help" | "-h" => {
            print_usage();
        }
        other => {
            eprintln!("Error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    println!("storyscreen - interactive story screen player");
    println!();
    println!("USAGE:");
    println!("    cargo run -- play [script.json] [--debug] [--audio <dir>]");
    println!();
    println!("COMMANDS:");
    println!("    play [script.json]    Play a script (built-in story when omitted)");
    println!("    --help, -h            Show this help message");
    println!();
    println!("OPTIONS:");
    println!("    --debug          Print the raw screen state after every frame");
    println!("    --audio <dir>    Play cues from the tracks in <dir>");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run -- play");
    println!("    cargo run -- play scripts/utopia.json --debug");
}

fn run(script: Option<PathBuf>, options: PlayOptions) {
    let deck = match load_deck(script.as_deref()) {
        Ok(deck) => deck,
        Err(err) => {
            eprintln!("Error: failed to load script");
            eprintln!("Reason: {err:#}");
            process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Error: failed to start the runtime");
            eprintln!("Reason: {err}");
            process::exit(1);
        }
    };

    if let Err(err) = runtime.block_on(run_play(deck, options)) {
        eprintln!("Error: player failed");
        eprintln!("Reason: {err:#}");
        process::exit(1);
    }
}

fn load_deck(script: Option<&Path>) -> anyhow::Result<Deck> {
    match script {
        Some(path) => {
            let src = std::fs::read_to_string(path)
                .with_context(|| format!("reading '{}'", path.display()))?;
            Deck::from_json(&src)
        }
        None => Deck::from_json(BUILTIN_SCRIPT),
    }
}

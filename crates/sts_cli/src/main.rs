//! sts CLI
//!
//! Run seeded matches headless and turn saved state histories into
//! episode datasets.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use sts_core::history::{
    build_dataset, flatten_episodes, load_states, save_dataset, save_states, split_episodes, subsample_episodes,
};
use sts_core::models::GameEventKind;
use sts_core::{MatchConfig, MatchEngine, Rules, TeamComposition, TeamSide};

#[derive(Parser)]
#[command(name = "sts")]
#[command(about = "Deterministic two-team stick-sport simulation", long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one match
    Run {
        /// Match seed
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Home roster, e.g. "sim:2,agg"
        #[arg(long, default_value = "sim:3")]
        home: TeamComposition,

        /// Away roster
        #[arg(long, default_value = "sim:3")]
        away: TeamComposition,

        /// Upper bound on simulated ticks
        #[arg(long, default_value_t = 10_000)]
        ticks: u64,

        /// Rules JSON file (defaults apply to missing fields)
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Persist the state history on GAME_OVER
        #[arg(long, default_value = "false")]
        save_states: bool,

        /// Dataset root directory
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Verbosity (-v phases, -vv arena drawing)
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,
    },

    /// Split a saved history into scoring episodes and resample them
    Episodes {
        /// Input STATEHISTORY.json
        #[arg(long)]
        input: PathBuf,

        /// Number of episodes to draw (all episodes when omitted)
        #[arg(long)]
        sample: Option<usize>,

        /// Sampling seed
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Write the flattened (sub)sample to this JSON file
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Export scoring episodes as object-centric obs/next_obs transitions
    Dataset {
        /// Input STATEHISTORY.json
        #[arg(long)]
        input: PathBuf,

        /// Output JSON file (defaults to dataset.json next to the input)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Run { seed, home, away, ticks, rules, save_states, root, verbose } => {
            let rules = match rules {
                Some(path) => Rules::from_json_file(&path)
                    .with_context(|| format!("failed to load rules from {}", path.display()))?,
                None => Rules::default(),
            };
            let config = MatchConfig { seed, verbosity: verbose, save_states, dataset_root: root };

            let mut players = home.players(TeamSide::Home);
            players.extend(away.players(TeamSide::Away));
            let mut engine = MatchEngine::new(players, rules, config).context("failed to build match")?;

            info!(seed, home = %home, away = %away, "starting match");
            let ran = engine.run(ticks).context("simulation failed")?;
            print_summary(&engine, ran);
        }
        Commands::Episodes { input, sample, seed, out } => {
            let states = load_states(&input).with_context(|| format!("failed to read {}", input.display()))?;
            let total = states.len();
            let episodes = split_episodes(states);
            let chosen = match sample {
                Some(count) => subsample_episodes(&episodes, count, seed),
                None => episodes.clone(),
            };
            info!(records = total, episodes = episodes.len(), sampled = chosen.len(), "episodes extracted");

            let lengths: Vec<usize> = chosen.iter().map(Vec::len).collect();
            println!("episodes: {} (selected {}), lengths {:?}", episodes.len(), chosen.len(), lengths);

            if let Some(out) = out {
                let flat = flatten_episodes(chosen);
                save_states(&out, &flat).with_context(|| format!("failed to write {}", out.display()))?;
                println!("{} records -> {}", flat.len(), out.display());
            }
        }
        Commands::Dataset { input, out } => {
            let out = out.unwrap_or_else(|| input.with_file_name("dataset.json"));
            let states = load_states(&input).with_context(|| format!("failed to read {}", input.display()))?;
            let episodes = split_episodes(states);
            let samples = build_dataset(&episodes).context("history records are incomplete")?;
            save_dataset(&out, &samples).with_context(|| format!("failed to write {}", out.display()))?;

            let transitions: usize = samples.iter().map(|s| s.obs.len()).sum();
            println!("{} episodes, {} transitions -> {}", samples.len(), transitions, out.display());
        }
    }

    Ok(())
}

fn print_summary(engine: &MatchEngine, ran: u64) {
    println!("ticks run: {ran} (match tick {})", engine.tick());
    println!(
        "score: home {} - away {}",
        engine.score(TeamSide::Home),
        engine.score(TeamSide::Away)
    );
    let events = engine.events();
    for kind in [
        GameEventKind::GainControl,
        GameEventKind::Pass,
        GameEventKind::Shot,
        GameEventKind::Check,
        GameEventKind::Goal,
    ] {
        println!("{:>14}: {}", kind.as_str(), events.count(kind));
    }
    if let Some(path) = engine.persisted_to() {
        println!("history saved to {}", path.display());
    }
}

fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

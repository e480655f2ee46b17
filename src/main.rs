use std::collections::BTreeSet;
use std::fs::{self, File};
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use sightread::app::PracticeSession;
use sightread::session::SystemClock;
use sightread::store::{FileBackend, ProfileStore};
use sightread::{App, Config, Session, Vocabulary};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sightread")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Learner profile (defaults to the configured default profile)
    #[arg(short, long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show progress for a learner
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the words a learner finds hardest
    Weak {
        /// Maximum number of words to list
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// List known learner profiles
    Profiles,
    /// Show a learner's TV minutes
    Minutes,
    /// Reset streaks for the current practice set
    ResetSet,
    /// Forget all progress for a learner
    ResetAll {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    init_logging(cli.command.is_none())?;

    let profile = cli.profile.clone().unwrap_or_else(|| config.default_profile.clone());

    match cli.command {
        Some(Commands::Stats { json }) => {
            let session = open_session(&config, &profile)?;
            let stats = session.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }

            println!("Learner:        {}", session.profile());
            if stats.has_active_set {
                println!(
                    "Practice set:   {} of {} ({}/{} mastered)",
                    stats.set_number, stats.total_sets, stats.mastered_in_set, stats.total_in_set
                );
            } else {
                println!("Practice set:   none yet");
            }
            println!(
                "Words mastered: {} of {}",
                stats.total_mastered,
                session.vocabulary().len()
            );
            println!("Words tried:    {}", stats.total_attempted);
            println!("TV minutes:     {}", session.tv_minutes());
        }
        Some(Commands::Weak { limit }) => {
            let session = open_session(&config, &profile)?;
            let weak = session.weak_words();
            if weak.is_empty() {
                println!("No reads recorded for {profile} yet");
            }
            for w in weak.iter().take(limit) {
                println!(
                    "{:<14} {:>3}/{:<3} {:>4.0}%  streak {}{}",
                    w.word,
                    w.correct,
                    w.attempts,
                    w.accuracy * 100.0,
                    w.streak,
                    if w.mastered { "  mastered" } else { "" }
                );
            }
        }
        Some(Commands::Profiles) => {
            let store = ProfileStore::new(FileBackend::in_data_dir()?);
            let mut names: BTreeSet<String> = config.profile_list().into_iter().collect();
            names.extend(store.profiles().context("Failed to list stored profiles")?);
            for name in names {
                let marker = if name == config.default_profile { "*" } else { " " };
                println!("{marker} {name}");
            }
        }
        Some(Commands::Minutes) => {
            let store = ProfileStore::new(FileBackend::in_data_dir()?);
            println!("{profile}: {} TV minutes", store.load_tv_minutes(&profile));
        }
        Some(Commands::ResetSet) => {
            let mut session = open_session(&config, &profile)?;
            if session.reset_current_set() {
                println!("Reset the current practice set for {profile}");
            } else {
                println!("{profile} has no practice set yet");
            }
        }
        Some(Commands::ResetAll { yes }) => {
            if !yes {
                bail!("This forgets all of {profile}'s progress; re-run with --yes to confirm");
            }
            let mut session = open_session(&config, &profile)?;
            session.reset_all();
            println!("Reset all progress for {profile}");
        }
        None => {
            // Launch TUI
            let session = open_session(&config, &profile)?;
            let mut app = App::new(config, session)?;
            app.run()?;
        }
    }

    Ok(())
}

fn open_session(config: &Config, profile: &str) -> Result<PracticeSession> {
    let vocabulary = Vocabulary::load(config.vocabulary_path.as_deref())?;
    let store = ProfileStore::new(FileBackend::in_data_dir()?);
    Ok(Session::open(store, profile, vocabulary, SystemClock, rand::thread_rng()))
}

/// Log to stderr for one-shot commands, or to a file while the TUI owns the
/// terminal
fn init_logging(to_file: bool) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sightread=info"));
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let path = Config::log_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {:?}", parent))?;
        }
        let file = File::options()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {:?}", path))?;
        let layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file));
        registry.with(layer).init();
    } else {
        let layer =
            tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr);
        registry.with(layer).init();
    }

    Ok(())
}

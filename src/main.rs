//! Binary entrypoint for the wordspell CLI.
//!
//! Commands:
//! - `init` - create a starter `config.toml`
//! - `play [--level N]` - play one level interactively
//! - `status` - print a progress summary
//! - `achievements` - list earned achievements
//! - `settings` - show or change player settings
//! - `export` - print the progress record as JSON
//! - `reset --yes` - overwrite progress with a fresh record
//!
//! See the library crate docs for module-level details: `wordspell::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::io::BufRead;
use std::time::Instant;

use wordspell::config::Config;
use wordspell::engine::{
    apply_completion, Difficulty, GameError, NarrativeCatalog, PlayerProgress, ProgressStore,
    PuzzleCatalog, PuzzleSession, SessionPhase, Submission,
};
use wordspell::gate::{self, DisplayMode};
use wordspell::logutil::escape_log;

#[derive(Parser)]
#[command(name = "wordspell")]
#[command(about = "A word-unscramble puzzle game with levels, narrative, and achievements")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Save slot to play on
    #[arg(short, long, default_value = "default", global = true)]
    profile: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a starter configuration file
    Init,
    /// Play one level interactively
    Play {
        /// Level to play; defaults to the current level of the profile
        #[arg(short, long)]
        level: Option<u32>,
    },
    /// Show progress for the profile
    Status,
    /// List earned achievements
    Achievements,
    /// Show or change player settings
    Settings {
        /// Preferred difficulty: easy, medium, hard, or expert
        #[arg(long)]
        difficulty: Option<String>,
        /// Enable or disable sound effects
        #[arg(long)]
        sound: Option<bool>,
        /// Enable or disable music
        #[arg(long)]
        music: Option<bool>,
        /// Enable or disable haptic feedback
        #[arg(long)]
        haptics: Option<bool>,
        /// Enable or disable notifications
        #[arg(long)]
        notifications: Option<bool>,
    },
    /// Print the progress record as JSON (diagnostics/backup)
    Export,
    /// Overwrite the profile's progress with a fresh record
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let pre_config = match cli.command {
        Commands::Init => None,
        _ => Config::load(&cli.config).await.ok(),
    };
    init_logging(&pre_config, cli.verbose);

    match cli.command {
        Commands::Init => {
            info!("Initializing wordspell configuration");
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);
        }
        Commands::Play { level } => {
            let config = config_or_defaults(pre_config, &cli.config);
            if gate::resolve(&config.gate).await == DisplayMode::Alternate {
                println!("This build is currently showing alternate content; the game is unavailable.");
                return Ok(());
            }
            let store = ProgressStore::open(&config.storage.data_dir)?;
            let mut progress = store.load_progress(&cli.profile);
            let requested = level.unwrap_or(progress.current_level);
            play_level(&store, &mut progress, &cli.profile, requested)?;
        }
        Commands::Status => {
            let config = config_or_defaults(pre_config, &cli.config);
            let store = ProgressStore::open(&config.storage.data_dir)?;
            let progress = store.load_progress(&cli.profile);
            let catalog = PuzzleCatalog::standard();
            print_status(&cli.profile, &progress, &catalog);
        }
        Commands::Achievements => {
            let config = config_or_defaults(pre_config, &cli.config);
            let store = ProgressStore::open(&config.storage.data_dir)?;
            let progress = store.load_progress(&cli.profile);
            if progress.achievements.is_empty() {
                println!("No achievements earned yet.");
            } else {
                for achievement in &progress.achievements {
                    println!(
                        "{} - {} ({})",
                        achievement.title,
                        achievement.description,
                        achievement.unlocked_at.format("%Y-%m-%d")
                    );
                }
            }
        }
        Commands::Settings {
            difficulty,
            sound,
            music,
            haptics,
            notifications,
        } => {
            let config = config_or_defaults(pre_config, &cli.config);
            let store = ProgressStore::open(&config.storage.data_dir)?;
            let mut settings = store.load_settings(&cli.profile);
            let mut changed = false;
            if let Some(ref name) = difficulty {
                settings.difficulty = parse_difficulty(name)?;
                changed = true;
            }
            if let Some(value) = sound {
                settings.sound_enabled = value;
                changed = true;
            }
            if let Some(value) = music {
                settings.music_enabled = value;
                changed = true;
            }
            if let Some(value) = haptics {
                settings.haptic_enabled = value;
                changed = true;
            }
            if let Some(value) = notifications {
                settings.notifications_enabled = value;
                changed = true;
            }
            if changed {
                if let Err(e) = store.save_settings(&cli.profile, &settings) {
                    warn!("failed to persist settings: {} (kept for this run)", e);
                }
            }
            println!(
                "sound: {}  music: {}  haptics: {}  notifications: {}  difficulty: {:?}",
                settings.sound_enabled,
                settings.music_enabled,
                settings.haptic_enabled,
                settings.notifications_enabled,
                settings.difficulty
            );
        }
        Commands::Export => {
            let config = config_or_defaults(pre_config, &cli.config);
            let store = ProgressStore::open(&config.storage.data_dir)?;
            println!("{}", store.export_progress(&cli.profile)?);
        }
        Commands::Reset { yes } => {
            if !yes {
                println!("Refusing to reset without --yes.");
                return Ok(());
            }
            let config = config_or_defaults(pre_config, &cli.config);
            let store = ProgressStore::open(&config.storage.data_dir)?;
            store.reset_progress(&cli.profile)?;
            info!("Progress for '{}' reset", cli.profile);
        }
    }

    Ok(())
}

fn config_or_defaults(pre_config: Option<Config>, path: &str) -> Config {
    match pre_config {
        Some(config) => config,
        None => {
            warn!("config file {} not found or invalid; using defaults", path);
            Config::default()
        }
    }
}

fn parse_difficulty(name: &str) -> Result<Difficulty> {
    match name.to_ascii_lowercase().as_str() {
        "easy" => Ok(Difficulty::Easy),
        "medium" => Ok(Difficulty::Medium),
        "hard" => Ok(Difficulty::Hard),
        "expert" => Ok(Difficulty::Expert),
        other => Err(anyhow::anyhow!(
            "unknown difficulty '{}'; expected easy, medium, hard, or expert",
            other
        )),
    }
}

fn print_status(profile: &str, progress: &PlayerProgress, catalog: &PuzzleCatalog) {
    println!("Profile: {}", profile);
    println!("Current level: {} of {}", progress.current_level, catalog.max_level());
    println!("Total score: {}", progress.total_score);
    println!(
        "Completed: {}  Unlocked: {}  Achievements: {}",
        progress.completed_levels.len(),
        progress.unlocked_levels.len(),
        progress.achievements.len()
    );
    if let Some(next) = progress.next_open_level() {
        if catalog.puzzle(next).is_some() {
            println!("Next open level: {}", next);
        } else {
            println!("All levels completed!");
        }
    }
}

fn play_level(
    store: &ProgressStore,
    progress: &mut PlayerProgress,
    profile: &str,
    level: u32,
) -> Result<()> {
    if !progress.is_unlocked(level) {
        println!("Level {} is still locked. Complete earlier levels first.", level);
        return Ok(());
    }

    let puzzles = PuzzleCatalog::standard();
    let beats = NarrativeCatalog::standard();
    let mut session = match PuzzleSession::start(&puzzles, &beats, level) {
        Ok(session) => session,
        Err(GameError::LevelNotFound(n)) => {
            println!("There is no level {}.", n);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    run_session(&mut session)?;

    match session.phase() {
        SessionPhase::Completed => {
            if let Some(outcome) = session.outcome().cloned() {
                let earned = apply_completion(progress, &outcome);
                println!(
                    "Level {} complete! +{} points (total {}).",
                    outcome.level, outcome.earned_points, progress.total_score
                );
                for achievement in &earned {
                    println!(
                        "Achievement unlocked: {} - {}",
                        achievement.title, achievement.description
                    );
                }
                if let Err(e) = store.save_progress(profile, progress) {
                    warn!("failed to persist progress: {} (progress kept for this run)", e);
                }
            }
        }
        SessionPhase::GameOver => {
            println!(
                "Game over. The word was {}. Try level {} again when ready.",
                session.puzzle().target_word,
                level
            );
        }
        _ => {
            info!("session for level {} abandoned", level);
        }
    }
    Ok(())
}

/// Drive one session from stdin until it ends or the player quits.
fn run_session(session: &mut PuzzleSession) -> Result<()> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    if let Some(beat) = session.beat() {
        println!();
        println!("=== {} ===", beat.title);
        if let Some(ref speaker) = beat.speaker {
            println!("[{}]", speaker);
        }
        println!("{}", beat.narrative);
        println!("Clue: {}", beat.mystery_clue);
        log::debug!("beat shown: {}", escape_log(&beat.narrative));
    }
    println!();
    println!("Hint: {}", session.puzzle().hint);
    if let Some(limit) = session.puzzle().time_limit {
        println!("Time limit: {}s once you begin.", limit);
    }
    println!("Press Enter to begin.");
    if lines.next().is_none() {
        return Ok(());
    }

    session.begin();
    let started = Instant::now();
    let mut ticked: u64 = 0;

    loop {
        // Catch the logical clock up to wall time before showing the board
        // or accepting input.
        if session.time_remaining().is_some() {
            let elapsed = started.elapsed().as_secs();
            while ticked < elapsed && !session.is_terminal() {
                session.tick();
                ticked += 1;
            }
        }
        if session.is_terminal() {
            break;
        }

        print_board(session);
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        log::debug!("input: {}", escape_log(&line));
        let mut parts = line.split_whitespace();
        match parts.next() {
            None => continue,
            Some("q") => break,
            Some("c") => session.clear_selection(),
            Some("h") => println!("Hint: {}", session.puzzle().hint),
            Some("s") => match session.submit_answer() {
                Submission::NotReady => {
                    println!("Place all {} letters first.", session.puzzle().target_word.len());
                }
                Submission::Correct { .. } => {}
                Submission::Incorrect { attempts_remaining } => {
                    if attempts_remaining > 0 {
                        println!("Not quite. {} attempt(s) remaining.", attempts_remaining);
                    } else {
                        println!("Not quite.");
                    }
                    session.resolve_incorrect();
                }
            },
            Some("u") => {
                let ok = parts
                    .next()
                    .and_then(|raw| raw.parse::<usize>().ok())
                    .map(|pos| session.deselect_letter(pos.wrapping_sub(1)))
                    .unwrap_or(false);
                if !ok {
                    println!("Usage: u <position> (1-based position in your answer)");
                }
            }
            Some(token) => {
                let ok = token
                    .parse::<usize>()
                    .ok()
                    .map(|index| session.select_letter(index.wrapping_sub(1)))
                    .unwrap_or(false);
                if !ok {
                    println!("Commands: <tile#> pick, u <pos> unpick, c clear, s submit, h hint, q quit");
                }
            }
        }
    }
    Ok(())
}

fn print_board(session: &PuzzleSession) {
    let tiles: Vec<String> = session
        .tiles()
        .iter()
        .enumerate()
        .map(|(i, tile)| {
            if tile.used {
                format!("{}:·", i + 1)
            } else {
                format!("{}:{}", i + 1, tile.letter)
            }
        })
        .collect();
    let answer = session.current_answer();
    print!("Tiles: {}   Answer: {}", tiles.join(" "), answer);
    print!("   Attempts left: {}", session.attempts_remaining());
    if let Some(remaining) = session.time_remaining() {
        print!("   Time: {}s", remaining);
    }
    println!();
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .map(|c| c.logging.level.parse().unwrap_or(log::LevelFilter::Info))
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);
    let log_file = config.as_ref().and_then(|c| c.logging.file.clone());
    if let Some(file) = log_file {
        if let Ok(f) = std::fs::OpenOptions::new().create(true).append(true).open(&file) {
            let mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
            let is_tty = atty::is(atty::Stream::Stdout);
            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());
                if let Ok(mut guard) = mutex.lock() {
                    let _ = writeln!(guard, "{}", line);
                }
                if is_tty {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
        }
    } else {
        builder.format(|fmt, record| {
            writeln!(
                fmt,
                "{} [{}] {}",
                chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                record.level(),
                record.args()
            )
        });
    }
    let _ = builder.try_init();
}

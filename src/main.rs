use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use clap::Parser;
use grid_snake::config::GameConfig;
use grid_snake::game::{Game, Snapshot};
use grid_snake::input::Command;
use grid_snake::scheduler::IntervalTimer;
use grid_snake::session::run_session;
use log::{info, warn};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};

/// Runs one snake session driven by text commands on stdin.
///
/// Each line is a command (`up`, `down`, `left`, `right`, `start`, `pause`,
/// `resume`, `restart`). Every snapshot is written to stdout as one JSON line.
/// The session ends at end of input.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// JSON config file; missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food placement, for reproducible sessions.
    #[arg(long)]
    seed: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write logs to this file instead of stderr.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path).map_err(io::Error::other)?,
        None => GameConfig::default(),
    };

    let scheduler = IntervalTimer::new();
    let mut game = match cli.seed {
        Some(seed) => Game::with_seed(config, scheduler, seed),
        None => Game::new(config, scheduler),
    }
    .map_err(io::Error::other)?;

    info!("grid of {0}x{0} cells ready", game.grid_count());

    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || read_commands(sender));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut write_error = None;
    let last = run_session(&mut game, &receiver, |snapshot| {
        if write_error.is_none() {
            write_error = write_snapshot(&mut out, snapshot).err();
        }
    });

    if let Some(error) = write_error {
        return Err(error);
    }

    info!(
        "session ended in state {:?} with score {}",
        last.state, last.score
    );
    Ok(())
}

fn read_commands(sender: mpsc::Sender<Command>) {
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(error) => {
                warn!("failed to read input: {error}");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(command) => {
                if sender.send(command).is_err() {
                    break;
                }
            }
            Err(error) => warn!("{error}"),
        }
    }
}

fn write_snapshot(out: &mut impl Write, snapshot: &Snapshot) -> io::Result<()> {
    serde_json::to_writer(&mut *out, snapshot)?;
    out.write_all(b"\n")?;
    out.flush()
}

fn init_logging(cli: &Cli) -> io::Result<()> {
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    let result = match &cli.log_file {
        Some(path) => WriteLogger::init(level, Config::default(), File::create(path)?),
        None => TermLogger::init(
            level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ),
    };

    result.map_err(io::Error::other)
}

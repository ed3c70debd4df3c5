use std::{io, path::PathBuf, time::SystemTime};

use clap::{Parser, ValueEnum};
use log::{LevelFilter, error, info};

use catalog::PuzzleCatalog;
use console::{ConsolePresenter, run_shell};
use controller::Controller;
use dataset::{DEFAULT_DATASET_DIR, Dataset};

mod board;
mod capture;
mod catalog;
mod console;
mod controller;
mod dataset;
mod errors;
mod game_state;
mod history;
mod position;
mod presenter;
mod puzzle_file;
mod release;
mod scores;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StartMode {
    /// Clear the board of pawns, level by level
    Play,
    /// Walk the bishop around to build new puzzles
    Create,
}

#[derive(Parser, Debug)]
#[command(name = "bishop-puzzle")]
#[command(about = "Bishop capture puzzles on an 8x8 board")]
struct Args {
    /// Directory holding the puzzle files, the index and the score file
    #[arg(long, default_value = DEFAULT_DATASET_DIR)]
    dataset: PathBuf,

    #[arg(long, value_enum, default_value_t = StartMode::Play)]
    mode: StartMode,

    /// Level that play starts at, counted from 0
    #[arg(long, default_value_t = 0)]
    level: u8,

    /// Seed for puzzle selection
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,

    /// Also append log lines to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = setup_logger(args.log_level, args.log_file.as_ref()) {
        eprintln!("Failed to set up logging: {e}");
    }
    log_panics::init();

    info!("Using dataset at {}", args.dataset.display());
    let dataset = Dataset::new(args.dataset);
    let catalog = match args.seed {
        Some(seed) => PuzzleCatalog::with_seed(dataset, seed),
        None => PuzzleCatalog::new(dataset),
    };

    let mut controller =
        Controller::new(catalog, ConsolePresenter::new(io::stdout())).with_start_level(args.level);

    match args.mode {
        StartMode::Play => controller.start_new_game(),
        StartMode::Create => controller.create_puzzle(),
    }

    if let Err(e) = run_shell(&mut controller, io::stdin().lock()) {
        error!("Failed to read input: {e}");
    }
}

fn setup_logger(level: LevelFilter, log_file: Option<&PathBuf>) -> Result<(), fern::InitError> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(io::stderr());

    if let Some(path) = log_file {
        dispatch = dispatch.chain(fern::log_file(path)?);
    }

    dispatch.apply()?;
    Ok(())
}

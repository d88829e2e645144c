//! Rabbit Dodge entry point
//!
//! Sets up logging, settings and the platform collaborators, then hands
//! them to the game loop. Runs in the terminal by default; `--headless`
//! plays an unattended run without touching the terminal.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use rabbit_dodge::persistence::FileScoreLog;
use rabbit_dodge::platform::{RecordingRenderer, ScriptedInput, TerminalInput, TerminalRenderer, ThreadClock};
use rabbit_dodge::sim::seed_from_clock;
use rabbit_dodge::{Game, GameEnd, Result, Settings};

#[derive(Parser)]
#[command(version, about = "Dodge the falling drops, catch the carrots.")]
struct Cli {
    /// JSON settings file (defaults are used for missing fields)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Score log path, overriding the settings
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,

    /// RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Run without a terminal UI and no input
    #[arg(long)]
    headless: bool,

    /// Print the effective settings as JSON and exit
    #[arg(long)]
    dump_settings: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("rabbit-dodge: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(log_path) = cli.log {
        settings.score_log_path = log_path;
    }
    settings.validate()?;

    if cli.dump_settings {
        println!("{}", settings.to_json()?);
        return Ok(());
    }

    let seed = cli.seed.unwrap_or_else(seed_from_clock);
    log::info!("Rabbit Dodge starting (seed {})", seed);

    let score_log = FileScoreLog::open(&settings.score_log_path)?;
    let clock = ThreadClock::start(Duration::from_secs(1), settings.win_after_secs)?;

    let end = if cli.headless {
        let mut renderer = RecordingRenderer::new(40);
        let end = Game::new(settings, seed, &mut renderer, ScriptedInput::idle(), clock, score_log)?.run()?;
        log::info!("Headless run presented {} frames", renderer.presented);
        end
    } else {
        let renderer = TerminalRenderer::new(&settings)?;
        let input = TerminalInput::new()?;
        Game::new(settings, seed, renderer, input, clock, score_log)?.run()?
    };

    match end {
        GameEnd::Won { score } => println!("You won! Score: {score}"),
        GameEnd::Lost { score } => println!("You lost. Score: {score}"),
        GameEnd::Quit { score } => println!("Quit. Score: {score}"),
    }
    Ok(())
}

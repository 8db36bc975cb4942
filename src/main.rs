//! Frotz terminal front-end - Entry Point
//!
//! Loads configuration, sets up the terminal session and runs the event loop
//! until the shell hosting the interpreter exits.

use anyhow::{Context, Result};
use clap::Parser;
use frotz_term::{
    core::{config::Config, events},
    host::{spawn_resize_watcher, spawn_stdin_reader, RawModeGuard},
    pty::PtySurface,
    App, AppEvent, Arch, SessionLauncher, TerminalConfigStore,
};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "frotz-term", version, about = "Play interactive fiction with frotz")]
struct Cli {
    /// Game file to open instead of the default game
    game: Option<PathBuf>,

    /// Open the page listing more games and exit
    #[arg(long)]
    get_games: bool,

    /// Use this config file instead of the default one
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr; keep them quiet when they share the screen with the game
    let default_filter = if std::io::stderr().is_terminal() { "warn" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting frotz-term");

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    info!("Configuration loaded");

    if cli.get_games {
        open::that(&config.game.games_url)
            .with_context(|| format!("Failed to open {}", config.game.games_url))?;
        return Ok(ExitCode::SUCCESS);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create runtime")?;
    let code = runtime.block_on(run(cli, config))?;

    Ok(ExitCode::from(code))
}

async fn run(cli: Cli, config: Config) -> Result<u8> {
    let arch = Arch::detect();
    if let Some(code) = refuse_unsupported(arch, &config) {
        return Ok(code);
    }

    // Saved games live here; the launcher only ever cd's into it
    let save_dir = config.save_dir()?;
    std::fs::create_dir_all(&save_dir)
        .with_context(|| format!("Failed to create save directory: {:?}", save_dir))?;

    let store = TerminalConfigStore::in_profile(&config.profile_dir()?);
    let (event_tx, event_rx) = events::channel();

    let _raw_mode = RawModeGuard::enter()?;

    let surface = PtySurface::stdout(event_tx.clone());
    let launcher = SessionLauncher::new(save_dir, arch, config.interpreter.clone());
    let mut app = App::new(surface, &store, launcher, event_tx.clone(), event_rx)?;

    // The default game starts once the loop is idle, unless a file was opened first
    app.schedule_game(absolute(&config.default_game_path()?)?);
    if let Some(game) = &cli.game {
        event_tx.send(AppEvent::OpenFile(absolute(game)?))?;
    }

    spawn_stdin_reader(event_tx.clone());
    spawn_resize_watcher(event_tx)?;

    let code = app.run().await?;
    Ok(u8::try_from(code).unwrap_or(1))
}

/// Exit status when no interpreter build exists for `arch`. The refusal is
/// logged but is not a failure of the program.
fn refuse_unsupported(arch: Arch, config: &Config) -> Option<u8> {
    match arch.interpreter(&config.interpreter) {
        Ok(_) => None,
        Err(e) => {
            error!("{}", e);
            Some(0)
        }
    }
}

/// The shell changes directory before starting the game, so paths must not be relative
fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    Ok(cwd.join(path))
}

mod app;
mod cli;
mod command;
mod config;
mod consts;
mod game;
mod util;
use crate::app::App;
use crate::cli::{Arguments, CliAction};
use crate::config::{Config, ConfigError, Settings};
use crate::game::Game;
use anyhow::Context;
use rand::{rngs::StdRng, SeedableRng};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gridsnake: {e:?}");
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<()> {
    let args = match CliAction::from_env()? {
        CliAction::Run(args) => args,
        CliAction::Help => {
            print!("{}", cli::USAGE);
            return Ok(());
        }
        CliAction::Version => {
            println!("gridsnake {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
    };
    let settings = load_settings(&args)?;
    if let Some(ref path) = settings.log_file {
        init_logging(path)?;
    }
    let seed = settings.seed.unwrap_or_else(rand::random);
    tracing::info!(
        width = settings.bounds.width(),
        height = settings.bounds.height(),
        tick_ms = settings.tick_period.as_millis(),
        seed,
        "Starting game"
    );
    let game = Game::new(
        settings.bounds,
        settings.tick_period,
        StdRng::seed_from_u64(seed),
    );
    let terminal = ratatui::init();
    let r = App::new(game).run(terminal);
    ratatui::restore();
    r.context("terminal I/O failed")
}

/// Read the configuration file and apply command-line overrides
fn load_settings(args: &Arguments) -> anyhow::Result<Settings> {
    let config = match args.config {
        Some(ref path) => Config::load(path, false)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => match Config::default_path() {
            Ok(path) => Config::load(&path, true)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            Err(ConfigError::NoPath) => Config::default(),
            Err(e) => return Err(e.into()),
        },
    };
    let mut settings = config.settings().context("invalid configuration")?;
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(ref path) = args.log_file {
        settings.log_file = Some(path.clone());
    }
    Ok(settings)
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = fs_err::File::create(path).context("failed to open log file")?;
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&directives))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Build the log filter from `RUST_LOG`-style directives, falling back to
/// `info` when there are none
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", LevelFilter::INFO)]
    #[case("debug", LevelFilter::DEBUG)]
    #[case("warn", LevelFilter::WARN)]
    #[case("gridsnake=debug", LevelFilter::DEBUG)]
    fn test_log_filter(#[case] directives: &str, #[case] level: LevelFilter) {
        assert_eq!(log_filter(directives).max_level_hint(), Some(level));
    }
}

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use wrapsnake::game::GameConfig;
use wrapsnake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "wrapsnake")]
#[command(version, about = "Snake on a wrap-around grid, in your terminal")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Field width in pixels
    #[arg(long)]
    screen_width: Option<u32>,

    /// Field height in pixels
    #[arg(long)]
    screen_height: Option<u32>,

    /// Cell size in pixels
    #[arg(long)]
    cell_size: Option<u32>,

    /// Game speed in ticks per second
    #[arg(long = "tps")]
    ticks_per_second: Option<u32>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Where log output goes; the terminal belongs to the game
    #[arg(long, default_value = "wrapsnake.log")]
    log_file: PathBuf,

    #[arg(long, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    /// Config file (or defaults) with command-line overrides applied
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.screen_width {
            config.screen_width = width;
        }
        if let Some(height) = self.screen_height {
            config.screen_height = height;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(tps) = self.ticks_per_second {
            config.ticks_per_second = tps;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    WriteLogger::init(cli.log_level.into(), Config::default(), log_file)
        .context("Failed to initialize logger")?;

    let config = cli.game_config()?;
    let grid = config.grid();
    log::info!(
        "Starting on a {}x{} grid at {} ticks per second",
        grid.width(),
        grid.height(),
        config.ticks_per_second
    );

    let mut human_mode = HumanMode::new(config, cli.seed)?;
    human_mode.run().await?;

    Ok(())
}

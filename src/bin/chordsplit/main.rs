//! chordsplit - terminal demo of the chord-split engine
//!
//! Run with: cargo run -- [config.toml] [--verbose]
//!
//! A scripted two-hand performance drives the engine on a simulated audio
//! thread; the terminal shows what it plays.

mod app;
mod script;
mod ui;

use std::fs::File;

use app::ChordSplit;
use chordsplit::EngineConfig;
use color_eyre::eyre::{Result as EyreResult, WrapErr};

fn init_logging(verbose: bool) {
    use simplelog::*;

    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // The terminal belongs to the UI, so log to a file.
    let log_path = std::env::temp_dir().join("chordsplit.log");
    match File::create(&log_path) {
        Ok(file) => {
            if WriteLogger::init(log_level, Config::default(), file).is_ok() {
                log::info!("chordsplit starting (log level: {:?})", log_level);
            }
        }
        Err(e) => eprintln!("logging disabled, cannot create {}: {}", log_path.display(), e),
    }
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    init_logging(verbose);

    let config = match args.iter().find(|a| !a.starts_with('-')) {
        Some(path) => EngineConfig::load(path)
            .wrap_err_with(|| format!("failed to load config from {path}"))?,
        None => EngineConfig::default(),
    };

    ChordSplit::new(config).bpm(112.0).run()
}

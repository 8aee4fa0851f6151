use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::env;
use std::fs::File;
use std::io;

mod app;
mod audio;
mod config;
mod food;
mod game;
mod grid;
mod input;
mod pacer;
mod render;

use config::{GameConfig, LOG_FILE, LOG_LEVEL_ENV};

fn main() -> Result<(), io::Error> {
    // Set up logging before anything else
    WriteLogger::init(log_level(), Config::default(), File::create(LOG_FILE)?)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    info!("Starting tilesnek");
    let result = app::run(GameConfig::default());
    info!("Stopped tilesnek");
    result
}

fn log_level() -> LevelFilter {
    env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

//! Main application entry point.

use std::path::Path;

use framewright_app::{App, AppConfig};

fn main() {
    env_logger::init();
    log::info!("Starting Framewright");

    let config = match std::env::args().nth(1) {
        Some(path) => match AppConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config {path}: {e}");
                AppConfig::default()
            }
        },
        None => AppConfig::default(),
    };

    if let Err(e) = pollster::block_on(App::run(config)) {
        log::error!("Event loop error: {e}");
    }
}

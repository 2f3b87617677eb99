use std::io;

use number_garden::adaptive::AdaptiveDifficultyEngine;
use number_garden::config::Config;
use number_garden::logging::init_tracing;
use number_garden::skills::SkillCatalog;
use number_garden::{driver, persistence};

fn main() {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    let _log_guard = init_tracing(&config.log_level);

    let catalog = match config.skills_path.as_ref() {
        Some(path) => match SkillCatalog::load(path) {
            Ok(catalog) => catalog,
            Err(err) => {
                tracing::warn!(error = %err, path = %path.display(), "falling back to built-in skills");
                SkillCatalog::number_garden()
            }
        },
        None => SkillCatalog::number_garden(),
    };

    let snapshot = config
        .snapshot_path
        .as_ref()
        .and_then(|path| match persistence::load_snapshot_if_exists(path) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(error = %err, path = %path.display(), "snapshot not loaded");
                None
            }
        });

    let mut engine = match snapshot {
        Some(snapshot) => {
            match AdaptiveDifficultyEngine::restore(config.adaptive.clone(), catalog.clone(), snapshot) {
                Ok(engine) => {
                    tracing::info!("session restored from snapshot");
                    engine
                }
                Err(err) => {
                    tracing::warn!(error = %err, "snapshot rejected, starting fresh");
                    AdaptiveDifficultyEngine::new(config.adaptive.clone(), catalog)
                }
            }
        }
        None => AdaptiveDifficultyEngine::new(config.adaptive.clone(), catalog),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    match driver::run(&mut engine, stdin.lock(), stdout.lock()) {
        Ok(handled) => tracing::info!(handled, "input closed"),
        Err(err) => tracing::error!(error = %err, "session driver failed"),
    }

    if let Some(path) = config.snapshot_path.as_ref() {
        if let Err(err) = persistence::save_snapshot(path, &engine.snapshot()) {
            tracing::error!(error = %err, path = %path.display(), "failed to save snapshot");
        }
    }
}

use std::path::PathBuf;

use tapemeasure::camera::TestPatternCamera;
use tapemeasure::{run_tape_measure, Settings, TapeConfig};
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Optional settings file as the first argument.
    let settings = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => match Settings::load(&path) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(path = %path.display(), "failed to load settings, using defaults: {e}");
                Settings::default()
            }
        },
        None => Settings::default(),
    };

    run_tape_measure(
        Box::new(TestPatternCamera::default()),
        TapeConfig::from_settings(settings),
    )
}

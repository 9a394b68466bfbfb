mod engine;
mod model;
mod ui;

use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "AI Dungeon Master",
        options,
        Box::new(|_cc| Ok(Box::new(ui::app::DungeonMasterApp::new()))),
    )
}

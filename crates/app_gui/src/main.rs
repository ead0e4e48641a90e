mod app;

use anyhow::{Context, Result, anyhow};
use app::{Settings, UiApp};
use directories_next::ProjectDirs;
use eframe::{NativeOptions, egui};
use std::path::PathBuf;

const APP_VERSION: &str = env!("PHOTO_HISTORY_VERSION");

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,app_gui=debug,history_core=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}

fn main() -> Result<()> {
    init_logging();
    tracing::info!(version = APP_VERSION, "PhotoHistory starting");

    let (config_dir, data_dir) = match ProjectDirs::from("nl", "PhotoHistory", "PhotoHistory") {
        Some(dirs) => (
            dirs.config_dir().to_path_buf(),
            dirs.data_dir().to_path_buf(),
        ),
        None => (PathBuf::from("."), PathBuf::from(".")),
    };
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

    let settings = Settings::load(&config_dir);
    let cli_history = std::env::args_os().nth(1).map(PathBuf::from);
    let history_path = settings.history_path(cli_history, &data_dir);
    tracing::info!(path = %history_path.display(), "Using history file");

    let app = UiApp::new(&settings, history_path);
    let title = format!("Photo history {APP_VERSION}");
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_title(&title),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok::<_, Box<dyn std::error::Error + Send + Sync>>(Box::new(app))
        }),
    )
    .map_err(|e| anyhow!("application stopped with error: {e}"))
}

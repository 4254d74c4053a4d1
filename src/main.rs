use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

mod app;
mod config;
mod domain;
mod infra;
mod platform;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

fn main() {
    if let Err(err) = dioxus::logger::init(config::log_level()) {
        eprintln!("failed to initialize logger: {err}");
    }

    let webview_data_dir =
        default_webview_data_dir().expect("should resolve and create WebView2 data directory");
    tracing::info!(dir = %webview_data_dir.display(), "starting dashboard");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("Produção BUREAU"))
                .with_data_directory(webview_data_dir),
        )
        .launch(app::App);
}

fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

fn default_webview_data_dir() -> Result<PathBuf> {
    let project_dirs =
        config::project_dirs().ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    ensure_webview_data_dir(project_dirs.data_local_dir())
}

use std::fs::{self, OpenOptions};
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;
use menubar_tui::ui::theme::catalog;
use menubar_util::{UserPreferences, default_log_path, expand_tilde, load_document};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Terminal menu bar with mouse driven submenus.
#[derive(Debug, Parser)]
#[command(name = "menubar", version, about)]
struct Args {
    /// Menu document (YAML, or JSON by extension). Defaults to
    /// MENUBAR_CONFIG_PATH, then ~/.config/menubar/menubar.yaml.
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<String>,

    /// Theme to use and remember (dracula, nord, ansi256).
    #[arg(long, short = 't', value_name = "THEME")]
    theme: Option<String>,

    /// Where to write logs. Defaults to MENUBAR_LOG_PATH, then the config directory.
    #[arg(long, value_name = "PATH")]
    log_file: Option<String>,

    /// Validate the document, print a summary and exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_path = args.log_file.as_deref().map(expand_tilde).unwrap_or_else(default_log_path);
    init_tracing(&log_path);

    let config = args.config.as_deref().map(expand_tilde);
    let loaded = load_document(config.as_deref()).context("failed to load the menu document")?;
    info!(source = %loaded.source, "menu document loaded");

    if args.check {
        let summary = loaded.document.summary();
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let preferences = UserPreferences::new().unwrap_or_else(|error| {
        warn!("Failed to open preferences, using defaults: {}", error);
        UserPreferences::ephemeral()
    });
    let preferred_theme = match args.theme.as_deref() {
        Some(name) => Some(remember_theme(&preferences, name)?),
        None => preferences.preferred_theme(),
    };

    let theme = menubar_tui::load_theme(preferred_theme.as_deref());
    menubar_tui::run(loaded.document, loaded.source, theme).await
}

/// Validates `name` and stores its canonical id as the preferred theme.
fn remember_theme(preferences: &UserPreferences, name: &str) -> Result<String> {
    let Some(definition) = catalog::resolve(name.trim()) else {
        let known: Vec<&str> = catalog::all().iter().map(|definition| definition.id).collect();
        bail!("unknown theme '{}'; expected one of: {}", name, known.join(", "));
    };
    if let Err(error) = preferences.set_preferred_theme(Some(definition.id.to_string())) {
        warn!("Failed to persist theme preference: {}", error);
    }
    Ok(definition.id.to_string())
}

/// Logs go to a file; the terminal belongs to the UI.
fn init_tracing(log_path: &Path) {
    if let Some(parent) = log_path.parent()
        && !parent.as_os_str().is_empty()
    {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(log_path) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .try_init();
}

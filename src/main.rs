//! Card Stack Navigator - Entry Point

use cardstack::config::ReentryPolicy;
use cardstack::model::ScreenKind;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Card Stack Navigator - swipeable check-in screens in the terminal
#[derive(Parser, Debug)]
#[command(name = "cardstack")]
#[command(version)]
#[command(about = "Swipe between check-in screens arranged as a fanned card stack")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Screen shown on startup (map, checkin, history, stats, settings)
    #[arg(long, value_parser = parse_screen)]
    pub screen: Option<ScreenKind>,

    /// Horizontal travel in pixels needed to commit a swipe
    #[arg(long, value_name = "PX")]
    pub commit_threshold: Option<f64>,

    /// A second pointer-down cancels the running drag and starts a new one
    #[arg(long)]
    pub restart_on_reentry: bool,

    /// Do not ring the bell when navigation commits
    #[arg(long)]
    pub no_haptics: bool,
}

fn parse_screen(raw: &str) -> Result<ScreenKind, String> {
    raw.parse::<ScreenKind>().map_err(|e| e.to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = cardstack::config::load_config_with_precedence(args.config.clone())?;
        let merged = cardstack::config::merge_config(config_file);
        let with_env = cardstack::config::apply_env_overrides(merged);

        // Boolean flags only override when explicitly set
        let reentry_override = args
            .restart_on_reentry
            .then_some(ReentryPolicy::RestartSession);
        let haptics_override = args.no_haptics.then_some(false);

        cardstack::config::apply_cli_overrides(
            with_env,
            args.screen,
            args.commit_threshold,
            reentry_override,
            haptics_override,
        )
    };
    config.validate()?;

    let _log_guard = cardstack::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    cardstack::view::run(config)?;

    Ok(())
}

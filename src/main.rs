use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

use zyna::TabKind;
use zyna::core::config;
use zyna::core::session::SessionStore;
use zyna::tui;

#[derive(Parser)]
#[command(name = "zyna", about = "Terminal messenger shell driven by a flow coordinator")]
struct Args {
    /// Tab selected when the main screen opens
    #[arg(short, long, value_enum)]
    tab: Option<TabKind>,

    /// Forget the saved session and start at sign-in
    #[arg(long)]
    sign_out: bool,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // A malformed config file is reported and replaced by defaults, so a typo
    // never locks the user out.
    let (file_config, config_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (config::ZynaConfig::default(), Some(e)),
    };
    let resolved = config::resolve(&file_config, args.tab, args.log_level.as_deref());

    // Initialize file logger - the terminal belongs to the TUI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    if let Some(e) = config_error {
        log::warn!("Ignoring config file: {}", e);
    }
    log::info!(
        "Zyna starting up (initial tab: {}, remember session: {})",
        resolved.initial_tab,
        resolved.remember_session
    );

    if args.sign_out {
        let sessions = SessionStore::new(resolved.session_path.clone());
        match sessions.clear() {
            Ok(()) => log::info!("Signed out, removed {}", sessions.path().display()),
            Err(e) => log::warn!("Failed to remove session: {}", e),
        }
    }

    tui::run(resolved)
}

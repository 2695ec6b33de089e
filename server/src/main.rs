mod messages;
mod server_config;
mod web_server;
mod ws_handler;
mod ws_presenter;

use std::path::PathBuf;

use clap::Parser;
use common::config::ConfigManager;
use common::games::tictactoe::TicTacToeSessionSettings;
use common::{log, logger};

use server_config::{DEFAULT_CONFIG_FILE_NAME, ServerConfig};
use web_server::run_web_server;

#[derive(Parser)]
#[command(name = "tictactoe_server")]
struct Args {
    #[arg(long)]
    use_log_prefix: bool,

    #[arg(long, default_value = DEFAULT_CONFIG_FILE_NAME)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager: ConfigManager<_, ServerConfig> =
        ConfigManager::from_yaml_file(&args.config);
    let config = config_manager.get_config().inspect_err(|e| {
        log!("Failed to load config {}: {}", args.config.display(), e);
    })?;

    let addr = config.web.socket_addr()?;
    let session_settings = TicTacToeSessionSettings::from(&config.game);
    log!(
        "Bot move delay {:?}, restart delay {:?}, default mode {:?}",
        session_settings.bot_move_delay,
        session_settings.restart_delay,
        session_settings.default_mode
    );

    run_web_server(addr, PathBuf::from(&config.web.static_files_path), session_settings).await?;

    log!("Server stopped");
    Ok(())
}

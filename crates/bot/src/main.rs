use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::update_listeners::Polling;

mod cli;
mod telegram;

use avatarka_core::{compose_avatar, config, init_logger, OverlayCatalog, SelectionKey, SessionStore};
use cli::{Cli, Commands};
use telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to the appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    // Load environment variables from .env if present
    let _ = dotenv();

    match cli.command {
        Some(Commands::Run) => run_bot().await,
        Some(Commands::Compose {
            input,
            selection,
            output,
        }) => run_cli_compose(&input, &selection, output),
        None => {
            // No command specified - default to running the bot
            log::info!("No command specified, running bot in default mode");
            run_bot().await
        }
    }
}

/// Run the Telegram bot
async fn run_bot() -> Result<()> {
    log::info!("Starting bot...");

    let bot = create_bot()?;

    let me = bot.get_me().await?;
    log::info!("Bot username: {:?}, Bot ID: {}", me.username, me.id);

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let catalog = Arc::new(OverlayCatalog::from_env());
    if catalog.root().is_dir() {
        log::info!("Overlay catalog: {}", catalog.root().display());
    } else {
        log::warn!(
            "Overlay directory {} does not exist; every selection will resolve as 'not found'",
            catalog.root().display()
        );
    }
    let session_store = Arc::new(SessionStore::new());

    let handler = schema(HandlerDeps::new(session_store, catalog));

    log::info!("Starting bot in long polling mode");

    // Drop updates that piled up while the bot was down; stale photo
    // submissions would hit empty sessions anyway.
    let listener = Polling::builder(bot.clone()).drop_pending_updates().build();

    Dispatcher::builder(bot, handler)
        .dependencies(DependencyMap::new())
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}

/// Run the offline compose command
fn run_cli_compose(input: &str, selection: &str, output: Option<String>) -> Result<()> {
    println!("🖼  Avatarka CLI Compose");
    println!("========================");
    println!("Input: {}", input);
    println!("Selection: {}", selection);

    let key = SelectionKey::from_asset_name(selection).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown selection: {}. Use day_off, vacation or business_trip_<utc|dubai|moscow|ny>.",
            selection
        )
    })?;

    let catalog = OverlayCatalog::from_env();
    let overlay = catalog.resolve(key)?;
    let source = std::fs::read(input)?;
    let composite = compose_avatar(&source, &overlay)?;

    let output_path = output.unwrap_or_else(|| composite.filename.to_string());
    std::fs::write(&output_path, &composite.bytes)?;
    println!("✅ Wrote {} ({} bytes)", output_path, composite.bytes.len());

    Ok(())
}

//! Entry wiring: config → tracing → teloxide bot → handler chain → health server + polling REPL.

use anyhow::Result;
use gemini_client::GeminiImageClient;
use image_handlers::ImageGenerationHandler;
use imagen_core::{init_tracing, Bot as CoreBot, HandlerChain, ToCoreMessage};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use tracing::{error, info, instrument};

use crate::adapters::TelegramMessageWrapper;
use crate::bot_adapter::TelegramBotAdapter;
use crate::config::BotConfig;
use crate::handlers::CommandHandler;
use crate::health;

/// Builds the teloxide bot, honoring a custom Bot API URL when configured.
fn build_teloxide_bot(config: &BotConfig) -> Result<teloxide::Bot> {
    let mut bot = teloxide::Bot::new(config.telegram_token.clone());
    if let Some(ref url) = config.telegram_api_url {
        bot = bot.set_api_url(reqwest::Url::parse(url)?);
    }
    Ok(bot)
}

/// Builds the Gemini client from config (model and optional base URL override).
fn build_image_client(config: &BotConfig) -> GeminiImageClient {
    let mut client = GeminiImageClient::new(config.gemini_api_key.clone())
        .with_model(config.gemini_model.clone());
    if let Some(ref base) = config.gemini_api_url {
        client = client.with_api_base(base.clone());
    }
    client
}

/// Builds the handler chain: commands first, then image generation.
pub fn build_handler_chain(
    image_client: GeminiImageClient,
    bot: Arc<dyn CoreBot>,
) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(CommandHandler::new(bot.clone())))
        .add_handler(Arc::new(ImageGenerationHandler::new(
            Arc::new(image_client),
            bot,
        )))
}

/// Registers the command menu with Telegram. Failure is logged, not fatal.
async fn register_commands(bot: &teloxide::Bot) {
    let commands = vec![
        BotCommand::new("start", "Start the bot"),
        BotCommand::new("help", "Get help and tips"),
    ];
    match bot.set_my_commands(commands).await {
        Ok(_) => info!("Bot commands registered"),
        Err(e) => error!(error = %e, "Failed to register bot commands"),
    }
}

/// Main entry: validate config, init logging, build components, spawn the health
/// server, then run the polling REPL.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    std::fs::create_dir_all("logs")?;
    init_tracing(config.log_file.as_str())?;

    info!(
        model = %config.gemini_model,
        port = config.port,
        api_key = %gemini_client::mask_token(&config.gemini_api_key),
        "Initializing bot"
    );

    let bot = build_teloxide_bot(&config)?;
    let adapter: Arc<dyn CoreBot> = Arc::new(TelegramBotAdapter::new(bot.clone()));
    let handler_chain = build_handler_chain(build_image_client(&config), adapter);

    let port = config.port;
    tokio::spawn(async move {
        if let Err(e) = health::serve(port).await {
            error!(error = %e, "Health server failed");
        }
    });

    info!("Bot started successfully");

    run_repl(bot, handler_chain).await
}

/// Starts the REPL with the given teloxide Bot and HandlerChain.
/// Registers the command menu before polling; each message is converted to a
/// core Message and passed to chain.handle (spawned per message).
#[instrument(skip(bot, handler_chain))]
pub async fn run_repl(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    register_commands(&bot).await;

    let chain = handler_chain;
    teloxide::repl(
        bot,
        move |_bot: Bot, msg: teloxide::types::Message| {
            let chain = chain.clone();

            async move {
                let wrapper = TelegramMessageWrapper(&msg);
                let core_msg = wrapper.to_core();

                match msg.text() {
                    Some(text) => {
                        info!(
                            user_id = core_msg.user.id,
                            chat_id = core_msg.chat.id,
                            message_content = %text,
                            "Received message"
                        );
                    }
                    None => {
                        info!(
                            user_id = core_msg.user.id,
                            chat_id = core_msg.chat.id,
                            "Received non-text message"
                        );
                    }
                }

                // Run handler chain in a spawned task so the REPL returns immediately
                let chain_for_task = chain.clone();
                tokio::spawn(async move {
                    if let Err(e) = chain_for_task.handle(&core_msg).await {
                        error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
                    }
                });

                Ok(())
            }
        },
    )
    .await;

    Ok(())
}

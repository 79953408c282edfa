//! # imagen-bot
//!
//! Telegram bot that turns text prompts into Gemini-generated images. Wires imagen-core,
//! gemini-client, and image-handlers: loads config from env, runs the polling REPL plus a
//! health endpoint for the hosting platform.

pub mod adapters;
pub mod bot_adapter;
pub mod cli;
pub mod config;
pub mod handlers;
pub mod health;
pub mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use cli::{load_config, Cli, Commands};
pub use config::BotConfig;
pub use handlers::CommandHandler;
pub use runner::run_bot;

//! Application handlers.

pub mod command_handler;

pub use command_handler::CommandHandler;

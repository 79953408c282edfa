//! # imagen-core
//!
//! Core types and traits for the image-generation bot: [`Bot`], [`Handler`], [`HandlerChain`],
//! message and user types, and tracing initialization. Transport-agnostic; used by
//! image-handlers and imagen-bot.

pub mod bot;
pub mod chain;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use chain::HandlerChain;
pub use error::{HandlerError, ImagenError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, Handler, HandlerResponse, Message, MessageDirection, ToCoreMessage, ToCoreUser, User,
};

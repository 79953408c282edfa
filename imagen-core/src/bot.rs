//! Bot abstraction for sending messages and photos.
//!
//! [`Bot`] trait is transport-agnostic; imagen-bot implements it via teloxide.

use crate::error::{ImagenError, Result};
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// Abstraction for sending messages and photos. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Sends a message and returns its id (for later `delete_message`, e.g. a progress placeholder). May return empty string if not supported.
    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String>;
    /// Sends raw image bytes to the given chat as a photo. `mime_type` selects the upload file name.
    async fn send_photo(
        &self,
        chat: &Chat,
        bytes: Vec<u8>,
        mime_type: &str,
        caption: Option<&str>,
    ) -> Result<()>;
    /// Deletes an already-sent message. `message_id` is transport-specific (e.g. Telegram numeric string).
    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()>;
}

/// Parses a message id string into an i32. Used by delete_message.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| ImagenError::Bot(format!("Invalid message_id: {}", s)))
}

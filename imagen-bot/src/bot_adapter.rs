//! Wraps teloxide::Bot and implements [`imagen_core::Bot`]. Production code sends via Telegram;
//! tests substitute another Bot impl.

use async_trait::async_trait;
use imagen_core::{parse_message_id, Bot as CoreBot, Chat, ImagenError, Message, Result};
use teloxide::{
    prelude::*,
    types::{ChatId, InputFile, MessageId},
};

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }

    /// Upload file name for the given mime type. Telegram infers the format from it.
    fn photo_file_name(mime_type: &str) -> &'static str {
        if mime_type.ends_with("jpeg") || mime_type.ends_with("jpg") {
            "image.jpg"
        } else {
            "image.png"
        }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| ImagenError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }

    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String> {
        let sent = self
            .bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| ImagenError::Bot(e.to_string()))?;
        Ok(sent.id.to_string())
    }

    async fn send_photo(
        &self,
        chat: &Chat,
        bytes: Vec<u8>,
        mime_type: &str,
        caption: Option<&str>,
    ) -> Result<()> {
        let photo = InputFile::memory(bytes).file_name(Self::photo_file_name(mime_type));
        let mut request = self.bot.send_photo(ChatId(chat.id), photo);
        if let Some(caption) = caption {
            request = request.caption(caption.to_string());
        }
        request
            .await
            .map_err(|e| ImagenError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .delete_message(ChatId(chat.id), MessageId(id))
            .await
            .map_err(|e| ImagenError::Bot(e.to_string()))?;
        Ok(())
    }
}

//! Command handler: answers /start and /help with static text.

use async_trait::async_trait;
use imagen_core::{Bot as CoreBot, Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{error, info, instrument};

const HELP_TEXT: &str = "Here's how to use me:\n\n\
1. Simply type a description of the image you want to create.\n\
2. I will generate it and send it back to you.\n\n\
Tips for good prompts:\n\
✅ Be descriptive!\n\
✅ Include styles (e.g., 'in the style of Van Gogh').\n\
✅ Mention lighting or mood (e.g., 'dramatic lighting').";

/// Handles the /start and /help commands; everything else continues down the chain.
#[derive(Clone)]
pub struct CommandHandler {
    bot: Arc<dyn CoreBot>,
}

impl CommandHandler {
    pub fn new(bot: Arc<dyn CoreBot>) -> Self {
        Self { bot }
    }

    /// Extracts the command name from the message text, if any.
    /// Strips the `@botname` suffix Telegram appends in group chats.
    fn command_of(text: &str) -> Option<&str> {
        let first = text.trim().split_whitespace().next()?;
        if !first.starts_with('/') {
            return None;
        }
        Some(first.split('@').next().unwrap_or(first))
    }

    fn welcome_text(name: &str) -> String {
        format!(
            "👋 Hi {}!\n\nI'm an image generation bot. Just send me a text description, \
and I'll create an image for you.",
            name
        )
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let command = match Self::command_of(&message.content) {
            Some(c) => c,
            None => return Ok(HandlerResponse::Continue),
        };

        let reply = match command {
            "/start" => Self::welcome_text(message.user.display_name()),
            "/help" => HELP_TEXT.to_string(),
            // Unknown commands fall through unanswered
            _ => return Ok(HandlerResponse::Continue),
        };

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            command = %command,
            "Answering command"
        );

        if let Err(e) = self.bot.send_message(&message.chat, &reply).await {
            error!(error = %e, command = %command, "Failed to send command reply");
        }

        Ok(HandlerResponse::Stop)
    }
}

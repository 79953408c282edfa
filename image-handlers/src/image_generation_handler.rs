//! Image generation handler: treats plain text messages as prompts and replies with a generated photo.

use async_trait::async_trait;
use gemini_client::GeminiImageClient;
use imagen_core::{Bot as CoreBot, Handler, HandlerResponse, ImagenError, Message, Result};
use std::sync::Arc;
use tracing::{error, info, instrument};

// --- User-facing messages ---
const MSG_GENERATING: &str = "🎨 Generating your image, please wait...";
const MSG_GENERATION_FAILED: &str = "😥 Sorry, something went wrong.";
const MSG_SEND_FAILED: &str = "😥 Sorry, something went wrong while replying.";

/// Image generation handler.
///
/// Every non-command text message is taken as a prompt: a progress placeholder is posted,
/// the image API is called, the photo is sent, and the placeholder is removed.
#[derive(Clone)]
pub struct ImageGenerationHandler {
    image_client: Arc<GeminiImageClient>,
    bot: Arc<dyn CoreBot>,
}

impl ImageGenerationHandler {
    /// Creates a new image generation handler.
    pub fn new(image_client: Arc<GeminiImageClient>, bot: Arc<dyn CoreBot>) -> Self {
        Self { image_client, bot }
    }

    /// True when the message text should be used as an image prompt.
    /// Commands (leading `/`) and empty text are left to other handlers.
    fn is_prompt(text: &str) -> bool {
        let trimmed = text.trim();
        !trimmed.is_empty() && !trimmed.starts_with('/')
    }

    /// Posts the placeholder, generates, sends the photo, and removes the placeholder.
    /// The placeholder is deleted on both the success and the failure path.
    async fn handle_image_generation(
        &self,
        message: &Message,
        prompt: &str,
    ) -> Result<HandlerResponse> {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            prompt_preview = %prompt.chars().take(50).collect::<String>(),
            "Processing image generation request"
        );

        let placeholder_id = match self
            .bot
            .send_message_and_return_id(&message.chat, MSG_GENERATING)
            .await
        {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, "Failed to send placeholder message");
                return self.send_fallback_and_stop(message, MSG_SEND_FAILED).await;
            }
        };

        let result = self.generate_and_send(message, prompt).await;

        if let Err(e) = self.bot.delete_message(&message.chat, &placeholder_id).await {
            error!(error = %e, "Failed to delete placeholder message");
        }

        if let Err(e) = result {
            error!(error = %e, user_id = message.user.id, "Image generation failed");
            return self
                .send_fallback_and_stop(message, MSG_GENERATION_FAILED)
                .await;
        }

        Ok(HandlerResponse::Stop)
    }

    async fn generate_and_send(&self, message: &Message, prompt: &str) -> Result<()> {
        let image = self
            .image_client
            .generate(prompt)
            .await
            .map_err(|e| ImagenError::ImageGeneration(e.to_string()))?;

        self.bot
            .send_photo(&message.chat, image.bytes, &image.mime_type, None)
            .await?;

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            "Image generated and sent"
        );
        Ok(())
    }

    /// Sends an error message to the chat and stops the chain.
    async fn send_fallback_and_stop(
        &self,
        message: &Message,
        text: &str,
    ) -> Result<HandlerResponse> {
        let _ = self.bot.send_message(&message.chat, text).await;
        Ok(HandlerResponse::Stop)
    }
}

#[async_trait]
impl Handler for ImageGenerationHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !Self::is_prompt(&message.content) {
            return Ok(HandlerResponse::Continue);
        }

        self.handle_image_generation(message, message.content.trim())
            .await
    }
}

//! Handlers that turn chat messages into image-generation calls.

pub mod image_generation_handler;

pub use image_generation_handler::ImageGenerationHandler;

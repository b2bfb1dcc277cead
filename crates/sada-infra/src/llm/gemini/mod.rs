//! Google Gemini model provider.

mod client;
mod types;

pub use client::GeminiProvider;

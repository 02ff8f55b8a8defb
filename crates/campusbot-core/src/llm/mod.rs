//! LLM integration
//!
//! Provides traits and implementations for:
//! - Embedding generation
//! - Chat generation over a transcript plus retrieved context

mod client;
mod message;
mod prompt;
mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use client::GeminiClient;
pub use message::{ChatMessage, Sender};
pub use prompt::{build_contents, Content, Part, SYSTEM_PROMPT};
pub use traits::*;

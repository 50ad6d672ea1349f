//! Generative-AI adapter
//!
//! The trait seam for the hosted text/vision model plus its REST client
//! implementation and the document extraction adapter built on top.

pub mod extract;
pub mod gemini;

use crate::domain::Result;
use async_trait::async_trait;

/// A document attached inline to a model request
#[derive(Debug, Clone)]
pub struct InlineDocument {
    /// Declared MIME type, e.g. `image/jpeg` or `application/pdf`
    pub mime_type: String,
    /// Raw document bytes
    pub data: Vec<u8>,
}

/// Trait seam for the hosted generative model
///
/// One operation: send a prompt (optionally with an inline document) and
/// get the model's text back. Extraction and insights both go through
/// this seam, which also keeps the HTTP client out of tests.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Generate text for a prompt, optionally attaching a document
    ///
    /// # Errors
    ///
    /// Returns an [`crate::domain::AiError`]-wrapped error for transport,
    /// auth and rate-limit failures. Response *content* problems are the
    /// caller's concern.
    async fn generate(&self, prompt: &str, attachment: Option<&InlineDocument>) -> Result<String>;
}

pub use extract::DocumentExtractor;
pub use gemini::GeminiClient;

//! Import command implementation
//!
//! Reads a document from disk, runs it through the extraction adapter and
//! writes any vitals found. A document with no vitals is a normal outcome;
//! a malformed model response suggests retaking the photo, while transport
//! failures point at the connection instead.

use super::{connect_service, status_icon, EXIT_CONFIG, EXIT_CONNECTION, EXIT_VALIDATION};
use crate::adapters::ai::{DocumentExtractor, GeminiClient};
use crate::config::load_config;
use crate::domain::{UserId, VitalError};
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Arguments for the import command
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// User to import for
    #[arg(long)]
    pub user: String,

    /// Document to import (photo or PDF)
    #[arg(long)]
    pub file: PathBuf,

    /// MIME type; guessed from the extension when omitted
    #[arg(long)]
    pub mime: Option<String>,
}

impl ImportArgs {
    /// Execute the import command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let ai_config = match config.ai_required() {
            Ok(c) => c.clone(),
            Err(e) => {
                println!("❌ {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let user_id = match UserId::new(self.user.clone()) {
            Ok(id) => id,
            Err(e) => {
                println!("❌ {e}");
                return Ok(EXIT_VALIDATION);
            }
        };

        let mime_type = match &self.mime {
            Some(mime) => mime.clone(),
            None => match guess_mime(&self.file) {
                Some(mime) => mime.to_string(),
                None => {
                    println!(
                        "❌ Cannot guess MIME type for {}; pass --mime",
                        self.file.display()
                    );
                    return Ok(EXIT_VALIDATION);
                }
            },
        };

        let data = match tokio::fs::read(&self.file).await {
            Ok(bytes) => bytes,
            Err(e) => {
                println!("❌ Failed to read {}", self.file.display());
                println!("   Error: {e}");
                return Ok(EXIT_VALIDATION);
            }
        };

        let service = match connect_service(&config).await {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to connect to store");
                println!("   Error: {e}");
                return Ok(EXIT_CONNECTION);
            }
        };

        let model = match GeminiClient::new(ai_config) {
            Ok(client) => Arc::new(client),
            Err(e) => {
                println!("❌ Failed to set up AI client");
                println!("   Error: {e}");
                return Ok(EXIT_CONNECTION);
            }
        };
        let extractor = DocumentExtractor::new(model);

        println!("🔍 Extracting vitals from {}...", self.file.display());

        match service
            .import_document(user_id.clone(), &extractor, &data, &mime_type)
            .await
        {
            Ok(Some(_)) => {
                println!("✅ Vitals imported");
                println!();
                if let Ok(cards) = service.dashboard(&user_id).await {
                    for card in &cards {
                        println!(
                            "{} {:<18} {:>8} {}",
                            status_icon(card.status),
                            card.label,
                            card.value,
                            card.unit
                        );
                    }
                }
                Ok(0)
            }
            Ok(None) => {
                println!("ℹ️  No vital signs found in this document.");
                println!("   Nothing was saved. Lab reports and referral letters have no vitals to import.");
                Ok(0)
            }
            Err(VitalError::ExtractionFormat(message)) => {
                println!("❌ Could not read vitals from the document");
                println!("   {message}");
                println!("   Try again with a clearer, better-lit photo.");
                Ok(EXIT_VALIDATION)
            }
            Err(e) => {
                println!("❌ Import failed");
                println!("   Error: {e}");
                println!("   Check your connection and try again.");
                Ok(EXIT_CONNECTION)
            }
        }
    }
}

/// MIME type from a file extension
fn guess_mime(path: &Path) -> Option<&'static str> {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())?
        .as_str()
    {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_mime_known_extensions() {
        assert_eq!(guess_mime(Path::new("scan.PDF")), Some("application/pdf"));
        assert_eq!(guess_mime(Path::new("photo.jpeg")), Some("image/jpeg"));
        assert_eq!(guess_mime(Path::new("photo.png")), Some("image/png"));
    }

    #[test]
    fn test_guess_mime_unknown_extension() {
        assert_eq!(guess_mime(Path::new("notes.txt")), None);
        assert_eq!(guess_mime(Path::new("no_extension")), None);
    }
}

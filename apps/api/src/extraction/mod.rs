// Text extraction adapters, one per supported upload format.
// Dispatch is a closed enum; anything unrecognised falls back to plain UTF-8 text.
// Blocking parsers run inside tokio::task::spawn_blocking.

pub mod docx;
pub mod image;
pub mod pdf;
pub mod text;

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use tracing::debug;

use crate::config::Config;
use crate::errors::AppError;

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Image,
    PlainText,
}

impl DocumentFormat {
    /// Picks the adapter from the file extension (case-insensitive).
    /// Unknown or missing extensions take the plain-text fallback.
    pub fn from_filename(filename: &str) -> Self {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => DocumentFormat::Pdf,
            "docx" => DocumentFormat::Docx,
            "png" | "jpg" | "jpeg" => DocumentFormat::Image,
            "txt" => DocumentFormat::PlainText,
            _ => {
                debug!(filename, "Unrecognised extension, decoding as plain text");
                DocumentFormat::PlainText
            }
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DocumentFormat::Pdf => "PDF",
            DocumentFormat::Docx => "DOCX",
            DocumentFormat::Image => "image",
            DocumentFormat::PlainText => "text",
        };
        f.write_str(label)
    }
}

/// Settings the adapters need at request time.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    pub tesseract_cmd: String,
    pub ocr_language: String,
    pub ocr_timeout: Duration,
}

impl ExtractionConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            tesseract_cmd: config.tesseract_cmd.clone(),
            ocr_language: config.ocr_language.clone(),
            ocr_timeout: Duration::from_secs(config.ocr_timeout_secs),
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            tesseract_cmd: "tesseract".to_string(),
            ocr_language: "eng".to_string(),
            ocr_timeout: Duration::from_secs(60),
        }
    }
}

/// Converts an uploaded file into plain text using the adapter for `format`.
pub async fn extract_text(
    format: DocumentFormat,
    data: Bytes,
    config: &ExtractionConfig,
) -> Result<String, AppError> {
    match format {
        DocumentFormat::Pdf => run_blocking(format, move || pdf::extract(&data)).await,
        DocumentFormat::Docx => run_blocking(format, move || docx::extract(&data)).await,
        DocumentFormat::Image => image::extract(&data, config)
            .await
            .map_err(|e| AppError::extraction(format, format!("{e:#}"))),
        DocumentFormat::PlainText => text::decode(&data),
    }
}

/// Runs a CPU-bound parser off the async runtime. A parser panic is reported
/// as an extraction failure rather than tearing down the worker.
async fn run_blocking<F>(format: DocumentFormat, parse: F) -> Result<String, AppError>
where
    F: FnOnce() -> anyhow::Result<String> + Send + 'static,
{
    match tokio::task::spawn_blocking(parse).await {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(AppError::extraction(format, format!("{e:#}"))),
        Err(join_err) => Err(AppError::extraction(
            format,
            format!("parser aborted: {join_err}"),
        )),
    }
}

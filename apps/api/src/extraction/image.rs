//! Image adapter: OCR through the `tesseract` command-line tool.
//!
//! The upload is written to a temp file (tesseract reads from a path), and the
//! recognised text is read back from stdout. The child is killed if the
//! configured timeout elapses.

use std::io::Write;
use std::process::Stdio;

use anyhow::{bail, Context, Result};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::extraction::ExtractionConfig;

pub async fn extract(data: &[u8], config: &ExtractionConfig) -> Result<String> {
    let mut input = tempfile::Builder::new()
        .prefix("assess-ocr-")
        .tempfile()
        .context("failed to create temp file for OCR input")?;
    input.write_all(data).context("failed to write OCR input")?;
    input.flush().context("failed to write OCR input")?;

    let mut command = Command::new(&config.tesseract_cmd);
    command
        .arg(input.path())
        .arg("stdout")
        .arg("-l")
        .arg(&config.ocr_language)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    debug!(cmd = %config.tesseract_cmd, lang = %config.ocr_language, bytes = data.len(), "Running OCR");

    let output = tokio::time::timeout(config.ocr_timeout, command.output())
        .await
        .with_context(|| format!("OCR timed out after {}s", config.ocr_timeout.as_secs()))?
        .with_context(|| format!("failed to run '{}'", config.tesseract_cmd))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!(status = %output.status, "OCR failed");
        bail!("OCR exited with {}: {}", output.status, stderr.trim());
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

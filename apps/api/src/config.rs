use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if a numeric variable cannot be parsed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub tesseract_cmd: String,
    pub ocr_language: String,
    pub ocr_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let max_upload_mb: usize = parse_env("MAX_UPLOAD_MB", 20)?;

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: max_upload_mb * 1024 * 1024,
            tesseract_cmd: std::env::var("TESSERACT_CMD")
                .unwrap_or_else(|_| "tesseract".to_string()),
            ocr_language: std::env::var("OCR_LANGUAGE").unwrap_or_else(|_| "eng".to_string()),
            ocr_timeout_secs: parse_env("OCR_TIMEOUT_SECS", 60)?,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_variable_uses_default() {
        let value: u16 = parse_env("ASSESSOR_TEST_UNSET_VARIABLE", 8080).unwrap();
        assert_eq!(value, 8080);
    }

    #[test]
    fn test_set_variable_parsed() {
        std::env::set_var("ASSESSOR_TEST_TIMEOUT", " 15 ");
        let value: u64 = parse_env("ASSESSOR_TEST_TIMEOUT", 60).unwrap();
        assert_eq!(value, 15);
    }

    #[test]
    fn test_garbage_value_is_error_naming_key() {
        std::env::set_var("ASSESSOR_TEST_PORT", "eighty");
        let err = parse_env::<u16>("ASSESSOR_TEST_PORT", 8080).unwrap_err();
        assert!(err.to_string().contains("ASSESSOR_TEST_PORT"));
    }
}

use crate::errors::AppError;

/// Strict UTF-8 decode for uploads with no dedicated adapter.
pub fn decode(data: &[u8]) -> Result<String, AppError> {
    std::str::from_utf8(data)
        .map(str::to_owned)
        .map_err(|_| AppError::InvalidFormat)
}

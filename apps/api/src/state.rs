use std::sync::Arc;

use crate::assessment::{CriteriaRegistry, SentenceSegmenter};
use crate::config::Config;
use crate::extraction::ExtractionConfig;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup, so requests share it without locks.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Validated once at startup; never mutated.
    pub registry: Arc<CriteriaRegistry>,
    /// Pluggable sentence splitter. Default: RuleSegmenter (English).
    pub segmenter: Arc<dyn SentenceSegmenter>,
    pub extraction: ExtractionConfig,
}

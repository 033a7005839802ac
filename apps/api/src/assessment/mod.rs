// Criteria assessment engine.
// Implements: criteria registry, sentence segmentation, per-sentence matching, rating.
// The engine is pure and synchronous; handlers run it on a blocking thread.

pub mod aggregator;
pub mod criteria;
pub mod handlers;
pub mod matcher;
pub mod segmenter;

pub use aggregator::{aggregate, AssessmentResult};
pub use criteria::{CriteriaRegistry, Criterion};
pub use segmenter::{RuleSegmenter, SentenceSegmenter};

use crate::errors::AppError;

/// Segments `text` and scores it against every criterion in `registry`.
///
/// Rejects empty or whitespace-only text with `AppError::EmptyDocument` before
/// any work is done; past that check the computation cannot fail.
pub fn assess(
    text: &str,
    registry: &CriteriaRegistry,
    segmenter: &dyn SentenceSegmenter,
) -> Result<AssessmentResult, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::EmptyDocument);
    }
    let sentences = segmenter.segment(text);
    Ok(aggregate(registry, &sentences))
}
